//! Crossbar interconnects and snoop filters.
//!
//! This module describes the crossbars that join caches and cores to the next level. It
//! provides:
//! 1. **Crossbar flavours:** Pair L2 crossbars, the system L3 crossbar, and the memory bus,
//!    each with its default width and latencies.
//! 2. **Snoop filters:** Optional per-crossbar filters that track line ownership so snoops
//!    are not broadcast.
//! 3. **Transit time:** Cycles to move a payload across the crossbar, for reporting.

use std::fmt;

use serde::Serialize;

use crate::common::constants::{DEFAULT_SNOOP_FILTER_CAPACITY, L3_SNOOP_FILTER_CAPACITY};

/// Position of a crossbar in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CrossbarKind {
    /// Joins one pair's L1s (and walker traffic) to the pair L2.
    L2,
    /// Joins every pair L2 to the system L3.
    L3,
    /// Global memory bus.
    System,
}

impl fmt::Display for CrossbarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L2 => "L2XBar",
            Self::L3 => "L3XBar",
            Self::System => "SystemXBar",
        };
        f.write_str(name)
    }
}

/// Snoop filter owned by a crossbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SnoopFilter {
    /// Lookup latency in cycles.
    pub lookup_latency: u32,
    /// Capacity tracked, in bytes.
    pub max_capacity: u64,
    /// Filters system-wide traffic in front of the L3.
    pub is_for_l3x: bool,
}

impl SnoopFilter {
    /// Filter with default capacity for a non-L3 crossbar.
    pub fn new(lookup_latency: u32) -> Self {
        Self {
            lookup_latency,
            max_capacity: DEFAULT_SNOOP_FILTER_CAPACITY,
            is_for_l3x: false,
        }
    }

    /// System-wide filter placed on the L3 crossbar.
    pub fn for_l3() -> Self {
        Self {
            lookup_latency: 0,
            max_capacity: L3_SNOOP_FILTER_CAPACITY,
            is_for_l3x: true,
        }
    }
}

/// A crossbar connecting many upstream ports to the next level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crossbar {
    /// Position in the hierarchy.
    pub kind: CrossbarKind,
    /// Datapath width in bytes.
    pub width: u64,
    /// Cycles to accept a request.
    pub frontend_latency: u64,
    /// Cycles to forward a request.
    pub forward_latency: u64,
    /// Cycles to return a response.
    pub response_latency: u64,
    /// Cycles to return a snoop response.
    pub snoop_response_latency: u64,
    /// Optional snoop filter.
    pub snoop_filter: Option<SnoopFilter>,
    /// Last crossbar before memory; coherence is resolved here.
    pub point_of_coherency: bool,
}

impl Crossbar {
    /// Pair crossbar in front of an L2.
    pub fn l2() -> Self {
        Self {
            kind: CrossbarKind::L2,
            width: 32,
            frontend_latency: 1,
            forward_latency: 0,
            response_latency: 1,
            snoop_response_latency: 1,
            snoop_filter: Some(SnoopFilter::new(0)),
            point_of_coherency: false,
        }
    }

    /// System crossbar in front of the L3.
    ///
    /// # Arguments
    ///
    /// * `snoop_filter` - `false` omits the system-wide snoop filter.
    pub fn l3(snoop_filter: bool) -> Self {
        Self {
            kind: CrossbarKind::L3,
            width: 32,
            frontend_latency: 1,
            forward_latency: 0,
            response_latency: 1,
            snoop_response_latency: 1,
            snoop_filter: snoop_filter.then(SnoopFilter::for_l3),
            point_of_coherency: false,
        }
    }

    /// Global memory bus.
    pub fn membus() -> Self {
        Self {
            kind: CrossbarKind::System,
            width: 16,
            frontend_latency: 3,
            forward_latency: 4,
            response_latency: 2,
            snoop_response_latency: 4,
            snoop_filter: Some(SnoopFilter::new(4)),
            point_of_coherency: true,
        }
    }
}
