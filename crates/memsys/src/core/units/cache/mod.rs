//! Cache descriptors.
//!
//! This module describes caches as construction-time objects. It provides:
//! 1. **Classes:** [`CacheClass`], the built-in parameter set of a cache type
//!    (e.g. `L1_ICache`, `O3_ARM_v7aL2`).
//! 2. **Instances:** [`CacheLevel`], one cache in the hierarchy with per-level option
//!    overrides applied and its owning scope recorded.
//!
//! Hit/miss timing and replacement are modeled by the simulator that consumes the graph.

use std::fmt;

use serde::Serialize;

use crate::config::CacheLevelOptions;
use crate::core::units::prefetch::{PrefetchEngine, Prefetcher, PrefetcherFactory};

/// Contents a cache holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CacheKind {
    /// Instruction cache.
    Instruction,
    /// Data cache.
    Data,
    /// Unified instruction and data cache.
    Unified,
}

/// Set of cores a cache serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CacheScope {
    /// Private to one core.
    Private {
        /// Core index.
        core: usize,
    },
    /// Shared by the cores of one sibling pair.
    Pair {
        /// Pair index in the pairing list.
        pair: usize,
    },
    /// Shared by every core in the system.
    System,
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private { core } => write!(f, "private(cpu{core})"),
            Self::Pair { pair } => write!(f, "pair({pair})"),
            Self::System => f.write_str("system"),
        }
    }
}

/// Built-in parameters of a cache type.
///
/// Classes are `const` catalog entries; [`CacheLevel::new`] copies them into an instance
/// and applies the option overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheClass {
    /// Class name (e.g. `L1_DCache`).
    pub name: &'static str,
    /// Contents.
    pub kind: CacheKind,
    /// Default capacity in bytes.
    pub size: u64,
    /// Default associativity.
    pub assoc: u32,
    /// Tag lookup latency in cycles.
    pub tag_latency: u32,
    /// Data array latency in cycles.
    pub data_latency: u32,
    /// Response latency in cycles.
    pub response_latency: u32,
    /// Miss status holding registers.
    pub mshrs: u32,
    /// Targets per MSHR.
    pub tgts_per_mshr: u32,
    /// Write buffer entries.
    pub write_buffers: u32,
    /// Never holds dirty data.
    pub is_read_only: bool,
    /// Engine attached when the options select none.
    pub prefetcher: Option<PrefetchEngine>,
}

/// Mid-level-cache role of a pair L2 used as an I/O buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MlcRole {
    /// Index of the first core of the owning pair.
    pub index: usize,
    /// Direct I/O writes are steered into this cache.
    pub ddio: bool,
}

/// One cache instance in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheLevel {
    /// Class the instance was built from.
    pub class: &'static str,
    /// Contents.
    pub kind: CacheKind,
    /// Capacity in bytes.
    pub size: u64,
    /// Associativity.
    pub assoc: u32,
    /// Tag lookup latency in cycles.
    pub tag_latency: u32,
    /// Data array latency in cycles.
    pub data_latency: u32,
    /// Response latency in cycles.
    pub response_latency: u32,
    /// Miss status holding registers.
    pub mshrs: u32,
    /// Targets per MSHR.
    pub tgts_per_mshr: u32,
    /// Write buffer entries.
    pub write_buffers: u32,
    /// Never holds dirty data.
    pub is_read_only: bool,
    /// Cores served by this cache.
    pub scope: CacheScope,
    /// Attached prefetcher (possibly null).
    pub prefetcher: Prefetcher,
    /// Serves page-table walker traffic.
    pub walker: bool,
    /// Set when the cache is a mid-level I/O buffer.
    pub mlc: Option<MlcRole>,
}

impl CacheLevel {
    /// Instantiates `class` with the overrides in `opts`.
    ///
    /// # Arguments
    ///
    /// * `class` - Built-in parameter set.
    /// * `opts` - Level overrides; unset fields keep the class values.
    /// * `scope` - Cores served by the new cache.
    pub fn new(class: &CacheClass, opts: &CacheLevelOptions, scope: CacheScope) -> Self {
        let prefetcher = match opts.hwp_type.as_deref() {
            Some(id) => PrefetcherFactory::create(Some(id)),
            None => class
                .prefetcher
                .map_or(Prefetcher::Null, Prefetcher::Single),
        };

        Self {
            class: class.name,
            kind: class.kind,
            size: opts.size.unwrap_or(class.size),
            assoc: opts.assoc.unwrap_or(class.assoc),
            tag_latency: class.tag_latency,
            data_latency: class.data_latency,
            response_latency: class.response_latency,
            mshrs: class.mshrs,
            tgts_per_mshr: class.tgts_per_mshr,
            write_buffers: class.write_buffers,
            is_read_only: class.is_read_only,
            scope,
            prefetcher,
            walker: false,
            mlc: None,
        }
    }

    /// Instantiates `class` as a page-table walker cache private to `core`.
    pub fn walker(class: &CacheClass, core: usize) -> Self {
        let mut cache = Self::new(class, &CacheLevelOptions::default(), CacheScope::Private { core });
        cache.walker = true;
        cache
    }

    /// Marks the cache as a mid-level I/O buffer and attaches `prefetcher`.
    pub fn into_mlc(mut self, index: usize, prefetcher: Prefetcher) -> Self {
        self.mlc = Some(MlcRole { index, ddio: true });
        self.prefetcher = prefetcher;
        self
    }
}
