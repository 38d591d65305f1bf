//! Handles to the components of a built hierarchy.
//!
//! The builder records which node plays which role (per core, per pair, system-wide) so
//! the wirer and callers can walk the hierarchy without searching by path.

use serde::Serialize;

use crate::config::TopologyOptions;
use crate::core::CorePort;
use crate::soc::graph::NodeId;
use crate::soc::pairing::CorePair;

/// Overall shape of the hierarchy, in wiring precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HierarchyShape {
    /// Per-core proxies for an external memory system.
    External,
    /// L1s (or raw core ports) into pair L2s, pair L2s into the system L3.
    ThreeLevel,
    /// L1s (or raw core ports) into pair L2s, pair L2s into the memory bus.
    TwoLevel,
    /// Private L1s directly on the memory bus.
    PrivateL1,
    /// Core ports directly on the memory bus.
    Uncached,
}

impl HierarchyShape {
    /// Selects the shape implied by validated options.
    pub fn select(options: &TopologyOptions) -> Self {
        if options.uses_external_memory() {
            Self::External
        } else if options.wants_internal_caches() {
            if options.l3cache {
                Self::ThreeLevel
            } else if options.l2cache {
                Self::TwoLevel
            } else {
                Self::PrivateL1
            }
        } else {
            Self::Uncached
        }
    }

    /// Returns `true` if pair L2s are part of the shape.
    pub fn has_l2(self) -> bool {
        matches!(self, Self::ThreeLevel | Self::TwoLevel)
    }
}

/// A core port and the components behind it.
///
/// `front` is what the core connects to. `back` is the component whose memory-side
/// port continues down the hierarchy; it differs from `front` only when a consistency
/// monitor wraps a data cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct L1Slot {
    /// Core port served.
    pub port: CorePort,
    /// Component the core connects to.
    pub front: NodeId,
    /// Component forwarding traffic downstream.
    pub back: NodeId,
}

impl L1Slot {
    /// A slot with nothing between the core and the cache.
    pub fn direct(port: CorePort, node: NodeId) -> Self {
        Self {
            port,
            front: node,
            back: node,
        }
    }

    /// Returns `true` if a monitor sits in front of the cache.
    pub fn is_monitored(&self) -> bool {
        self.front != self.back
    }
}

/// Components owned by one core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoreNodes {
    /// The core.
    pub core: NodeId,
    /// Its interrupt controller.
    pub interrupts: NodeId,
    /// Pair the core belongs to.
    pub pair: usize,
    /// L1-position components, one per served core port.
    pub slots: Vec<L1Slot>,
}

impl CoreNodes {
    /// Slot serving `port`, if one was built.
    pub fn slot(&self, port: CorePort) -> Option<&L1Slot> {
        self.slots.iter().find(|s| s.port == port)
    }
}

/// Components shared by one sibling pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PairNodes {
    /// The pair.
    pub pair: CorePair,
    /// Pair crossbar in front of the L2.
    pub tol2bus: Option<NodeId>,
    /// Pair L2.
    pub l2: Option<NodeId>,
}

/// Role-indexed handles to every component of a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyLayout {
    /// Per core, indexed by core index.
    pub cores: Vec<CoreNodes>,
    /// Per pair, in pairing order.
    pub pairs: Vec<PairNodes>,
    /// Global memory bus.
    pub membus: NodeId,
    /// System L3 crossbar.
    pub tol3bus: Option<NodeId>,
    /// System L3.
    pub l3: Option<NodeId>,
    /// System consistency checker.
    pub memchecker: Option<NodeId>,
}
