//! Cores and their interrupt controllers as seen by the hierarchy builder.
//!
//! A core is only a set of named ports here. It provides:
//! 1. **Fetch and data:** `icache_port` and `dcache_port`, plus sibling-thread copies when
//!    the core runs two hardware threads.
//! 2. **Translation walk:** `itb_walker_port` and `dtb_walker_port`, present only when the
//!    ISA walks page tables in hardware.
//! 3. **Interrupts:** delivered through an [`InterruptController`] created per core.

use serde::Serialize;

use crate::common::TargetIsa;

/// Port names exposed by cores and interrupt controllers.
pub mod ports {
    /// Instruction fetch port.
    pub const ICACHE: &str = "icache_port";
    /// Data access port.
    pub const DCACHE: &str = "dcache_port";
    /// Instruction fetch port of the sibling hardware thread.
    pub const ICACHE_SIBLING: &str = "icache_port_sibling";
    /// Data access port of the sibling hardware thread.
    pub const DCACHE_SIBLING: &str = "dcache_port_sibling";
    /// Instruction-TLB page-table walker port.
    pub const ITB_WALKER: &str = "itb_walker_port";
    /// Data-TLB page-table walker port.
    pub const DTB_WALKER: &str = "dtb_walker_port";
    /// Interrupt controller port.
    pub const INTERRUPT: &str = "int_port";
}

/// One of a core's cacheable memory ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CorePort {
    /// Instruction fetch.
    Fetch,
    /// Data access.
    Data,
    /// Instruction fetch of the sibling thread.
    SiblingFetch,
    /// Data access of the sibling thread.
    SiblingData,
    /// Instruction-side page-table walk.
    InstWalk,
    /// Data-side page-table walk.
    DataWalk,
}

impl CorePort {
    /// Port name on the core.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fetch => ports::ICACHE,
            Self::Data => ports::DCACHE,
            Self::SiblingFetch => ports::ICACHE_SIBLING,
            Self::SiblingData => ports::DCACHE_SIBLING,
            Self::InstWalk => ports::ITB_WALKER,
            Self::DataWalk => ports::DTB_WALKER,
        }
    }
}

/// A simulated processor context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Core {
    /// Core index, unique within the system.
    pub index: usize,
    /// Target ISA.
    pub isa: TargetIsa,
    /// Hardware threads (1, or 2 with SMT).
    pub threads: u32,
}

impl Core {
    /// Creates a single-threaded core.
    pub fn new(index: usize, isa: TargetIsa) -> Self {
        Self {
            index,
            isa,
            threads: 1,
        }
    }

    /// Gives the core a sibling hardware thread.
    pub fn with_smt(mut self) -> Self {
        self.threads = 2;
        self
    }

    /// Returns `true` if the core runs a sibling thread.
    pub fn is_smt(&self) -> bool {
        self.threads > 1
    }

    /// Path of the core in the system (`cpu[N]`).
    pub fn path(&self) -> String {
        format!("cpu[{}]", self.index)
    }

    /// Path of a child object of the core (`cpu[N].child`).
    pub fn child_path(&self, child: &str) -> String {
        format!("cpu[{}].{child}", self.index)
    }

    /// Cacheable ports the core exposes, in wiring order.
    pub fn cached_ports(&self) -> Vec<CorePort> {
        let mut ports = vec![CorePort::Fetch, CorePort::Data];
        if self.is_smt() {
            ports.extend([CorePort::SiblingFetch, CorePort::SiblingData]);
        }
        if self.isa.has_hw_walker() {
            ports.extend([CorePort::InstWalk, CorePort::DataWalk]);
        }
        ports
    }
}

/// Per-core interrupt controller.
///
/// Created for every core before any port is wired; its port always reaches the memory
/// bus uncached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterruptController {
    /// Index of the owning core.
    pub core: usize,
    /// ISA of the owning core.
    pub isa: TargetIsa,
}
