//! Core-model to cache-family resolution.
//!
//! Each core model implies a family of cache classes: the L1 instruction and data caches,
//! the L2, and optionally a page-table walker cache. This module provides:
//! 1. **Catalog:** `const` cache classes of the generic family and the two reference
//!    designs (`O3_ARM_v7a_3`, `HPI`).
//! 2. **Availability:** Reference designs are optional parts of a build (cargo features
//!    `o3-arm-v7a` and `hpi`); requesting a missing one is an error, not a fallback.
//! 3. **Resolution:** [`CoreModelResolver::resolve`] maps a model identifier, SMT flag, and
//!    ISA to a [`CacheFamily`].

use tracing::debug;

use crate::common::{BuildError, BuildResult, KIB, MIB, TargetIsa};
use crate::core::units::cache::{CacheClass, CacheKind};
use crate::core::units::prefetch::{PrefetchEngine, PrefetchKind};

/// Generic L1 instruction cache.
pub const L1_ICACHE: CacheClass = CacheClass {
    name: "L1_ICache",
    kind: CacheKind::Instruction,
    size: 32 * KIB,
    assoc: 2,
    tag_latency: 2,
    data_latency: 2,
    response_latency: 2,
    mshrs: 4,
    tgts_per_mshr: 20,
    write_buffers: 8,
    is_read_only: true,
    prefetcher: None,
};

/// Generic L1 data cache.
pub const L1_DCACHE: CacheClass = CacheClass {
    name: "L1_DCache",
    kind: CacheKind::Data,
    size: 32 * KIB,
    assoc: 2,
    tag_latency: 2,
    data_latency: 2,
    response_latency: 2,
    mshrs: 4,
    tgts_per_mshr: 20,
    write_buffers: 8,
    is_read_only: false,
    prefetcher: None,
};

/// Generic unified L2 cache; also the class of the system L3.
pub const L2_CACHE: CacheClass = CacheClass {
    name: "L2Cache",
    kind: CacheKind::Unified,
    size: 256 * KIB,
    assoc: 8,
    tag_latency: 20,
    data_latency: 20,
    response_latency: 20,
    mshrs: 20,
    tgts_per_mshr: 12,
    write_buffers: 8,
    is_read_only: false,
    prefetcher: None,
};

/// Generic page-table walker cache.
pub const PAGE_TABLE_WALKER_CACHE: CacheClass = CacheClass {
    name: "PageTableWalkerCache",
    kind: CacheKind::Unified,
    size: KIB,
    assoc: 2,
    tag_latency: 2,
    data_latency: 2,
    response_latency: 2,
    mshrs: 10,
    tgts_per_mshr: 12,
    write_buffers: 8,
    is_read_only: false,
    prefetcher: None,
};

/// `O3_ARM_v7a_3` instruction cache.
pub const O3_ARM_V7A_ICACHE: CacheClass = CacheClass {
    name: "O3_ARM_v7a_ICache",
    kind: CacheKind::Instruction,
    size: 32 * KIB,
    assoc: 2,
    tag_latency: 1,
    data_latency: 1,
    response_latency: 1,
    mshrs: 2,
    tgts_per_mshr: 8,
    write_buffers: 8,
    is_read_only: true,
    prefetcher: None,
};

/// `O3_ARM_v7a_3` data cache.
pub const O3_ARM_V7A_DCACHE: CacheClass = CacheClass {
    name: "O3_ARM_v7a_DCache",
    kind: CacheKind::Data,
    size: 32 * KIB,
    assoc: 2,
    tag_latency: 2,
    data_latency: 2,
    response_latency: 2,
    mshrs: 6,
    tgts_per_mshr: 8,
    write_buffers: 16,
    is_read_only: false,
    prefetcher: None,
};

/// `O3_ARM_v7a_3` L2 with its stride prefetcher.
pub const O3_ARM_V7A_L2: CacheClass = CacheClass {
    name: "O3_ARM_v7aL2",
    kind: CacheKind::Unified,
    size: MIB,
    assoc: 16,
    tag_latency: 12,
    data_latency: 12,
    response_latency: 12,
    mshrs: 16,
    tgts_per_mshr: 8,
    write_buffers: 8,
    is_read_only: false,
    prefetcher: Some(PrefetchEngine {
        kind: PrefetchKind::Stride,
        degree: 8,
        latency: 1,
    }),
};

/// `O3_ARM_v7a_3` walker cache.
pub const O3_ARM_V7A_WALK_CACHE: CacheClass = CacheClass {
    name: "O3_ARM_v7aWalkCache",
    kind: CacheKind::Unified,
    size: KIB,
    assoc: 8,
    tag_latency: 4,
    data_latency: 4,
    response_latency: 4,
    mshrs: 16,
    tgts_per_mshr: 8,
    write_buffers: 16,
    is_read_only: false,
    prefetcher: None,
};

/// `HPI` instruction cache.
pub const HPI_ICACHE: CacheClass = CacheClass {
    name: "HPI_ICache",
    kind: CacheKind::Instruction,
    size: 32 * KIB,
    assoc: 2,
    tag_latency: 1,
    data_latency: 1,
    response_latency: 1,
    mshrs: 2,
    tgts_per_mshr: 8,
    write_buffers: 8,
    is_read_only: true,
    prefetcher: None,
};

/// `HPI` data cache.
pub const HPI_DCACHE: CacheClass = CacheClass {
    name: "HPI_DCache",
    kind: CacheKind::Data,
    size: 32 * KIB,
    assoc: 4,
    tag_latency: 1,
    data_latency: 1,
    response_latency: 1,
    mshrs: 4,
    tgts_per_mshr: 8,
    write_buffers: 4,
    is_read_only: false,
    prefetcher: None,
};

/// `HPI` L2.
pub const HPI_L2: CacheClass = CacheClass {
    name: "HPI_L2",
    kind: CacheKind::Unified,
    size: MIB,
    assoc: 16,
    tag_latency: 13,
    data_latency: 13,
    response_latency: 5,
    mshrs: 4,
    tgts_per_mshr: 8,
    write_buffers: 16,
    is_read_only: false,
    prefetcher: None,
};

/// `HPI` walker cache.
pub const HPI_WALK_CACHE: CacheClass = CacheClass {
    name: "HPI_WalkCache",
    kind: CacheKind::Unified,
    size: KIB,
    assoc: 4,
    tag_latency: 1,
    data_latency: 1,
    response_latency: 1,
    mshrs: 2,
    tgts_per_mshr: 4,
    write_buffers: 1,
    is_read_only: false,
    prefetcher: None,
};

/// Optional reference core designs with matched cache families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceDesign {
    /// Arm Cortex-A15-like out-of-order core.
    O3ArmV7a,
    /// High-performance in-order core.
    Hpi,
}

impl ReferenceDesign {
    /// Looks up the design a core-model identifier refers to.
    pub fn from_model_id(id: &str) -> Option<Self> {
        match id {
            "O3_ARM_v7a_3" => Some(Self::O3ArmV7a),
            "HPI" => Some(Self::Hpi),
            _ => None,
        }
    }

    /// Core-model identifier of the design.
    pub fn model_id(self) -> &'static str {
        match self {
            Self::O3ArmV7a => "O3_ARM_v7a_3",
            Self::Hpi => "HPI",
        }
    }

    /// Cargo feature that compiles the design in.
    pub fn feature(self) -> &'static str {
        match self {
            Self::O3ArmV7a => "o3-arm-v7a",
            Self::Hpi => "hpi",
        }
    }

    /// Designs compiled into this build.
    pub fn built_in() -> Vec<Self> {
        let mut designs = Vec::new();
        if cfg!(feature = "o3-arm-v7a") {
            designs.push(Self::O3ArmV7a);
        }
        if cfg!(feature = "hpi") {
            designs.push(Self::Hpi);
        }
        designs
    }

    fn classes(self) -> (CacheClass, CacheClass, CacheClass, CacheClass) {
        match self {
            Self::O3ArmV7a => (
                O3_ARM_V7A_ICACHE,
                O3_ARM_V7A_DCACHE,
                O3_ARM_V7A_L2,
                O3_ARM_V7A_WALK_CACHE,
            ),
            Self::Hpi => (HPI_ICACHE, HPI_DCACHE, HPI_L2, HPI_WALK_CACHE),
        }
    }
}

/// Cache classes for the sibling hardware thread of an SMT core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingClasses {
    /// Sibling-thread instruction cache class.
    pub icache: CacheClass,
    /// Sibling-thread data cache class.
    pub dcache: CacheClass,
}

/// Cache classes used for one core model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheFamily {
    /// Family name (`generic` or the model identifier).
    pub name: &'static str,
    /// L1 instruction cache class.
    pub icache: CacheClass,
    /// L1 data cache class.
    pub dcache: CacheClass,
    /// L2 class (also used for the L3).
    pub l2: CacheClass,
    /// Walker cache class, if walker caches are built.
    pub walker: Option<CacheClass>,
    /// Sibling-thread classes, present when SMT is enabled.
    pub sibling: Option<SiblingClasses>,
}

/// Maps core-model identifiers to cache families.
#[derive(Debug, Clone)]
pub struct CoreModelResolver {
    available: Vec<ReferenceDesign>,
}

impl Default for CoreModelResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreModelResolver {
    /// Creates a resolver for the reference designs compiled into this build.
    pub fn new() -> Self {
        Self {
            available: ReferenceDesign::built_in(),
        }
    }

    /// Creates a resolver that only considers `designs` available.
    pub fn with_reference_designs(designs: &[ReferenceDesign]) -> Self {
        Self {
            available: designs.to_vec(),
        }
    }

    /// Returns whether `design` can be selected.
    pub fn is_available(&self, design: ReferenceDesign) -> bool {
        self.available.contains(&design)
    }

    /// Resolves the cache family for a core model.
    ///
    /// # Arguments
    ///
    /// * `cpu_type` - Core-model identifier.
    /// * `smt` - Derive sibling-thread classes from the family.
    /// * `isa` - Target ISA; decides the generic walker cache.
    ///
    /// # Errors
    ///
    /// [`BuildError::ModelUnavailable`] when `cpu_type` names a reference design that is
    /// not part of this build.
    pub fn resolve(&self, cpu_type: &str, smt: bool, isa: TargetIsa) -> BuildResult<CacheFamily> {
        let family = match ReferenceDesign::from_model_id(cpu_type) {
            Some(design) => {
                if !self.is_available(design) {
                    return Err(BuildError::ModelUnavailable {
                        model: design.model_id().to_string(),
                        hint: format!(
                            "rebuild with the `{}` feature enabled",
                            design.feature()
                        ),
                    });
                }
                let (icache, dcache, l2, walker) = design.classes();
                CacheFamily {
                    name: design.model_id(),
                    icache,
                    dcache,
                    l2,
                    walker: Some(walker),
                    sibling: None,
                }
            }
            None => CacheFamily {
                name: "generic",
                icache: L1_ICACHE,
                dcache: L1_DCACHE,
                l2: L2_CACHE,
                walker: isa.needs_walker_cache().then_some(PAGE_TABLE_WALKER_CACHE),
                sibling: None,
            },
        };

        let family = if smt {
            CacheFamily {
                sibling: Some(SiblingClasses {
                    icache: family.icache,
                    dcache: family.dcache,
                }),
                ..family
            }
        } else {
            family
        };

        debug!(
            cpu_type,
            family = family.name,
            walker = family.walker.map(|c| c.name),
            smt,
            "resolved cache family"
        );
        Ok(family)
    }
}
