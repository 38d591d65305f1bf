//! Topology options for hierarchy construction.
//!
//! This module defines the immutable option bundle consumed by the builder. It provides:
//! 1. **Defaults:** Baseline values for core count, core model, and cache line size.
//! 2. **Structures:** The top-level [`TopologyOptions`] and per-level [`CacheLevelOptions`].
//! 3. **Level selection:** The [`Level`] enum naming the four configurable cache levels.
//!
//! Options are usually deserialized from JSON; every field is optional and takes its
//! default when absent. Per-level fields left unset fall back to the defaults of the
//! cache class chosen for that level.

use serde::{Deserialize, Serialize};

use crate::common::TargetIsa;

/// Default option values.
mod defaults {
    /// Number of simulated cores.
    pub const NUM_CPUS: usize = 1;

    /// Core model used when none is given; resolves to the generic cache family.
    pub const CPU_TYPE: &str = "TimingSimpleCPU";

    /// System cache line size in bytes.
    pub const CACHELINE_SIZE: u64 = crate::common::constants::DEFAULT_CACHE_LINE;
}

/// One of the configurable cache levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Private L1 instruction cache.
    L1I,
    /// Private L1 data cache.
    L1D,
    /// Pair-shared L2 cache.
    L2,
    /// System-wide L3 cache.
    L3,
}

impl Level {
    /// Option-key prefix of the level (`l1i`, `l1d`, `l2`, `l3`).
    pub fn key(self) -> &'static str {
        match self {
            Self::L1I => "l1i",
            Self::L1D => "l1d",
            Self::L2 => "l2",
            Self::L3 => "l3",
        }
    }
}

/// Immutable option bundle describing the requested hierarchy.
///
/// # Examples
///
/// ```
/// use memsys_core::config::TopologyOptions;
///
/// let json = r#"{
///     "num_cpus": 4,
///     "caches": true,
///     "l2cache": true,
///     "l2": { "size": 1048576, "assoc": 16 }
/// }"#;
///
/// let options = TopologyOptions::from_json(json).unwrap();
/// assert_eq!(options.num_cpus, 4);
/// assert_eq!(options.l2.size, Some(1 << 20));
/// assert_eq!(options.l1i.size, None);
/// assert_eq!(options.cacheline_size, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TopologyOptions {
    /// Number of simulated cores.
    #[serde(default = "TopologyOptions::default_num_cpus")]
    pub num_cpus: usize,

    /// Core-model identifier (e.g. `O3_ARM_v7a_3`, `HPI`); selects the cache family.
    #[serde(default = "TopologyOptions::default_cpu_type")]
    pub cpu_type: String,

    /// Target ISA of the cores.
    #[serde(default)]
    pub isa: TargetIsa,

    /// System cache line size in bytes.
    #[serde(default = "TopologyOptions::default_cacheline_size")]
    pub cacheline_size: u64,

    /// Build private L1 caches.
    #[serde(default)]
    pub caches: bool,

    /// Build pair-shared L2 caches.
    #[serde(default)]
    pub l2cache: bool,

    /// Build the system-wide L3 cache.
    #[serde(default)]
    pub l3cache: bool,

    /// Cores run two hardware threads, each with its own L1 pair.
    #[serde(default)]
    pub smt: bool,

    /// Wrap data caches in consistency monitors.
    #[serde(default)]
    pub memchecker: bool,

    /// Omit the snoop filter on the L3 crossbar.
    #[serde(default)]
    pub disable_snoop_filter: bool,

    /// Elastic trace generation; requires a minimal (L1-only) hierarchy.
    #[serde(default)]
    pub elastic_trace_en: bool,

    /// Use each pair L2 as a mid-level I/O buffer with a composite prefetcher.
    #[serde(default)]
    pub mlc_adaptive_ddio: bool,

    /// Port type of an external memory system; `Some` means one is in use.
    #[serde(default)]
    pub external_memory_system: Option<String>,

    /// L1 instruction cache overrides.
    #[serde(default)]
    pub l1i: CacheLevelOptions,

    /// L1 data cache overrides.
    #[serde(default)]
    pub l1d: CacheLevelOptions,

    /// L2 cache overrides.
    #[serde(default)]
    pub l2: CacheLevelOptions,

    /// L3 cache overrides.
    #[serde(default)]
    pub l3: CacheLevelOptions,
}

impl TopologyOptions {
    /// Parses options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the document is malformed or a field has the
    /// wrong type.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the overrides for one cache level.
    pub fn level(&self, level: Level) -> &CacheLevelOptions {
        match level {
            Level::L1I => &self.l1i,
            Level::L1D => &self.l1d,
            Level::L2 => &self.l2,
            Level::L3 => &self.l3,
        }
    }

    /// Returns `true` if an external memory system replaces the internal caches.
    pub fn uses_external_memory(&self) -> bool {
        self.external_memory_system.is_some()
    }

    /// Returns `true` if any internally built cache level is requested.
    pub fn wants_internal_caches(&self) -> bool {
        self.caches || self.l2cache
    }

    /// Returns the default core count.
    fn default_num_cpus() -> usize {
        defaults::NUM_CPUS
    }

    /// Returns the default core-model identifier.
    fn default_cpu_type() -> String {
        defaults::CPU_TYPE.to_string()
    }

    /// Returns the default cache line size.
    fn default_cacheline_size() -> u64 {
        defaults::CACHELINE_SIZE
    }
}

impl Default for TopologyOptions {
    /// One core, generic model, no caches, no external memory system.
    fn default() -> Self {
        Self {
            num_cpus: defaults::NUM_CPUS,
            cpu_type: defaults::CPU_TYPE.to_string(),
            isa: TargetIsa::default(),
            cacheline_size: defaults::CACHELINE_SIZE,
            caches: false,
            l2cache: false,
            l3cache: false,
            smt: false,
            memchecker: false,
            disable_snoop_filter: false,
            elastic_trace_en: false,
            mlc_adaptive_ddio: false,
            external_memory_system: None,
            l1i: CacheLevelOptions::default(),
            l1d: CacheLevelOptions::default(),
            l2: CacheLevelOptions::default(),
            l3: CacheLevelOptions::default(),
        }
    }
}

/// Per-level overrides; `None` keeps the cache class default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheLevelOptions {
    /// Capacity in bytes
    #[serde(default)]
    pub size: Option<u64>,

    /// Associativity (number of ways)
    #[serde(default)]
    pub assoc: Option<u32>,

    /// Prefetch-engine identifier (e.g. `StridePrefetcher`)
    #[serde(default)]
    pub hwp_type: Option<String>,
}
