//! Hardware prefetcher descriptors.
//!
//! Prefetchers are attached to caches at construction time. Only their identity and
//! parameters are recorded here; the timing model that drives them lives elsewhere.

/// Identifier-to-prefetcher factory.
pub mod factory;

pub use self::factory::PrefetcherFactory;

use std::fmt;

use serde::Serialize;

/// Default prefetch queue latency in cycles.
const DEFAULT_LATENCY: u32 = 1;

/// Prefetch engines known to the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrefetchKind {
    /// Reference-prediction-table stride detector.
    Stride,
    /// Prefetches on misses and on hits to prefetched lines.
    Tagged,
    /// Best-offset prefetcher.
    Bop,
    /// Access map pattern matching.
    Ampm,
    /// Delta-correlating prediction tables.
    Dcpt,
    /// Signature path prefetcher.
    SignaturePath,
    /// Indirect memory (pointer-chasing) prefetcher.
    IndirectMemory,
    /// Dedicated prefetcher for a mid-level cache used as an I/O buffer.
    Mlc,
}

impl PrefetchKind {
    /// Every catalogued engine, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Stride,
        Self::Tagged,
        Self::Bop,
        Self::Ampm,
        Self::Dcpt,
        Self::SignaturePath,
        Self::IndirectMemory,
        Self::Mlc,
    ];

    /// Looks up an engine by its identifier (e.g. `StridePrefetcher`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Identifier of the engine as used in option bundles.
    pub fn name(self) -> &'static str {
        match self {
            Self::Stride => "StridePrefetcher",
            Self::Tagged => "TaggedPrefetcher",
            Self::Bop => "BOPPrefetcher",
            Self::Ampm => "AMPMPrefetcher",
            Self::Dcpt => "DCPTPrefetcher",
            Self::SignaturePath => "SignaturePathPrefetcher",
            Self::IndirectMemory => "IndirectMemoryPrefetcher",
            Self::Mlc => "MlcPrefetcher",
        }
    }

    /// Default number of lines issued per trigger.
    pub fn default_degree(self) -> u32 {
        match self {
            Self::Stride => 4,
            Self::Tagged => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for PrefetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One configured prefetch engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PrefetchEngine {
    /// Engine type.
    pub kind: PrefetchKind,
    /// Lines issued per trigger.
    pub degree: u32,
    /// Queue latency in cycles.
    pub latency: u32,
}

impl PrefetchEngine {
    /// Creates an engine with its catalog defaults.
    pub fn new(kind: PrefetchKind) -> Self {
        Self {
            kind,
            degree: kind.default_degree(),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Overrides the prefetch degree.
    pub fn with_degree(mut self, degree: u32) -> Self {
        self.degree = degree;
        self
    }

    /// Overrides the queue latency.
    pub fn with_latency(mut self, latency: u32) -> Self {
        self.latency = latency;
        self
    }
}

/// Prefetcher attached to a cache.
///
/// `Null` is a real value, not an absent reference: every cache carries a prefetcher,
/// and "no prefetching" is expressed by the null object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Prefetcher {
    /// No prefetching.
    #[default]
    Null,
    /// A single engine.
    Single(PrefetchEngine),
    /// Several engines observing the same access stream.
    Multi(Vec<PrefetchEngine>),
}

impl Prefetcher {
    /// Returns `true` for the null prefetcher.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Component engines; empty for the null prefetcher.
    pub fn engines(&self) -> &[PrefetchEngine] {
        match self {
            Self::Null => &[],
            Self::Single(engine) => std::slice::from_ref(engine),
            Self::Multi(engines) => engines,
        }
    }
}

impl fmt::Display for Prefetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Single(engine) => write!(f, "{}(degree={})", engine.kind, engine.degree),
            Self::Multi(engines) => {
                f.write_str("MultiPrefetcher[")?;
                for (i, engine) in engines.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}(degree={})", engine.kind, engine.degree)?;
                }
                f.write_str("]")
            }
        }
    }
}
