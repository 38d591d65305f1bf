//! Construction error definitions.
//!
//! Every misconfiguration is reported through [`BuildError`] and returned from the
//! construction entry point; nothing here terminates the process. It provides:
//! 1. **User errors:** Mutually exclusive options, missing dependencies between levels,
//!    unavailable reference designs, and malformed pairings.
//! 2. **Defects:** Port misuse detected while wiring (double connection, role mismatch,
//!    dangling port). These indicate a bug in the builder, not in the options.

use thiserror::Error;

/// Result alias used throughout the construction code.
pub type BuildResult<T> = Result<T, BuildError>;

/// Failure raised while validating options or assembling the hierarchy.
///
/// No partial graph is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Internal caches and an external memory system were both requested.
    #[error("external caches and internal caches are exclusive options")]
    ExternalWithInternalCaches,

    /// An L3 level was requested without an L2 level.
    #[error("L3 cache cannot exist without L2 cache")]
    L3WithoutL2,

    /// An L2 level was requested while elastic trace generation is enabled.
    #[error("when elastic trace is enabled, do not configure L2 caches")]
    L2WithElasticTrace,

    /// A reference-design core model was requested but is not part of this build.
    #[error("{model} is unavailable: {hint}")]
    ModelUnavailable {
        /// Core-model identifier as supplied in the options.
        model: String,
        /// How to make the model available.
        hint: String,
    },

    /// The options ask for zero cores.
    #[error("at least one core is required")]
    NoCores,

    /// The supplied core list does not match the configured core count.
    #[error("options configure {expected} cores but {actual} were supplied")]
    CoreCountMismatch {
        /// `num_cpus` from the options.
        expected: usize,
        /// Number of cores handed to the builder.
        actual: usize,
    },

    /// A supplied core disagrees with the options (position, ISA, or thread count).
    #[error("core {index} does not match the options: {reason}")]
    CoreMismatch {
        /// Position of the core in the supplied list.
        index: usize,
        /// What differs.
        reason: String,
    },

    /// The sibling pairing does not cover every core exactly once.
    #[error("invalid core pairing: {0}")]
    InvalidPairing(String),

    /// The cache line size is zero or not a power of two.
    #[error("cache line size {0} is not a power of two")]
    InvalidCacheLineSize(u64),

    /// A single port was the target of a second connection.
    #[error("port {path}.{port} is already connected")]
    PortAlreadyConnected {
        /// Path of the component owning the port.
        path: String,
        /// Port name.
        port: &'static str,
    },

    /// A connection joined two ports with incompatible roles.
    #[error("cannot connect {from} to {to}: request must meet response")]
    PortRoleMismatch {
        /// Endpoint expected to issue requests.
        from: String,
        /// Endpoint expected to accept requests.
        to: String,
    },

    /// Two components were registered under the same path.
    #[error("component {0} already exists")]
    DuplicateComponent(String),

    /// A connection named a port the component does not expose.
    #[error("{path} has no port named {port}")]
    UnknownPort {
        /// Path of the component.
        path: String,
        /// Requested port name.
        port: String,
    },

    /// A port was left without a connection after wiring.
    #[error("no wiring target for {path}.{port}")]
    UnwiredPort {
        /// Path of the component owning the port.
        path: String,
        /// Port name.
        port: &'static str,
    },
}

impl BuildError {
    /// Returns `true` if the error indicates a builder defect rather than bad options.
    ///
    /// Defects can only arise from option combinations the builder failed to handle
    /// and must never be silently ignored by callers.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::PortAlreadyConnected { .. }
                | Self::PortRoleMismatch { .. }
                | Self::DuplicateComponent(_)
                | Self::UnknownPort { .. }
                | Self::UnwiredPort { .. }
        )
    }
}
