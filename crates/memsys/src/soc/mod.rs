//! Memory-hierarchy assembly.
//!
//! This module organizes everything between the cores and main memory: the component
//! graph, crossbars, consistency checking, external proxies, and the builder and wirer
//! that put them together.

/// Hierarchy builder and the top-level `System` type.
pub mod builder;

/// Proxies for an externally supplied memory system.
pub mod external;

/// Component arena and port connections.
pub mod graph;

/// Crossbars and snoop filters.
pub mod interconnect;

/// Role-indexed handles to built components.
pub mod layout;

/// Consistency checker and monitors.
pub mod memcheck;

/// Sibling pairing of cores.
pub mod pairing;

/// Core-facing port abstraction.
pub mod traits;

/// Option and input validation.
pub mod validate;

/// Port wiring per hierarchy shape.
pub mod wiring;

pub use builder::{HierarchyBuilder, System, default_cores};
pub use layout::HierarchyShape;
pub use pairing::CorePair;
