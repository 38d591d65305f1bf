//! Memory-subsystem hierarchy builder.
//!
//! This crate constructs the cache hierarchy of a simulated multicore system from a
//! bundle of topology options:
//! 1. **Validation:** Forbidden option combinations fail before any object exists.
//! 2. **Resolution:** Core models map to cache families; prefetcher identifiers map to
//!    prefetch engines.
//! 3. **Construction:** Private L1s, walker caches, pair-shared L2s, a system L3,
//!    crossbars, snoop filters, consistency monitors, or external proxies.
//! 4. **Wiring:** Every port is connected exactly once, according to the hierarchy shape.
//! 5. **Reporting:** Instance counts and connection-shape summaries.
//!
//! # Examples
//!
//! ```
//! use memsys_core::{System, TopologyOptions};
//!
//! let options = TopologyOptions {
//!     num_cpus: 4,
//!     caches: true,
//!     l2cache: true,
//!     ..TopologyOptions::default()
//! };
//! let system = System::build(&options).unwrap();
//! assert_eq!(system.l2_caches().len(), 2);
//! assert_eq!(system.stats().l1_caches, 8);
//! ```

/// Common types (address ranges, constants, errors, ISA).
pub mod common;
/// Topology options (defaults, per-level overrides).
pub mod config;
/// Cores, core-model resolution, caches, and prefetchers.
pub mod core;
/// Hierarchy assembly (graph, interconnect, builder, wiring).
pub mod soc;
/// Topology statistics collection and reporting.
pub mod stats;

/// Construction error; every failure of [`System::build`] is one of these.
pub use crate::common::BuildError;
/// Root option bundle; use `TopologyOptions::default()` or deserialize from JSON.
pub use crate::config::TopologyOptions;
/// Builder taking explicit cores and pairing.
pub use crate::soc::HierarchyBuilder;
/// Fully wired hierarchy; construct with `System::build`.
pub use crate::soc::System;
/// Summary of a built hierarchy.
pub use crate::stats::TopologyStats;
