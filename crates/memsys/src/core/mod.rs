//! Core-side construction inputs.
//!
//! This module contains the core and interrupt-controller descriptors, the resolver that
//! turns a core model into a cache family, and the cache and prefetcher units attached
//! to each core.

/// Cores and interrupt controllers.
pub mod cpu;

/// Core-model to cache-family resolution.
pub mod model;

/// Caches and prefetchers.
pub mod units;

pub use self::cpu::{Core, CorePort, InterruptController};
pub use self::model::{CacheFamily, CoreModelResolver, ReferenceDesign};
