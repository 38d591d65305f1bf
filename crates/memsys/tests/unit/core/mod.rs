//! Tests for the core-side inputs of construction.



/// Core-model resolution.
pub mod model;

/// Prefetcher catalog and factory.
pub mod prefetch;
