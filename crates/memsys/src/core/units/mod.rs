//! Memory-side units attached to cores.

/// Cache classes and instances.
pub mod cache;

/// Prefetcher descriptors and factory.
pub mod prefetch;
