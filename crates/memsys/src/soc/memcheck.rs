//! Memory consistency checking.
//!
//! One [`ConsistencyChecker`] exists per system. Every [`ConsistencyMonitor`] refers to it
//! by node id; monitors never hold their own copy, so all observations land in one place.

use serde::Serialize;

use crate::soc::graph::NodeId;

/// System-wide consistency checker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyChecker;

/// Pass-through monitor in front of a data cache.
///
/// The core connects to `cpu_side`; `mem_side` connects to the wrapped cache's core-facing
/// port. Traffic is observed, never altered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsistencyMonitor {
    /// The shared checker.
    pub checker: NodeId,
    /// The wrapped data cache.
    pub cache: NodeId,
    /// Report violations as warnings instead of failing the run.
    pub warn_only: bool,
}

impl ConsistencyMonitor {
    /// Creates a warn-only monitor for `cache` reporting to `checker`.
    pub fn new(checker: NodeId, cache: NodeId) -> Self {
        Self {
            checker,
            cache,
            warn_only: true,
        }
    }
}
