//! Physical address ranges.
//!
//! Components that terminate traffic (external caches, memories) declare the physical
//! address ranges they accept. This module provides:
//! 1. **Range type:** A half-open `[start, end)` range over the physical address space.
//! 2. **Whole-space range:** The `AllMemory` convenience used by external proxies.

use std::fmt;

use serde::Serialize;

/// A half-open physical address range `[start, end)`.
///
/// `end` is exclusive; `u64::MAX` as `end` is treated as the top of the address space,
/// so the whole space is representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AddrRange {
    /// First address in the range.
    pub start: u64,
    /// One past the last address in the range.
    pub end: u64,
}

impl AddrRange {
    /// Creates a range from a start address and a size in bytes.
    ///
    /// # Arguments
    ///
    /// * `start` - First address in the range.
    /// * `size` - Range size in bytes; saturates at the top of the address space.
    pub fn new(start: u64, size: u64) -> Self {
        Self {
            start,
            end: start.saturating_add(size),
        }
    }

    /// Returns a range spanning the entire physical address space.
    pub fn all_memory() -> Self {
        Self {
            start: 0,
            end: u64::MAX,
        }
    }

    /// Size of the range in bytes.
    #[inline]
    pub fn size(&self) -> u64 {
        self.end - self.start
    }

    /// Returns whether `addr` falls inside the range.
    #[inline]
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.start && (addr < self.end || self.end == u64::MAX)
    }
}

impl fmt::Display for AddrRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::all_memory() {
            write!(f, "AllMemory")
        } else {
            write!(f, "[{:#x}:{:#x})", self.start, self.end)
        }
    }
}
