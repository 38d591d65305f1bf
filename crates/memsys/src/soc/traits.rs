//! Core-facing port abstraction.
//!
//! Anything a core port can attach to in the L1 position (a built cache, a consistency
//! monitor, an external proxy) implements [`CoreFacing`]. The wiring code asks for
//! `core_port()` and `mem_port()` and never needs to know which one it holds.

use crate::core::units::cache::CacheLevel;
use crate::soc::external::ExternalCacheProxy;
use crate::soc::graph::ports;
use crate::soc::memcheck::ConsistencyMonitor;

/// A component that can sit directly behind a core port.
pub trait CoreFacing {
    /// Port the core connects to.
    fn core_port(&self) -> &'static str;

    /// Port leading further down the hierarchy, if this component forwards traffic.
    ///
    /// External proxies terminate traffic inside the external system and return `None`.
    fn mem_port(&self) -> Option<&'static str>;
}

impl CoreFacing for CacheLevel {
    fn core_port(&self) -> &'static str {
        ports::CPU_SIDE
    }

    fn mem_port(&self) -> Option<&'static str> {
        Some(ports::MEM_SIDE)
    }
}

impl CoreFacing for ConsistencyMonitor {
    fn core_port(&self) -> &'static str {
        ports::CPU_SIDE
    }

    fn mem_port(&self) -> Option<&'static str> {
        Some(ports::MEM_SIDE)
    }
}

impl CoreFacing for ExternalCacheProxy {
    fn core_port(&self) -> &'static str {
        ports::PORT
    }

    fn mem_port(&self) -> Option<&'static str> {
        None
    }
}
