//! Proxies for an externally supplied memory system.
//!
//! When the caches live outside this construction, each core is given stand-in objects
//! that the external system binds to by name. The names are a wire contract:
//! `cpu<N>.icache`, `cpu<N>.dcache`, and for ISAs with hardware walkers
//! `cpu<N>.itb_walker_cache` / `cpu<N>.dtb_walker_cache`. SMT cores additionally get
//! `cpu<N>.icache_sibling` / `cpu<N>.dcache_sibling`.
//!
//! A proxy exposes one generic port, `port`. Through [`CoreFacing`](crate::soc::traits::CoreFacing)
//! that port is what the wiring code sees as the proxy's core-facing port, so proxies and
//! built caches are wired by the same code.

use std::fmt;

use serde::Serialize;

use crate::common::AddrRange;
use crate::core::CorePort;

/// Role a proxy plays for its core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExternalRole {
    /// Instruction cache.
    ICache,
    /// Data cache.
    DCache,
    /// Sibling-thread instruction cache.
    SiblingICache,
    /// Sibling-thread data cache.
    SiblingDCache,
    /// Instruction-TLB walker cache.
    ItbWalkerCache,
    /// Data-TLB walker cache.
    DtbWalkerCache,
}

impl ExternalRole {
    /// Name suffix used in the proxy name.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::ICache => "icache",
            Self::DCache => "dcache",
            Self::SiblingICache => "icache_sibling",
            Self::SiblingDCache => "dcache_sibling",
            Self::ItbWalkerCache => "itb_walker_cache",
            Self::DtbWalkerCache => "dtb_walker_cache",
        }
    }
}

impl From<CorePort> for ExternalRole {
    fn from(port: CorePort) -> Self {
        match port {
            CorePort::Fetch => Self::ICache,
            CorePort::Data => Self::DCache,
            CorePort::SiblingFetch => Self::SiblingICache,
            CorePort::SiblingData => Self::SiblingDCache,
            CorePort::InstWalk => Self::ItbWalkerCache,
            CorePort::DataWalk => Self::DtbWalkerCache,
        }
    }
}

impl fmt::Display for ExternalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Name an external memory system must use for a core's proxy (`cpu<N>.<role>`).
pub fn proxy_name(core: usize, role: ExternalRole) -> String {
    format!("cpu{core}.{}", role.suffix())
}

/// Stand-in for a cache provided by an external memory system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalCacheProxy {
    /// Name the external system binds to.
    pub port_data: String,
    /// Port type tag of the external system.
    pub port_type: String,
    /// Address ranges accepted by the proxy.
    pub addr_ranges: Vec<AddrRange>,
}

/// Creates proxies for one external memory system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCacheFactory {
    port_type: String,
}

impl ExternalCacheFactory {
    /// Creates a factory tagging every proxy with `port_type`.
    pub fn new(port_type: impl Into<String>) -> Self {
        Self {
            port_type: port_type.into(),
        }
    }

    /// Port type tag of the external system.
    pub fn port_type(&self) -> &str {
        &self.port_type
    }

    /// Creates a proxy named `name` covering all of memory.
    pub fn make(&self, name: impl Into<String>) -> ExternalCacheProxy {
        ExternalCacheProxy {
            port_data: name.into(),
            port_type: self.port_type.clone(),
            addr_ranges: vec![AddrRange::all_memory()],
        }
    }

    /// Creates the proxy for `role` of core `core`.
    pub fn for_core(&self, core: usize, role: ExternalRole) -> ExternalCacheProxy {
        self.make(proxy_name(core, role))
    }
}
