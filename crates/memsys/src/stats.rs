//! Topology statistics collection and reporting.
//!
//! This module summarizes a built hierarchy. It provides:
//! 1. **Instance counts:** Cores, hardware threads, caches per level, crossbars, monitors,
//!    and external proxies.
//! 2. **Capacity:** Total bytes of cache capacity and the count per cache class.
//! 3. **Connection shape:** Connections grouped by `type.port -> type.port`, which is
//!    independent of paths and so comparable across builds.
//!
//! Two builds from identical options produce equal statistics.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::units::cache::CacheScope;
use crate::soc::builder::System;
use crate::soc::graph::{Component, NodeId};
use crate::soc::layout::HierarchyShape;

/// Summary of a built [`System`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologyStats {
    /// Hierarchy shape.
    pub shape: HierarchyShape,
    /// Cache family in use.
    pub family: &'static str,
    /// System cache line size in bytes.
    pub cache_line_size: u64,

    /// Number of cores.
    pub cores: usize,
    /// Hardware threads across all cores.
    pub threads: u64,
    /// Interrupt controllers.
    pub interrupt_controllers: usize,

    /// Private instruction and data caches (including sibling-thread caches).
    pub l1_caches: usize,
    /// Page-table walker caches.
    pub walker_caches: usize,
    /// Pair-shared caches.
    pub l2_caches: usize,
    /// System-wide caches.
    pub l3_caches: usize,
    /// Caches marked as mid-level I/O buffers.
    pub mlc_caches: usize,
    /// Total cache capacity in bytes.
    pub cache_bytes: u64,
    /// Cache count per class name.
    pub caches_by_class: BTreeMap<&'static str, usize>,

    /// Crossbars, including the memory bus.
    pub crossbars: usize,
    /// Snoop filters across all crossbars.
    pub snoop_filters: usize,
    /// Consistency monitors.
    pub monitors: usize,
    /// Consistency checkers.
    pub checkers: usize,
    /// External cache proxies.
    pub external_proxies: usize,

    /// Total connections.
    pub connections: usize,
    /// Connection count per `type.port -> type.port`.
    pub connection_shape: BTreeMap<String, usize>,
}

impl TopologyStats {
    /// Collects statistics from a built system.
    pub fn collect(system: &System) -> Self {
        let mut stats = Self {
            shape: system.shape(),
            family: system.family_name(),
            cache_line_size: system.cache_line_size(),
            cores: 0,
            threads: 0,
            interrupt_controllers: 0,
            l1_caches: 0,
            walker_caches: 0,
            l2_caches: 0,
            l3_caches: 0,
            mlc_caches: 0,
            cache_bytes: 0,
            caches_by_class: BTreeMap::new(),
            crossbars: 0,
            snoop_filters: 0,
            monitors: 0,
            checkers: 0,
            external_proxies: 0,
            connections: 0,
            connection_shape: BTreeMap::new(),
        };

        for node in system.nodes() {
            match &node.component {
                Component::Core(core) => {
                    stats.cores += 1;
                    stats.threads += u64::from(core.threads);
                }
                Component::Interrupts(_) => stats.interrupt_controllers += 1,
                Component::Cache(cache) => {
                    match (cache.scope, cache.walker) {
                        (_, true) => stats.walker_caches += 1,
                        (CacheScope::Private { .. }, false) => stats.l1_caches += 1,
                        (CacheScope::Pair { .. }, false) => stats.l2_caches += 1,
                        (CacheScope::System, false) => stats.l3_caches += 1,
                    }
                    if cache.mlc.is_some() {
                        stats.mlc_caches += 1;
                    }
                    stats.cache_bytes = stats.cache_bytes.saturating_add(cache.size);
                    *stats.caches_by_class.entry(cache.class).or_default() += 1;
                }
                Component::Crossbar(xbar) => {
                    stats.crossbars += 1;
                    if xbar.snoop_filter.is_some() {
                        stats.snoop_filters += 1;
                    }
                }
                Component::Monitor(_) => stats.monitors += 1,
                Component::Checker(_) => stats.checkers += 1,
                Component::External(_) => stats.external_proxies += 1,
            }
        }

        let graph = system.graph();
        let side = |node: NodeId, port: &str| {
            format!("{}.{port}", graph.node(node).component.type_name())
        };
        for connection in graph.connections() {
            let key = format!(
                "{} -> {}",
                side(connection.request.node, connection.request.port),
                side(connection.response.node, connection.response.port)
            );
            *stats.connection_shape.entry(key).or_default() += 1;
        }
        stats.connections = graph.connections().len();
        stats
    }

    /// Total caches of every kind.
    pub fn total_caches(&self) -> usize {
        self.l1_caches + self.walker_caches + self.l2_caches + self.l3_caches
    }
}

impl fmt::Display for TopologyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "MEMORY HIERARCHY TOPOLOGY")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "shape                    {:?}", self.shape)?;
        writeln!(f, "family                   {}", self.family)?;
        writeln!(f, "cache_line               {} B", self.cache_line_size)?;
        writeln!(f, "cores                    {}", self.cores)?;
        writeln!(f, "threads                  {}", self.threads)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CACHES")?;
        writeln!(f, "  l1                     {}", self.l1_caches)?;
        writeln!(f, "  walker                 {}", self.walker_caches)?;
        writeln!(f, "  l2                     {}", self.l2_caches)?;
        writeln!(f, "  l3                     {}", self.l3_caches)?;
        writeln!(f, "  mlc                    {}", self.mlc_caches)?;
        writeln!(f, "  capacity               {} KiB", self.cache_bytes / 1024)?;
        for (class, count) in &self.caches_by_class {
            writeln!(f, "  {class:<22} {count}")?;
        }
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "INTERCONNECT")?;
        writeln!(f, "  crossbars              {}", self.crossbars)?;
        writeln!(f, "  snoop_filters          {}", self.snoop_filters)?;
        writeln!(f, "  monitors               {}", self.monitors)?;
        writeln!(f, "  checkers               {}", self.checkers)?;
        writeln!(f, "  external_proxies       {}", self.external_proxies)?;
        writeln!(f, "  interrupt_controllers  {}", self.interrupt_controllers)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "CONNECTIONS              {}", self.connections)?;
        for (shape, count) in &self.connection_shape {
            writeln!(f, "  {count:>4}  {shape}")?;
        }
        write!(f, "==========================================================")
    }
}
