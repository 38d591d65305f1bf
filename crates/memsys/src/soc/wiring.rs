//! Port wiring.
//!
//! Connects every core port to its upstream target according to the hierarchy shape:
//!
//! | Shape        | Core ports go to                         | Below the L1 position            |
//! |--------------|------------------------------------------|----------------------------------|
//! | `External`   | per-core external proxies                | owned by the external system     |
//! | `ThreeLevel` | L1s, or the pair crossbar when none      | pair L2 → `tol3bus` → L3 → bus   |
//! | `TwoLevel`   | L1s, or the pair crossbar when none      | pair L2 → memory bus             |
//! | `PrivateL1`  | L1s, or the memory bus when none         | memory bus                       |
//! | `Uncached`   | memory bus                               |                                  |
//!
//! Interrupt controllers always reach the memory bus uncached. Every connection goes
//! through [`ObjectGraph::connect`], so a port can never be bound twice.

use tracing::debug;

use crate::common::{BuildError, BuildResult};
use crate::core::cpu::ports as core_ports;
use crate::soc::graph::{NodeId, ObjectGraph, PortRef, ports};
use crate::soc::layout::{CoreNodes, HierarchyLayout, HierarchyShape, L1Slot};

/// Performs the connections for one hierarchy shape.
#[derive(Debug, Clone, Copy)]
pub struct PortWirer {
    shape: HierarchyShape,
}

impl PortWirer {
    /// Creates a wirer for `shape`.
    pub fn new(shape: HierarchyShape) -> Self {
        Self { shape }
    }

    /// Connects every component recorded in `layout`.
    ///
    /// # Errors
    ///
    /// Defect errors from [`ObjectGraph::connect`], or [`BuildError::UnwiredPort`] when
    /// the layout lacks a component the shape requires.
    pub fn wire(&self, graph: &mut ObjectGraph, layout: &HierarchyLayout) -> BuildResult<()> {
        debug!(shape = ?self.shape, "wiring ports");
        let membus_in = layout.membus.port(ports::CPU_SIDE_PORTS);

        for core in &layout.cores {
            graph.connect(core.interrupts.port(core_ports::INTERRUPT), membus_in)?;
        }

        match self.shape {
            HierarchyShape::External => {
                for core in &layout.cores {
                    Self::wire_external(graph, core)?;
                }
            }
            HierarchyShape::Uncached => {
                for core in &layout.cores {
                    for port in Self::core_ports(graph, core.core) {
                        graph.connect(port, membus_in)?;
                    }
                }
            }
            HierarchyShape::PrivateL1 | HierarchyShape::TwoLevel | HierarchyShape::ThreeLevel => {
                for core in &layout.cores {
                    let target = self.cached_target(graph, layout, core)?;
                    Self::wire_cached(graph, core, target)?;
                }
                if self.shape.has_l2() {
                    self.wire_pairs(graph, layout)?;
                }
                if self.shape == HierarchyShape::ThreeLevel {
                    Self::wire_l3(graph, layout)?;
                }
            }
        }
        Ok(())
    }

    /// Crossbar port that a core's cached traffic enters below the L1 position.
    fn cached_target(
        &self,
        graph: &ObjectGraph,
        layout: &HierarchyLayout,
        core: &CoreNodes,
    ) -> BuildResult<PortRef> {
        if !self.shape.has_l2() {
            return Ok(layout.membus.port(ports::CPU_SIDE_PORTS));
        }
        layout
            .pairs
            .get(core.pair)
            .and_then(|p| p.tol2bus)
            .map(|bus| bus.port(ports::CPU_SIDE_PORTS))
            .ok_or_else(|| BuildError::UnwiredPort {
                path: graph.node(core.core).path.clone(),
                port: core_ports::DCACHE,
            })
    }

    fn wire_external(graph: &mut ObjectGraph, core: &CoreNodes) -> BuildResult<()> {
        for slot in &core.slots {
            let front = Self::core_facing(graph, slot.front)?;
            graph.connect(core.core.port(slot.port.name()), front)?;
        }
        Ok(())
    }

    fn wire_cached(graph: &mut ObjectGraph, core: &CoreNodes, target: PortRef) -> BuildResult<()> {
        for port in Self::core_ports(graph, core.core) {
            match core.slots.iter().find(|s| s.port.name() == port.port) {
                Some(slot) => Self::wire_slot(graph, port, slot, target)?,
                None => graph.connect(port, target)?,
            }
        }
        Ok(())
    }

    /// Core → front (→ back) → target.
    fn wire_slot(
        graph: &mut ObjectGraph,
        core_port: PortRef,
        slot: &L1Slot,
        target: PortRef,
    ) -> BuildResult<()> {
        let front = Self::core_facing(graph, slot.front)?;
        graph.connect(core_port, front)?;
        if slot.is_monitored() {
            let monitor_out = Self::mem_facing(graph, slot.front)?;
            let cache_in = Self::core_facing(graph, slot.back)?;
            graph.connect(monitor_out, cache_in)?;
        }
        let out = Self::mem_facing(graph, slot.back)?;
        graph.connect(out, target)
    }

    fn wire_pairs(&self, graph: &mut ObjectGraph, layout: &HierarchyLayout) -> BuildResult<()> {
        let downstream = if self.shape == HierarchyShape::ThreeLevel {
            layout.tol3bus
        } else {
            Some(layout.membus)
        };
        for pair in &layout.pairs {
            let (Some(bus), Some(l2), Some(down)) = (pair.tol2bus, pair.l2, downstream) else {
                return Err(BuildError::UnwiredPort {
                    path: format!("pair {}", pair.pair.primary),
                    port: ports::MEM_SIDE_PORTS,
                });
            };
            graph.connect(bus.port(ports::MEM_SIDE_PORTS), l2.port(ports::CPU_SIDE))?;
            graph.connect(l2.port(ports::MEM_SIDE), down.port(ports::CPU_SIDE_PORTS))?;
        }
        Ok(())
    }

    fn wire_l3(graph: &mut ObjectGraph, layout: &HierarchyLayout) -> BuildResult<()> {
        let (Some(bus), Some(l3)) = (layout.tol3bus, layout.l3) else {
            return Err(BuildError::UnwiredPort {
                path: "l3".to_string(),
                port: ports::CPU_SIDE,
            });
        };
        graph.connect(bus.port(ports::MEM_SIDE_PORTS), l3.port(ports::CPU_SIDE))?;
        graph.connect(
            l3.port(ports::MEM_SIDE),
            layout.membus.port(ports::CPU_SIDE_PORTS),
        )
    }

    /// The core's cacheable ports as declared on its node.
    fn core_ports(graph: &ObjectGraph, core: NodeId) -> Vec<PortRef> {
        graph
            .node(core)
            .component
            .as_core()
            .map(|c| {
                c.cached_ports()
                    .into_iter()
                    .map(|p| core.port(p.name()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn core_facing(graph: &ObjectGraph, node: NodeId) -> BuildResult<PortRef> {
        graph
            .node(node)
            .component
            .as_core_facing()
            .map(|c| node.port(c.core_port()))
            .ok_or_else(|| Self::not_core_facing(graph, node))
    }

    fn mem_facing(graph: &ObjectGraph, node: NodeId) -> BuildResult<PortRef> {
        graph
            .node(node)
            .component
            .as_core_facing()
            .and_then(|c| c.mem_port())
            .map(|p| node.port(p))
            .ok_or_else(|| Self::not_core_facing(graph, node))
    }

    fn not_core_facing(graph: &ObjectGraph, node: NodeId) -> BuildError {
        BuildError::UnknownPort {
            path: graph.node(node).path.clone(),
            port: ports::CPU_SIDE.to_string(),
        }
    }
}
