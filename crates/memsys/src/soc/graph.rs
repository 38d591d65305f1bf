//! Component arena and port connection table.
//!
//! Every object created during construction is registered here once and referred to by
//! [`NodeId`] afterwards, so shared levels are never duplicated. This module provides:
//! 1. **Components:** The closed set of objects a hierarchy is made of.
//! 2. **Ports:** Named request/response ports, single or vector, declared per component.
//! 3. **Connections:** [`ObjectGraph::connect`] joins a request port to a response port and
//!    rejects role mismatches and second connections to a single port.
//! 4. **Verification:** [`ObjectGraph::ensure_fully_wired`] rejects dangling single ports.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::common::{BuildError, BuildResult};
use crate::core::cpu::{Core, InterruptController, ports as core_ports};
use crate::core::units::cache::CacheLevel;
use crate::soc::external::ExternalCacheProxy;
use crate::soc::interconnect::{Crossbar, CrossbarKind};
use crate::soc::memcheck::{ConsistencyChecker, ConsistencyMonitor};
use crate::soc::traits::CoreFacing;

/// Port names of caches, monitors, crossbars, and proxies.
pub mod ports {
    /// Core-facing port of a cache or monitor.
    pub const CPU_SIDE: &str = "cpu_side";
    /// Memory-facing port of a cache or monitor.
    pub const MEM_SIDE: &str = "mem_side";
    /// Upstream vector port of a crossbar.
    pub const CPU_SIDE_PORTS: &str = "cpu_side_ports";
    /// Downstream vector port of a crossbar.
    pub const MEM_SIDE_PORTS: &str = "mem_side_ports";
    /// Generic port of an external proxy.
    pub const PORT: &str = "port";
}

/// Handle of a component in an [`ObjectGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the component in registration order.
    pub fn index(self) -> usize {
        self.0
    }

    /// Names one of the component's ports.
    pub fn port(self, name: &'static str) -> PortRef {
        PortRef { node: self, port: name }
    }
}

/// A named port of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    /// Owning component.
    pub node: NodeId,
    /// Port name.
    pub port: &'static str,
}

/// Direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PortRole {
    /// Issues requests (towards memory).
    Request,
    /// Accepts requests (from cores).
    Response,
}

/// Number of connections a port accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PortArity {
    /// Exactly one connection.
    Single,
    /// Any number of connections, one slot each.
    Vector,
}

/// Declaration of one port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortSpec {
    /// Port name.
    pub name: &'static str,
    /// Direction.
    pub role: PortRole,
    /// Connection count.
    pub arity: PortArity,
}

impl PortSpec {
    const fn new(name: &'static str, role: PortRole, arity: PortArity) -> Self {
        Self { name, role, arity }
    }
}

const CACHE_PORTS: [PortSpec; 2] = [
    PortSpec::new(ports::CPU_SIDE, PortRole::Response, PortArity::Single),
    PortSpec::new(ports::MEM_SIDE, PortRole::Request, PortArity::Single),
];

const CROSSBAR_PORTS: [PortSpec; 2] = [
    PortSpec::new(ports::CPU_SIDE_PORTS, PortRole::Response, PortArity::Vector),
    PortSpec::new(ports::MEM_SIDE_PORTS, PortRole::Request, PortArity::Vector),
];

/// Object in the memory-system graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Component {
    /// A core.
    Core(Core),
    /// A core's interrupt controller.
    Interrupts(InterruptController),
    /// A cache.
    Cache(CacheLevel),
    /// A crossbar.
    Crossbar(Crossbar),
    /// A consistency monitor in front of a data cache.
    Monitor(ConsistencyMonitor),
    /// The system consistency checker.
    Checker(ConsistencyChecker),
    /// A proxy for an external cache.
    External(ExternalCacheProxy),
}

impl Component {
    /// Type name used in summaries (cache class, crossbar flavour, ...).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Core(_) => "Core",
            Self::Interrupts(_) => "Interrupts",
            Self::Cache(cache) => cache.class,
            Self::Crossbar(xbar) => match xbar.kind {
                CrossbarKind::L2 => "L2XBar",
                CrossbarKind::L3 => "L3XBar",
                CrossbarKind::System => "SystemXBar",
            },
            Self::Monitor(_) => "MemCheckerMonitor",
            Self::Checker(_) => "MemChecker",
            Self::External(_) => "ExternalCache",
        }
    }

    /// Ports the component declares.
    pub fn ports(&self) -> Vec<PortSpec> {
        match self {
            Self::Core(core) => core
                .cached_ports()
                .into_iter()
                .map(|p| PortSpec::new(p.name(), PortRole::Request, PortArity::Single))
                .collect(),
            Self::Interrupts(_) => vec![PortSpec::new(
                core_ports::INTERRUPT,
                PortRole::Request,
                PortArity::Single,
            )],
            Self::Cache(_) | Self::Monitor(_) => CACHE_PORTS.to_vec(),
            Self::Crossbar(_) => CROSSBAR_PORTS.to_vec(),
            Self::Checker(_) => Vec::new(),
            Self::External(_) => vec![PortSpec::new(
                ports::PORT,
                PortRole::Response,
                PortArity::Single,
            )],
        }
    }

    /// The component as something a core port can attach to.
    pub fn as_core_facing(&self) -> Option<&dyn CoreFacing> {
        match self {
            Self::Cache(cache) => Some(cache),
            Self::Monitor(monitor) => Some(monitor),
            Self::External(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// The component as a cache.
    pub fn as_cache(&self) -> Option<&CacheLevel> {
        match self {
            Self::Cache(cache) => Some(cache),
            _ => None,
        }
    }

    /// The component as a crossbar.
    pub fn as_crossbar(&self) -> Option<&Crossbar> {
        match self {
            Self::Crossbar(xbar) => Some(xbar),
            _ => None,
        }
    }

    /// The component as a core.
    pub fn as_core(&self) -> Option<&Core> {
        match self {
            Self::Core(core) => Some(core),
            _ => None,
        }
    }
}

/// A registered component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique path (e.g. `cpu[0].icache`, `l2[1]`, `membus`).
    pub path: String,
    /// The component.
    pub component: Component,
}

/// One side of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    /// Component.
    pub node: NodeId,
    /// Port name.
    pub port: &'static str,
    /// Slot within a vector port; 0 for single ports.
    pub index: usize,
}

/// A request port bound to a response port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Connection {
    /// Requesting side.
    pub request: Endpoint,
    /// Responding side.
    pub response: Endpoint,
}

/// Arena of components plus their connections.
#[derive(Debug, Clone, Default)]
pub struct ObjectGraph {
    nodes: Vec<Node>,
    by_path: HashMap<String, NodeId>,
    connections: Vec<Connection>,
    /// Connections bound so far, per port.
    port_use: HashMap<PortRef, usize>,
}

impl ObjectGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component under a unique path.
    ///
    /// # Errors
    ///
    /// [`BuildError::DuplicateComponent`] if `path` is taken.
    pub fn add(&mut self, path: impl Into<String>, component: Component) -> BuildResult<NodeId> {
        let path = path.into();
        if self.by_path.contains_key(&path) {
            return Err(BuildError::DuplicateComponent(path));
        }
        let id = NodeId(self.nodes.len());
        trace!(path = %path, kind = component.type_name(), "add component");
        let _ = self.by_path.insert(path.clone(), id);
        self.nodes.push(Node { path, component });
        Ok(id)
    }

    /// Returns the component registered as `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different graph and is out of range.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Looks up a component by path.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    /// Iterates over components in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no component is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All connections in the order they were made.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Connections bound to `port`.
    pub fn links(&self, port: PortRef) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| {
            (c.request.node == port.node && c.request.port == port.port)
                || (c.response.node == port.node && c.response.port == port.port)
        })
    }

    /// Components on the other side of every connection bound to `port`.
    pub fn peers(&self, port: PortRef) -> Vec<NodeId> {
        self.links(port)
            .map(|c| {
                if c.request.node == port.node && c.request.port == port.port {
                    c.response.node
                } else {
                    c.request.node
                }
            })
            .collect()
    }

    /// The port on the other side of a single port, if connected.
    pub fn peer(&self, port: PortRef) -> Option<PortRef> {
        self.links(port).next().map(|c| {
            let other = if c.request.node == port.node && c.request.port == port.port {
                c.response
            } else {
                c.request
            };
            other.node.port(other.port)
        })
    }

    /// Renders `path.port` for a port.
    pub fn describe(&self, port: PortRef) -> String {
        format!("{}.{}", self.node(port.node).path, port.port)
    }

    /// Renders a connection as `request -> response`, with vector slots in brackets.
    pub fn describe_connection(&self, connection: &Connection) -> String {
        let side = |e: &Endpoint| {
            let node = self.node(e.node);
            let vector = node
                .component
                .ports()
                .iter()
                .any(|p| p.name == e.port && p.arity == PortArity::Vector);
            if vector {
                format!("{}.{}[{}]", node.path, e.port, e.index)
            } else {
                format!("{}.{}", node.path, e.port)
            }
        };
        format!("{} -> {}", side(&connection.request), side(&connection.response))
    }

    /// Binds a request port to a response port.
    ///
    /// Vector ports receive the next free slot.
    ///
    /// # Errors
    ///
    /// * [`BuildError::UnknownPort`] if either component lacks the named port.
    /// * [`BuildError::PortRoleMismatch`] unless `request` issues and `response` accepts.
    /// * [`BuildError::PortAlreadyConnected`] if a single port is already bound.
    pub fn connect(&mut self, request: PortRef, response: PortRef) -> BuildResult<()> {
        let req_spec = self.port_spec(request)?;
        let resp_spec = self.port_spec(response)?;
        if req_spec.role != PortRole::Request || resp_spec.role != PortRole::Response {
            return Err(BuildError::PortRoleMismatch {
                from: self.describe(request),
                to: self.describe(response),
            });
        }

        let req_index = self.claim(request, req_spec)?;
        let resp_index = self.claim(response, resp_spec)?;
        *self.port_use.entry(request).or_default() += 1;
        *self.port_use.entry(response).or_default() += 1;

        trace!(
            from = %self.describe(request),
            to = %self.describe(response),
            "connect"
        );
        self.connections.push(Connection {
            request: Endpoint {
                node: request.node,
                port: request.port,
                index: req_index,
            },
            response: Endpoint {
                node: response.node,
                port: response.port,
                index: resp_index,
            },
        });
        Ok(())
    }

    /// Checks that every single port of every component is bound exactly once.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnwiredPort`] naming the first dangling port.
    pub fn ensure_fully_wired(&self) -> BuildResult<()> {
        for (id, node) in self.nodes() {
            for spec in node.component.ports() {
                if spec.arity == PortArity::Single && self.use_count(id.port(spec.name)) != 1 {
                    return Err(BuildError::UnwiredPort {
                        path: node.path.clone(),
                        port: spec.name,
                    });
                }
            }
        }
        Ok(())
    }

    fn port_spec(&self, port: PortRef) -> BuildResult<PortSpec> {
        let node = self.node(port.node);
        node.component
            .ports()
            .into_iter()
            .find(|p| p.name == port.port)
            .ok_or_else(|| BuildError::UnknownPort {
                path: node.path.clone(),
                port: port.port.to_string(),
            })
    }

    /// Number of connections bound to `port`.
    pub fn use_count(&self, port: PortRef) -> usize {
        self.port_use.get(&port).copied().unwrap_or(0)
    }

    /// Returns the slot `port` takes for one more connection.
    fn claim(&self, port: PortRef, spec: PortSpec) -> BuildResult<usize> {
        let used = self.use_count(port);
        if spec.arity == PortArity::Single && used > 0 {
            return Err(BuildError::PortAlreadyConnected {
                path: self.node(port.node).path.clone(),
                port: spec.name,
            });
        }
        Ok(used)
    }
}

impl fmt::Display for ObjectGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, node) in self.nodes() {
            writeln!(f, "{:<28} {}", node.path, node.component.type_name())?;
        }
        for connection in &self.connections {
            writeln!(f, "  {}", self.describe_connection(connection))?;
        }
        Ok(())
    }
}
