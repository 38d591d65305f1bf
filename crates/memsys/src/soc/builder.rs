//! Memory-hierarchy construction and the top-level `System` type.
//!
//! This module turns validated options into a wired object graph. It performs:
//! 1. **Validation:** Rejects forbidden option combinations and malformed core/pairing
//!    inputs before any component exists.
//! 2. **Resolution:** Picks the cache family for the configured core model.
//! 3. **System levels:** Creates the memory bus, the consistency checker, and the L3 with
//!    its crossbar, each exactly once.
//! 4. **Per-pair levels:** Walks the sibling pairing and builds each member's L1 position
//!    (caches, walker caches, monitors, or external proxies) plus the pair crossbar and L2.
//! 5. **Wiring:** Hands the layout to [`PortWirer`] and verifies no port is left dangling.

use tracing::{debug, info, warn};

use crate::common::BuildResult;
use crate::config::{CacheLevelOptions, TopologyOptions};
use crate::core::cpu::{Core, CorePort, InterruptController};
use crate::core::model::{CacheFamily, CoreModelResolver};
use crate::core::units::cache::{CacheClass, CacheLevel, CacheScope};
use crate::core::units::prefetch::PrefetcherFactory;
use crate::soc::external::{ExternalCacheFactory, ExternalRole};
use crate::soc::graph::{Component, Node, NodeId, ObjectGraph, PortRef};
use crate::soc::interconnect::Crossbar;
use crate::soc::layout::{CoreNodes, HierarchyLayout, HierarchyShape, L1Slot, PairNodes};
use crate::soc::memcheck::{ConsistencyChecker, ConsistencyMonitor};
use crate::soc::pairing::CorePair;
use crate::soc::validate::TopologyValidator;
use crate::soc::wiring::PortWirer;
use crate::stats::TopologyStats;

/// Creates the cores implied by `options`: `num_cpus` cores of the configured ISA, each
/// with a sibling thread when SMT is enabled.
pub fn default_cores(options: &TopologyOptions) -> Vec<Core> {
    (0..options.num_cpus)
        .map(|index| {
            let core = Core::new(index, options.isa);
            if options.smt { core.with_smt() } else { core }
        })
        .collect()
}

/// Builds a [`System`] from options, cores, and an explicit pairing.
#[derive(Debug, Clone)]
pub struct HierarchyBuilder<'a> {
    options: &'a TopologyOptions,
    resolver: CoreModelResolver,
}

impl<'a> HierarchyBuilder<'a> {
    /// Creates a builder resolving core models against the designs compiled in.
    pub fn new(options: &'a TopologyOptions) -> Self {
        Self {
            options,
            resolver: CoreModelResolver::new(),
        }
    }

    /// Replaces the core-model resolver.
    pub fn with_resolver(mut self, resolver: CoreModelResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Builds and wires the hierarchy.
    ///
    /// # Arguments
    ///
    /// * `cores` - One core per configured CPU, in index order.
    /// * `pairs` - Sibling pairing covering every core exactly once.
    ///
    /// # Returns
    ///
    /// The fully wired system. On error nothing is returned; no partial graph escapes.
    ///
    /// # Errors
    ///
    /// Any [`BuildError`](crate::common::BuildError) from validation, model resolution, or
    /// wiring.
    pub fn build(&self, cores: &[Core], pairs: &[CorePair]) -> BuildResult<System> {
        let options = self.options;
        TopologyValidator::validate(options)?;
        TopologyValidator::validate_cores(options, cores, pairs)?;

        let family = self
            .resolver
            .resolve(&options.cpu_type, options.smt, options.isa)?;
        let shape = HierarchyShape::select(options);
        info!(
            shape = ?shape,
            cores = cores.len(),
            pairs = pairs.len(),
            family = family.name,
            "building memory hierarchy"
        );
        if options.mlc_adaptive_ddio && !shape.has_l2() {
            warn!("mlc_adaptive_ddio has no effect without an L2 level");
        }

        let mut assembly = Assembly {
            options,
            family,
            shape,
            graph: ObjectGraph::new(),
        };
        let layout = assembly.populate(cores, pairs)?;

        let mut graph = assembly.graph;
        PortWirer::new(shape).wire(&mut graph, &layout)?;
        graph.ensure_fully_wired()?;
        debug!(
            components = graph.len(),
            connections = graph.connections().len(),
            "hierarchy wired"
        );

        Ok(System {
            graph,
            layout,
            shape,
            family: family.name,
            cache_line_size: options.cacheline_size,
            options: options.clone(),
        })
    }
}

/// Construction state shared by the population steps.
struct Assembly<'a> {
    options: &'a TopologyOptions,
    family: CacheFamily,
    shape: HierarchyShape,
    graph: ObjectGraph,
}

impl Assembly<'_> {
    fn populate(&mut self, cores: &[Core], pairs: &[CorePair]) -> BuildResult<HierarchyLayout> {
        let options = self.options;
        let family = self.family;
        let membus = self.graph.add("membus", Component::Crossbar(Crossbar::membus()))?;
        let memchecker = if options.memchecker {
            Some(
                self.graph
                    .add("memchecker", Component::Checker(ConsistencyChecker))?,
            )
        } else {
            None
        };

        let (tol3bus, l3) = if self.shape == HierarchyShape::ThreeLevel {
            let bus = Crossbar::l3(!options.disable_snoop_filter);
            let tol3bus = self.graph.add("tol3bus", Component::Crossbar(bus))?;
            let l3 = self.add_cache("l3".to_string(), &family.l2, &options.l3, CacheScope::System)?;
            (Some(tol3bus), Some(l3))
        } else {
            (None, None)
        };

        let mut core_nodes = Vec::with_capacity(cores.len());
        for core in cores {
            let node = self.graph.add(core.path(), Component::Core(*core))?;
            let interrupts = self.graph.add(
                core.child_path("interrupts"),
                Component::Interrupts(InterruptController {
                    core: core.index,
                    isa: core.isa,
                }),
            )?;
            core_nodes.push(CoreNodes {
                core: node,
                interrupts,
                pair: 0,
                slots: Vec::new(),
            });
        }

        let external = options
            .external_memory_system
            .as_deref()
            .map(ExternalCacheFactory::new);

        let mut pair_nodes = Vec::with_capacity(pairs.len());
        for (p, pair) in pairs.iter().enumerate() {
            for member in pair.members() {
                let core = &cores[member];
                let slots = match &external {
                    Some(factory) => self.external_slots(core, factory)?,
                    None if options.caches => self.l1_slots(core, memchecker)?,
                    None => Vec::new(),
                };
                let entry = &mut core_nodes[member];
                entry.pair = p;
                entry.slots = slots;
            }
            pair_nodes.push(self.pair_level(p, *pair)?);
        }

        Ok(HierarchyLayout {
            cores: core_nodes,
            pairs: pair_nodes,
            membus,
            tol3bus,
            l3,
            memchecker,
        })
    }

    /// Private caches of one core, in core-port order.
    fn l1_slots(&mut self, core: &Core, memchecker: Option<NodeId>) -> BuildResult<Vec<L1Slot>> {
        let options = self.options;
        let family = self.family;
        let scope = CacheScope::Private { core: core.index };
        let mut slots = Vec::new();

        for port in core.cached_ports() {
            // `None` options mark a walker cache, which keeps its class defaults.
            let (name, class, opts) = match port {
                CorePort::Fetch => ("icache", Some(family.icache), Some(&options.l1i)),
                CorePort::Data => ("dcache", Some(family.dcache), Some(&options.l1d)),
                CorePort::SiblingFetch => (
                    "icache_sibling",
                    family.sibling.map(|s| s.icache),
                    Some(&options.l1i),
                ),
                CorePort::SiblingData => (
                    "dcache_sibling",
                    family.sibling.map(|s| s.dcache),
                    Some(&options.l1d),
                ),
                CorePort::InstWalk => ("itb_walker_cache", family.walker, None),
                CorePort::DataWalk => ("dtb_walker_cache", family.walker, None),
            };
            // No class means the port is wired straight to the next level.
            let Some(class) = class else {
                continue;
            };

            let path = core.child_path(name);
            let cache = match opts {
                Some(opts) => self.add_cache(path, &class, opts, scope)?,
                None => {
                    let cache = CacheLevel::walker(&class, core.index);
                    debug!(path = %path, class = cache.class, "walker cache");
                    self.graph.add(path, Component::Cache(cache))?
                }
            };

            let slot = match (port, memchecker) {
                (CorePort::Data | CorePort::SiblingData, Some(checker)) => {
                    let monitor = self.graph.add(
                        core.child_path(&format!("{name}_mon")),
                        Component::Monitor(ConsistencyMonitor::new(checker, cache)),
                    )?;
                    L1Slot {
                        port,
                        front: monitor,
                        back: cache,
                    }
                }
                _ => L1Slot::direct(port, cache),
            };
            slots.push(slot);
        }
        Ok(slots)
    }

    /// External proxies of one core, one per cacheable core port.
    fn external_slots(
        &mut self,
        core: &Core,
        factory: &ExternalCacheFactory,
    ) -> BuildResult<Vec<L1Slot>> {
        core.cached_ports()
            .into_iter()
            .map(|port| {
                let role = ExternalRole::from(port);
                let proxy = factory.for_core(core.index, role);
                debug!(proxy = %proxy.port_data, port_type = factory.port_type(), "external proxy");
                let node = self
                    .graph
                    .add(core.child_path(role.suffix()), Component::External(proxy))?;
                Ok(L1Slot::direct(port, node))
            })
            .collect()
    }

    /// Pair crossbar and L2, when the shape has an L2 level.
    fn pair_level(&mut self, p: usize, pair: CorePair) -> BuildResult<PairNodes> {
        if !self.shape.has_l2() {
            return Ok(PairNodes {
                pair,
                tol2bus: None,
                l2: None,
            });
        }

        let tol2bus = self
            .graph
            .add(format!("tol2bus[{p}]"), Component::Crossbar(Crossbar::l2()))?;
        let options = self.options;
        let mut l2 = CacheLevel::new(&self.family.l2, &options.l2, CacheScope::Pair { pair: p });
        if options.mlc_adaptive_ddio {
            l2 = l2.into_mlc(pair.primary, PrefetcherFactory::mlc_io_buffer());
        }
        debug!(
            pair = p,
            class = l2.class,
            size = l2.size,
            mlc = l2.mlc.is_some(),
            prefetcher = %l2.prefetcher,
            "pair L2"
        );
        let l2 = self.graph.add(format!("l2[{p}]"), Component::Cache(l2))?;

        Ok(PairNodes {
            pair,
            tol2bus: Some(tol2bus),
            l2: Some(l2),
        })
    }

    fn add_cache(
        &mut self,
        path: String,
        class: &CacheClass,
        opts: &CacheLevelOptions,
        scope: CacheScope,
    ) -> BuildResult<NodeId> {
        let cache = CacheLevel::new(class, opts, scope);
        debug!(
            path = %path,
            class = cache.class,
            size = cache.size,
            assoc = cache.assoc,
            scope = %cache.scope,
            "cache"
        );
        self.graph.add(path, Component::Cache(cache))
    }
}

/// A fully wired memory hierarchy.
///
/// Created once by [`HierarchyBuilder::build`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct System {
    graph: ObjectGraph,
    layout: HierarchyLayout,
    shape: HierarchyShape,
    family: &'static str,
    cache_line_size: u64,
    options: TopologyOptions,
}

impl System {
    /// Builds a system with default cores and consecutive sibling pairs.
    ///
    /// # Errors
    ///
    /// See [`HierarchyBuilder::build`].
    pub fn build(options: &TopologyOptions) -> BuildResult<Self> {
        let cores = default_cores(options);
        let pairs = CorePair::consecutive(options.num_cpus);
        HierarchyBuilder::new(options).build(&cores, &pairs)
    }

    /// The component graph.
    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    /// Role-indexed component handles.
    pub fn layout(&self) -> &HierarchyLayout {
        &self.layout
    }

    /// Hierarchy shape that was built.
    pub fn shape(&self) -> HierarchyShape {
        self.shape
    }

    /// Name of the cache family in use.
    pub fn family_name(&self) -> &'static str {
        self.family
    }

    /// System cache line size in bytes.
    pub fn cache_line_size(&self) -> u64 {
        self.cache_line_size
    }

    /// Options the system was built from.
    pub fn options(&self) -> &TopologyOptions {
        &self.options
    }

    /// Looks up a component by path.
    pub fn get(&self, path: &str) -> Option<&Component> {
        self.graph.find(path).map(|id| &self.graph.node(id).component)
    }

    /// Looks up a cache by path.
    pub fn cache(&self, path: &str) -> Option<&CacheLevel> {
        self.get(path).and_then(Component::as_cache)
    }

    /// Looks up a crossbar by path.
    pub fn crossbar(&self, path: &str) -> Option<&Crossbar> {
        self.get(path).and_then(Component::as_crossbar)
    }

    /// Core `index`.
    pub fn core(&self, index: usize) -> Option<&Core> {
        self.layout
            .cores
            .get(index)
            .and_then(|c| self.graph.node(c.core).component.as_core())
    }

    /// Number of cores.
    pub fn num_cores(&self) -> usize {
        self.layout.cores.len()
    }

    /// Pair L2s in pairing order.
    pub fn l2_caches(&self) -> Vec<&CacheLevel> {
        self.layout
            .pairs
            .iter()
            .filter_map(|p| p.l2)
            .filter_map(|id| self.graph.node(id).component.as_cache())
            .collect()
    }

    /// The system L3, if built.
    pub fn l3(&self) -> Option<&CacheLevel> {
        self.layout
            .l3
            .and_then(|id| self.graph.node(id).component.as_cache())
    }

    /// The global memory bus.
    pub fn membus(&self) -> Option<&Crossbar> {
        self.graph.node(self.layout.membus).component.as_crossbar()
    }

    /// Paths of the components connected to `path.port`, in connection order.
    pub fn peers(&self, path: &str, port: &'static str) -> Vec<&str> {
        self.graph
            .find(path)
            .map(|id| {
                self.graph
                    .peers(PortRef { node: id, port })
                    .into_iter()
                    .map(|peer| self.graph.node(peer).path.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Iterates over components in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.nodes().map(|(_, node)| node)
    }

    /// Instance counts and connection-shape summary.
    pub fn stats(&self) -> TopologyStats {
        TopologyStats::collect(self)
    }
}
