//! # External Memory System Tests
//!
//! Proxy naming contract, port remapping through `CoreFacing`, and wiring when the
//! caches live outside the builder.

use memsys_core::common::{AddrRange, TargetIsa};
use memsys_core::config::CacheLevelOptions;
use memsys_core::core::CorePort;
use memsys_core::core::model::L1_DCACHE;
use memsys_core::core::units::cache::{CacheLevel, CacheScope};
use memsys_core::soc::HierarchyShape;
use memsys_core::soc::external::{ExternalCacheFactory, ExternalRole, proxy_name};
use memsys_core::soc::graph::Component;
use memsys_core::soc::memcheck::ConsistencyMonitor;
use memsys_core::soc::traits::CoreFacing;
use memsys_core::TopologyOptions;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{build, external, peer_of, upstream_of};

#[rstest]
#[case(0, ExternalRole::ICache, "cpu0.icache")]
#[case(3, ExternalRole::DCache, "cpu3.dcache")]
#[case(12, ExternalRole::ItbWalkerCache, "cpu12.itb_walker_cache")]
#[case(1, ExternalRole::DtbWalkerCache, "cpu1.dtb_walker_cache")]
#[case(2, ExternalRole::SiblingDCache, "cpu2.dcache_sibling")]
fn test_proxy_names(#[case] core: usize, #[case] role: ExternalRole, #[case] name: &str) {
    assert_eq!(proxy_name(core, role), name);
}

#[test]
fn test_factory_proxy() {
    let factory = ExternalCacheFactory::new("ruby");
    let proxy = factory.for_core(1, ExternalRole::DCache);
    assert_eq!(proxy.port_data, "cpu1.dcache");
    assert_eq!(proxy.port_type, "ruby");
    assert_eq!(proxy.addr_ranges, vec![AddrRange::all_memory()]);
    assert_eq!(factory.port_type(), "ruby");
}

#[test]
fn test_role_from_core_port() {
    assert_eq!(ExternalRole::from(CorePort::Fetch), ExternalRole::ICache);
    assert_eq!(ExternalRole::from(CorePort::DataWalk), ExternalRole::DtbWalkerCache);
    assert_eq!(ExternalRole::from(CorePort::SiblingFetch), ExternalRole::SiblingICache);
}

#[test]
fn test_core_facing_port_remap() {
    let proxy = ExternalCacheFactory::new("ruby").make("cpu0.icache");
    assert_eq!(proxy.core_port(), "port");
    assert_eq!(proxy.mem_port(), None);

    let cache = CacheLevel::new(
        &L1_DCACHE,
        &CacheLevelOptions::default(),
        CacheScope::Private { core: 0 },
    );
    assert_eq!(cache.core_port(), "cpu_side");
    assert_eq!(cache.mem_port(), Some("mem_side"));

    let facing: &dyn CoreFacing = &proxy;
    assert_eq!(facing.core_port(), "port");
}

#[test]
fn test_monitor_is_core_facing() {
    let system = build(&TopologyOptions {
        memchecker: true,
        ..crate::common::private_l1(1, TargetIsa::Sparc)
    });
    let Some(Component::Monitor(monitor)) = system.get("cpu[0].dcache_mon") else {
        panic!("monitor missing");
    };
    let monitor: ConsistencyMonitor = *monitor;
    assert_eq!(monitor.core_port(), "cpu_side");
    assert_eq!(monitor.mem_port(), Some("mem_side"));
}

#[test]
fn test_external_with_hw_walker() {
    let system = build(&external(2, TargetIsa::Riscv));
    assert_eq!(system.shape(), HierarchyShape::External);
    assert_eq!(system.stats().external_proxies, 8);
    assert_eq!(system.stats().total_caches(), 0);

    for (port, role) in [
        ("icache_port", "icache"),
        ("dcache_port", "dcache"),
        ("itb_walker_port", "itb_walker_cache"),
        ("dtb_walker_port", "dtb_walker_cache"),
    ] {
        let path = format!("cpu[1].{role}");
        assert_eq!(peer_of(&system, "cpu[1]", port), Some(path.as_str()));
        let Some(Component::External(proxy)) = system.get(&path) else {
            panic!("{path} is not a proxy");
        };
        assert_eq!(proxy.port_data, format!("cpu1.{role}"));
        assert_eq!(proxy.port_type, "ruby");
    }
    assert_eq!(
        upstream_of(&system, "membus"),
        vec!["cpu[0].interrupts", "cpu[1].interrupts"]
    );
}

#[test]
fn test_external_without_hw_walker() {
    let system = build(&external(1, TargetIsa::Power));
    assert_eq!(system.stats().external_proxies, 2);
    assert!(system.get("cpu[0].itb_walker_cache").is_none());
}

#[test]
fn test_external_with_smt() {
    let options = TopologyOptions {
        smt: true,
        ..external(1, TargetIsa::Sparc)
    };
    let system = build(&options);
    assert_eq!(
        peer_of(&system, "cpu[0]", "icache_port_sibling"),
        Some("cpu[0].icache_sibling")
    );
    let Some(Component::External(proxy)) = system.get("cpu[0].dcache_sibling") else {
        panic!("sibling proxy missing");
    };
    assert_eq!(proxy.port_data, "cpu0.dcache_sibling");
}
