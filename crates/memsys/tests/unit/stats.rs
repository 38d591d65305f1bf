//! # Topology Statistics Tests

use std::collections::BTreeMap;

use memsys_core::common::TargetIsa;
use memsys_core::soc::HierarchyShape;
use memsys_core::TopologyOptions;
use pretty_assertions::assert_eq;

use crate::common::{build, private_l1, three_level};

#[test]
fn test_private_l1_connection_shape() {
    let stats = build(&private_l1(2, TargetIsa::Sparc)).stats();

    let expected: BTreeMap<String, usize> = [
        ("Core.dcache_port -> L1_DCache.cpu_side", 2),
        ("Core.icache_port -> L1_ICache.cpu_side", 2),
        ("Interrupts.int_port -> SystemXBar.cpu_side_ports", 2),
        ("L1_DCache.mem_side -> SystemXBar.cpu_side_ports", 2),
        ("L1_ICache.mem_side -> SystemXBar.cpu_side_ports", 2),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    assert_eq!(stats.connection_shape, expected);
    assert_eq!(stats.connections, 10);
    assert_eq!(stats.cores, 2);
    assert_eq!(stats.crossbars, 1);
    assert_eq!(stats.cache_bytes, 4 * 32 * 1024);
    assert_eq!(stats.caches_by_class.get("L1_ICache"), Some(&2));
}

#[test]
fn test_three_level_counts() {
    let stats = build(&three_level(4, TargetIsa::Riscv)).stats();
    assert_eq!(stats.shape, HierarchyShape::ThreeLevel);
    assert_eq!(stats.family, "generic");
    assert_eq!(stats.l1_caches, 8);
    assert_eq!(stats.walker_caches, 8);
    assert_eq!(stats.l2_caches, 2);
    assert_eq!(stats.l3_caches, 1);
    assert_eq!(stats.total_caches(), 19);
    // membus, tol3bus, two pair crossbars
    assert_eq!(stats.crossbars, 4);
    assert_eq!(stats.snoop_filters, 4);
    assert_eq!(stats.caches_by_class.get("L2Cache"), Some(&3));
}

#[test]
fn test_identical_options_give_equal_stats() {
    let options = TopologyOptions {
        smt: true,
        memchecker: true,
        ..three_level(5, TargetIsa::X86)
    };
    assert_eq!(build(&options).stats(), build(&options).stats());
}

#[test]
fn test_different_options_give_different_stats() {
    let a = build(&private_l1(2, TargetIsa::Riscv)).stats();
    let b = build(&private_l1(3, TargetIsa::Riscv)).stats();
    assert!(a != b);
}

#[test]
fn test_display_report() {
    let text = build(&three_level(2, TargetIsa::Riscv)).stats().to_string();
    assert!(text.contains("MEMORY HIERARCHY TOPOLOGY"));
    assert!(text.contains("ThreeLevel"));
    assert!(text.contains("L2Cache"));
    assert!(text.contains("L2Cache.mem_side -> L3XBar.cpu_side_ports"));
}

#[test]
fn test_serializes_to_json() {
    let stats = build(&private_l1(1, TargetIsa::Riscv)).stats();
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["shape"], "PrivateL1");
    assert_eq!(value["l1_caches"], 2);
    assert_eq!(value["walker_caches"], 2);
}

#[test]
fn test_cache_bytes_saturates_on_huge_levels() {
    let options = TopologyOptions {
        l1i: memsys_core::config::CacheLevelOptions {
            size: Some(u64::MAX),
            ..Default::default()
        },
        ..private_l1(2, TargetIsa::Riscv)
    };
    let stats = build(&options).stats();
    assert_eq!(stats.cache_bytes, u64::MAX);
    assert_eq!(stats.l1_caches, 4);
    assert!(stats.to_string().contains("capacity"));
}
