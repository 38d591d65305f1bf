//! # Configuration Tests
//!
//! Defaults, JSON deserialization, and per-level override lookup.

use std::io::Write;

use memsys_core::common::TargetIsa;
use memsys_core::config::{CacheLevelOptions, Level, TopologyOptions};
use pretty_assertions::assert_eq;

#[test]
fn test_options_default() {
    let options = TopologyOptions::default();
    assert_eq!(options.num_cpus, 1);
    assert_eq!(options.cpu_type, "TimingSimpleCPU");
    assert_eq!(options.isa, TargetIsa::Riscv);
    assert_eq!(options.cacheline_size, 64);
    assert!(!options.caches);
    assert!(!options.l2cache);
    assert!(!options.l3cache);
    assert!(!options.smt);
    assert!(!options.memchecker);
    assert!(!options.mlc_adaptive_ddio);
    assert_eq!(options.external_memory_system, None);
    assert_eq!(options.l2, CacheLevelOptions::default());
}

#[test]
fn test_empty_json_matches_default() {
    let options = TopologyOptions::from_json("{}").unwrap();
    assert_eq!(options, TopologyOptions::default());
}

#[test]
fn test_json_full_document() {
    let json = r#"{
        "num_cpus": 8,
        "cpu_type": "O3_ARM_v7a_3",
        "isa": "arm",
        "cacheline_size": 128,
        "caches": true,
        "l2cache": true,
        "l3cache": true,
        "smt": true,
        "disable_snoop_filter": true,
        "l1d": { "size": 65536, "assoc": 4 },
        "l3": { "size": 8388608, "hwp_type": "TaggedPrefetcher" }
    }"#;
    let options = TopologyOptions::from_json(json).unwrap();

    assert_eq!(options.num_cpus, 8);
    assert_eq!(options.cpu_type, "O3_ARM_v7a_3");
    assert_eq!(options.isa, TargetIsa::Arm);
    assert_eq!(options.cacheline_size, 128);
    assert!(options.caches && options.l2cache && options.l3cache);
    assert!(options.smt);
    assert!(options.disable_snoop_filter);
    assert_eq!(options.l1d.size, Some(64 * 1024));
    assert_eq!(options.l1d.assoc, Some(4));
    assert_eq!(options.l1d.hwp_type, None);
    assert_eq!(options.l3.hwp_type.as_deref(), Some("TaggedPrefetcher"));
    assert_eq!(options.l1i, CacheLevelOptions::default());
}

#[test]
fn test_json_rejects_wrong_types() {
    assert!(TopologyOptions::from_json(r#"{ "num_cpus": "four" }"#).is_err());
    assert!(TopologyOptions::from_json(r#"{ "isa": "vax" }"#).is_err());
    assert!(TopologyOptions::from_json("not json").is_err());
}

#[test]
fn test_json_external_memory_system() {
    let options =
        TopologyOptions::from_json(r#"{ "external_memory_system": "ruby" }"#).unwrap();
    assert!(options.uses_external_memory());
    assert!(!options.wants_internal_caches());
}

#[test]
fn test_wants_internal_caches() {
    let l2_only = TopologyOptions {
        l2cache: true,
        ..TopologyOptions::default()
    };
    assert!(l2_only.wants_internal_caches());
    assert!(!TopologyOptions::default().wants_internal_caches());
}

#[test]
fn test_level_lookup() {
    let options = TopologyOptions {
        l1i: CacheLevelOptions {
            size: Some(1),
            ..CacheLevelOptions::default()
        },
        l1d: CacheLevelOptions {
            size: Some(2),
            ..CacheLevelOptions::default()
        },
        l2: CacheLevelOptions {
            size: Some(3),
            ..CacheLevelOptions::default()
        },
        l3: CacheLevelOptions {
            size: Some(4),
            ..CacheLevelOptions::default()
        },
        ..TopologyOptions::default()
    };
    assert_eq!(options.level(Level::L1I).size, Some(1));
    assert_eq!(options.level(Level::L1D).size, Some(2));
    assert_eq!(options.level(Level::L2).size, Some(3));
    assert_eq!(options.level(Level::L3).size, Some(4));
}

#[test]
fn test_level_keys() {
    assert_eq!(Level::L1I.key(), "l1i");
    assert_eq!(Level::L1D.key(), "l1d");
    assert_eq!(Level::L2.key(), "l2");
    assert_eq!(Level::L3.key(), "l3");
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "num_cpus": 2, "caches": true, "l2": {{ "assoc": 4 }} }}"#
    )
    .unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    let options = TopologyOptions::from_json(&text).unwrap();
    assert_eq!(options.num_cpus, 2);
    assert!(options.caches);
    assert_eq!(options.l2.assoc, Some(4));
}

#[test]
fn test_serialize_roundtrip_preserves_overrides() {
    let options = TopologyOptions {
        num_cpus: 3,
        isa: TargetIsa::X86,
        l2cache: true,
        caches: true,
        l2: CacheLevelOptions {
            size: Some(2 * 1024 * 1024),
            assoc: Some(16),
            hwp_type: Some("BOPPrefetcher".to_string()),
        },
        ..TopologyOptions::default()
    };
    let json = serde_json::to_string(&options).unwrap();
    assert_eq!(TopologyOptions::from_json(&json).unwrap(), options);
}

#[test]
fn test_shipped_configs_build() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../configs");
    for name in ["quad_l3.json", "smt_memchecker.json", "external.json"] {
        let text = std::fs::read_to_string(dir.join(name)).unwrap();
        let options = TopologyOptions::from_json(&text).unwrap();
        let system = memsys_core::System::build(&options);
        assert!(system.is_ok(), "{name}: {:?}", system.err());
    }
}
