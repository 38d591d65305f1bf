//! # Address Range and ISA Tests

use memsys_core::common::{AddrRange, KIB, MIB, TargetIsa};
use rstest::rstest;

#[test]
fn test_addr_range_new() {
    let range = AddrRange::new(0x8000_0000, 4 * KIB);
    assert_eq!(range.start, 0x8000_0000);
    assert_eq!(range.end, 0x8000_1000);
    assert_eq!(range.size(), 4096);
    assert!(range.contains(0x8000_0fff));
    assert!(!range.contains(0x8000_1000));
    assert!(!range.contains(0x7fff_ffff));
}

#[test]
fn test_addr_range_saturates() {
    let range = AddrRange::new(u64::MAX - 10, MIB);
    assert_eq!(range.end, u64::MAX);
}

#[test]
fn test_all_memory_covers_top_of_space() {
    let all = AddrRange::all_memory();
    assert!(all.contains(0));
    assert!(all.contains(u64::MAX));
    assert_eq!(all.to_string(), "AllMemory");
}

#[test]
fn test_addr_range_display() {
    assert_eq!(AddrRange::new(0x1000, 0x100).to_string(), "[0x1000:0x1100)");
}

#[rstest]
#[case(TargetIsa::Riscv, true, true)]
#[case(TargetIsa::X86, true, true)]
#[case(TargetIsa::Arm, true, false)]
#[case(TargetIsa::Sparc, false, false)]
#[case(TargetIsa::Mips, false, false)]
#[case(TargetIsa::Power, false, false)]
fn test_isa_walker_properties(
    #[case] isa: TargetIsa,
    #[case] hw_walker: bool,
    #[case] walker_cache: bool,
) {
    assert_eq!(isa.has_hw_walker(), hw_walker);
    assert_eq!(isa.needs_walker_cache(), walker_cache);
}

#[test]
fn test_isa_display_matches_serde_name() {
    for isa in [TargetIsa::Riscv, TargetIsa::X86, TargetIsa::Arm, TargetIsa::Sparc] {
        let json = serde_json::to_string(&isa).unwrap();
        assert_eq!(json, format!("\"{isa}\""));
    }
}
