//! # Core Model Resolution Tests
//!
//! Family selection, walker-class rules, SMT sibling classes, and build-time
//! availability of the reference designs.

use memsys_core::BuildError;
use memsys_core::common::TargetIsa;
use memsys_core::core::model::{
    HPI_L2, L1_DCACHE, L1_ICACHE, L2_CACHE, O3_ARM_V7A_L2, O3_ARM_V7A_WALK_CACHE,
    PAGE_TABLE_WALKER_CACHE,
};
use memsys_core::core::units::prefetch::PrefetchKind;
use memsys_core::core::{CoreModelResolver, ReferenceDesign};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn all_designs() -> CoreModelResolver {
    CoreModelResolver::with_reference_designs(&[ReferenceDesign::O3ArmV7a, ReferenceDesign::Hpi])
}

#[rstest]
#[case(TargetIsa::Riscv, true)]
#[case(TargetIsa::X86, true)]
#[case(TargetIsa::Arm, false)]
#[case(TargetIsa::Sparc, false)]
fn test_generic_family_walker_depends_on_isa(#[case] isa: TargetIsa, #[case] walker: bool) {
    let family = all_designs()
        .resolve("TimingSimpleCPU", false, isa)
        .unwrap();
    assert_eq!(family.name, "generic");
    assert_eq!(family.icache, L1_ICACHE);
    assert_eq!(family.dcache, L1_DCACHE);
    assert_eq!(family.l2, L2_CACHE);
    assert_eq!(family.walker.is_some(), walker);
    if walker {
        assert_eq!(family.walker, Some(PAGE_TABLE_WALKER_CACHE));
    }
}

#[test]
fn test_unknown_model_falls_back_to_generic() {
    let family = all_designs()
        .resolve("DerivO3CPU", false, TargetIsa::Riscv)
        .unwrap();
    assert_eq!(family.name, "generic");
}

#[test]
fn test_o3_arm_family() {
    let family = all_designs()
        .resolve("O3_ARM_v7a_3", false, TargetIsa::Sparc)
        .unwrap();
    assert_eq!(family.name, "O3_ARM_v7a_3");
    assert_eq!(family.icache.name, "O3_ARM_v7a_ICache");
    assert_eq!(family.dcache.name, "O3_ARM_v7a_DCache");
    assert_eq!(family.l2, O3_ARM_V7A_L2);
    // Reference families carry their walker class regardless of ISA.
    assert_eq!(family.walker, Some(O3_ARM_V7A_WALK_CACHE));

    let prefetcher = family.l2.prefetcher.unwrap();
    assert_eq!(prefetcher.kind, PrefetchKind::Stride);
    assert_eq!(prefetcher.degree, 8);
    assert_eq!(prefetcher.latency, 1);
}

#[test]
fn test_hpi_family() {
    let family = all_designs().resolve("HPI", false, TargetIsa::Arm).unwrap();
    assert_eq!(family.name, "HPI");
    assert_eq!(family.l2, HPI_L2);
    assert_eq!(family.l2.response_latency, 5);
    assert_eq!(family.dcache.assoc, 4);
    assert_eq!(family.walker.map(|c| c.name), Some("HPI_WalkCache"));
}

#[test]
fn test_smt_adds_sibling_classes() {
    let family = all_designs().resolve("HPI", true, TargetIsa::Arm).unwrap();
    let sibling = family.sibling.unwrap();
    assert_eq!(sibling.icache, family.icache);
    assert_eq!(sibling.dcache, family.dcache);

    let family = all_designs()
        .resolve("HPI", false, TargetIsa::Arm)
        .unwrap();
    assert!(family.sibling.is_none());
}

#[rstest]
#[case("O3_ARM_v7a_3", "o3-arm-v7a")]
#[case("HPI", "hpi")]
fn test_unavailable_design_is_an_error(#[case] model: &str, #[case] feature: &str) {
    let resolver = CoreModelResolver::with_reference_designs(&[]);
    let err = resolver.resolve(model, false, TargetIsa::Arm).unwrap_err();
    assert_eq!(
        err,
        BuildError::ModelUnavailable {
            model: model.to_string(),
            hint: format!("rebuild with the `{feature}` feature enabled"),
        }
    );
    assert!(!err.is_defect());
}

#[test]
fn test_unavailable_design_does_not_affect_generic() {
    let resolver = CoreModelResolver::with_reference_designs(&[]);
    assert!(resolver.resolve("TimingSimpleCPU", false, TargetIsa::X86).is_ok());
}

#[test]
fn test_reference_design_ids() {
    for design in [ReferenceDesign::O3ArmV7a, ReferenceDesign::Hpi] {
        assert_eq!(ReferenceDesign::from_model_id(design.model_id()), Some(design));
    }
    assert_eq!(ReferenceDesign::from_model_id("AtomicSimpleCPU"), None);
}

#[test]
fn test_default_build_includes_reference_designs() {
    let resolver = CoreModelResolver::new();
    assert!(resolver.is_available(ReferenceDesign::O3ArmV7a));
    assert!(resolver.is_available(ReferenceDesign::Hpi));
}
