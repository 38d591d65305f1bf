//! # Prefetcher Tests
//!
//! Catalog lookup, null fallback for unknown identifiers, and composition.

use memsys_core::core::units::prefetch::{
    PrefetchEngine, PrefetchKind, Prefetcher, PrefetcherFactory,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("StridePrefetcher", PrefetchKind::Stride, 4)]
#[case("TaggedPrefetcher", PrefetchKind::Tagged, 2)]
#[case("BOPPrefetcher", PrefetchKind::Bop, 1)]
#[case("AMPMPrefetcher", PrefetchKind::Ampm, 1)]
#[case("DCPTPrefetcher", PrefetchKind::Dcpt, 1)]
#[case("SignaturePathPrefetcher", PrefetchKind::SignaturePath, 1)]
#[case("IndirectMemoryPrefetcher", PrefetchKind::IndirectMemory, 1)]
#[case("MlcPrefetcher", PrefetchKind::Mlc, 1)]
fn test_factory_catalog(#[case] id: &str, #[case] kind: PrefetchKind, #[case] degree: u32) {
    let prefetcher = PrefetcherFactory::create(Some(id));
    assert_eq!(
        prefetcher,
        Prefetcher::Single(PrefetchEngine {
            kind,
            degree,
            latency: 1,
        })
    );
    assert_eq!(kind.name(), id);
}

#[test]
fn test_unknown_identifier_yields_null() {
    crate::common::init_tracing();
    let prefetcher = PrefetcherFactory::create(Some("MagicPrefetcher"));
    assert!(prefetcher.is_null());
    assert!(prefetcher.engines().is_empty());
}

#[test]
fn test_absent_identifier_yields_null() {
    assert_eq!(PrefetcherFactory::create(None), Prefetcher::Null);
}

#[test]
fn test_identifiers_are_case_sensitive() {
    assert!(PrefetcherFactory::create(Some("strideprefetcher")).is_null());
}

#[test]
fn test_compose() {
    assert_eq!(PrefetcherFactory::compose(Vec::new()), Prefetcher::Null);

    let stride = PrefetchEngine::new(PrefetchKind::Stride);
    assert_eq!(
        PrefetcherFactory::compose(vec![stride]),
        Prefetcher::Single(stride)
    );

    let tagged = PrefetchEngine::new(PrefetchKind::Tagged);
    let multi = PrefetcherFactory::compose(vec![stride, tagged]);
    assert_eq!(multi.engines(), &[stride, tagged]);
}

#[test]
fn test_mlc_io_buffer_composite() {
    let prefetcher = PrefetcherFactory::mlc_io_buffer();
    let engines = prefetcher.engines();
    assert_eq!(engines.len(), 2);
    assert_eq!(engines[0].kind, PrefetchKind::Stride);
    assert_eq!(engines[0].degree, 8);
    assert_eq!(engines[0].latency, 1);
    assert_eq!(engines[1].kind, PrefetchKind::Mlc);
    assert!(matches!(prefetcher, Prefetcher::Multi(_)));
}

#[test]
fn test_display() {
    assert_eq!(Prefetcher::Null.to_string(), "NULL");
    assert_eq!(
        PrefetcherFactory::create(Some("StridePrefetcher")).to_string(),
        "StridePrefetcher(degree=4)"
    );
    assert_eq!(
        PrefetcherFactory::mlc_io_buffer().to_string(),
        "MultiPrefetcher[StridePrefetcher(degree=8), MlcPrefetcher(degree=1)]"
    );
}

#[test]
fn test_catalog_names_are_unique() {
    for kind in PrefetchKind::ALL {
        assert_eq!(PrefetchKind::from_name(kind.name()), Some(kind));
    }
}
