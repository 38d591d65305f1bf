//! # Pairing Tests

use memsys_core::soc::CorePair;
use pretty_assertions::assert_eq;

#[test]
fn test_consecutive_even() {
    assert_eq!(
        CorePair::consecutive(4),
        vec![CorePair::new(0, 1), CorePair::new(2, 3)]
    );
}

#[test]
fn test_consecutive_odd_leaves_single() {
    assert_eq!(
        CorePair::consecutive(3),
        vec![CorePair::new(0, 1), CorePair::single(2)]
    );
    assert_eq!(CorePair::consecutive(1), vec![CorePair::single(0)]);
    assert!(CorePair::consecutive(0).is_empty());
}

#[test]
fn test_members() {
    assert_eq!(CorePair::new(4, 7).members().collect::<Vec<_>>(), vec![4, 7]);
    assert_eq!(CorePair::single(2).members().collect::<Vec<_>>(), vec![2]);
}
