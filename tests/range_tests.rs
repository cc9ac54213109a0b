//! Unit tests for Range.

use persistent_runtime::equality::{Equiv, HashCode};
use persistent_runtime::error::RuntimeError;
use persistent_runtime::persistent::{PersistentVector, Range};
use rstest::rstest;

#[rstest]
#[case(0, 10, 1, 10)]
#[case(0, 10, 3, 4)]
#[case(10, 0, -2, 5)]
#[case(5, 5, 1, 0)]
#[case(0, 10, -1, 0)]
fn test_count(#[case] start: i64, #[case] end: i64, #[case] step: i64, #[case] expected: usize) {
    assert_eq!(Range::new(start, end, step).unwrap().len(), expected);
}

#[rstest]
fn test_zero_step_is_rejected() {
    assert!(matches!(
        Range::new(0, 10, 0),
        Err(RuntimeError::InvalidArgument { operation: "range", .. })
    ));
}

#[rstest]
fn test_nth_and_last() {
    let range = Range::new(10, 0, -3).unwrap();
    assert_eq!(range.nth(0), Ok(10));
    assert_eq!(range.nth(3), Ok(1));
    assert_eq!(range.last(), Some(1));
    assert_eq!(range.nth_or(4, -1), -1);
    assert!(matches!(range.nth(4), Err(RuntimeError::IndexOutOfBounds { .. })));
}

#[rstest]
fn test_rest_walks_forward() {
    let range = Range::upto(0, 3);
    let rest = range.rest();
    assert_eq!(rest.first(), Some(1));
    assert_eq!(rest.len(), 2);
    assert!(rest.rest().rest().is_empty());
}

#[rstest]
fn test_iterates_like_materialized_vector() {
    let range = Range::new(1, 8, 2).unwrap();
    let materialized: PersistentVector<i64> = range.iter().collect();
    assert_eq!(materialized.as_slice(), &[1, 3, 5, 7]);
    assert_eq!(range.hash_code(), materialized.hash_code());
}

#[rstest]
fn test_different_descriptions_of_same_elements_are_equal() {
    let exact = Range::new(0, 6, 3).unwrap();
    let overshooting = Range::new(0, 5, 3).unwrap();
    assert!(exact.equiv(&overshooting));
    assert_eq!(exact, overshooting);
}
