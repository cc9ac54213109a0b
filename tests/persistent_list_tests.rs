//! Unit tests for PersistentList.

use persistent_runtime::equality::{Equiv, HashCode, hash_ordered};
use persistent_runtime::error::RuntimeError;
use persistent_runtime::persistent::PersistentList;
use rstest::rstest;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_new_creates_empty_list() {
    let list: PersistentList<i64> = PersistentList::new();
    assert!(list.is_empty());
    assert_eq!(list.len(), 0);
    assert_eq!(list.peek(), None);
}

#[rstest]
fn test_from_iter_preserves_order() {
    let list: PersistentList<i64> = (1..=3).collect();
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

// =============================================================================
// Cons, peek and pop
// =============================================================================

#[rstest]
fn test_cons_shares_the_original() {
    let list: PersistentList<i64> = (2..=3).collect();
    let extended = list.cons(1);
    assert_eq!(extended.len(), 3);
    assert_eq!(list.len(), 2);
    assert!(extended.tail().ptr_eq(&list));
}

#[rstest]
fn test_pop_removes_head() {
    let list: PersistentList<i64> = (1..=3).collect();
    let popped = list.pop().unwrap();
    assert_eq!(popped.peek(), Some(&2));
    assert_eq!(list.peek(), Some(&1));
}

#[rstest]
fn test_pop_of_empty_list_fails() {
    let list: PersistentList<i64> = PersistentList::new();
    assert_eq!(
        list.pop().unwrap_err(),
        RuntimeError::EmptyCollection { type_name: "list" }
    );
}

#[rstest]
#[case(0, Some(10))]
#[case(2, Some(30))]
#[case(3, None)]
fn test_get(#[case] index: usize, #[case] expected: Option<i64>) {
    let list: PersistentList<i64> = [10, 20, 30].into_iter().collect();
    assert_eq!(list.get(index).copied(), expected);
}

#[rstest]
fn test_reverse() {
    let list: PersistentList<i64> = (1..=4).collect();
    assert_eq!(list.reverse().iter().copied().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
}

// =============================================================================
// Equality and hashing
// =============================================================================

#[rstest]
fn test_equiv_is_elementwise() {
    let left: PersistentList<i64> = (1..=3).collect();
    let right = PersistentList::new().cons(3).cons(2).cons(1);
    assert!(left.equiv(&right));
    assert!(!left.equiv(&right.tail()));
}

#[rstest]
fn test_hash_is_ordered_fold() {
    let list: PersistentList<i64> = (1..=3).collect();
    assert_eq!(list.hash_code(), hash_ordered([1_i64, 2, 3].iter().map(HashCode::hash_code)));
    assert_eq!(PersistentList::<i64>::new().hash_code(), 0);
}

#[rstest]
fn test_long_list_drops_without_overflow() {
    let list: PersistentList<i64> = (0..500_000).collect();
    assert_eq!(list.len(), 500_000);
    drop(list);
}
