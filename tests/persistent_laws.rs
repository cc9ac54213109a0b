//! Property-based tests for persistence and the equality/hash contract.

use persistent_runtime::equality::{Equiv, HashCode};
use persistent_runtime::persistent::{PersistentHashMap, PersistentVector};
use persistent_runtime::prelude::{Runtime, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1000_i32..1000).prop_map(|n| Value::from(f64::from(n))),
        "[a-z]{0,6}".prop_map(|text| Value::string(&text)),
        "[a-z]{1,6}".prop_map(|text| Value::keyword(&text)),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::vector),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::list),
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::set),
            prop::collection::vec((inner.clone(), inner), 0..6).prop_map(Value::map),
        ]
    })
}

// =============================================================================
// Persistence
// =============================================================================

proptest! {
    /// Updating a vector never changes the version it was derived from.
    #[test]
    fn prop_vector_assoc_leaves_original(
        elements in prop::collection::vec(any::<i32>(), 1..50),
        index in any::<prop::sample::Index>(),
        replacement in any::<i32>(),
    ) {
        let vector: PersistentVector<i32> = elements.iter().copied().collect();
        let position = index.index(vector.len());
        let updated = vector.assoc(position, replacement).unwrap();

        prop_assert_eq!(vector.as_slice(), elements.as_slice());
        prop_assert_eq!(updated.get(position), Some(&replacement));
        for other in (0..vector.len()).filter(|other| *other != position) {
            prop_assert_eq!(updated.get(other), vector.get(other));
        }
    }

    /// conj then pop restores an equal vector.
    #[test]
    fn prop_vector_conj_pop_inverse(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        extra in any::<i32>(),
    ) {
        let vector: PersistentVector<i32> = elements.into_iter().collect();
        let grown = vector.conj(extra);
        prop_assert_eq!(grown.peek(), Some(&extra));
        prop_assert_eq!(grown.pop().unwrap(), vector);
    }

    /// Associating the same key and value twice is the same as once.
    #[test]
    fn prop_hashmap_assoc_idempotent(
        entries in prop::collection::vec((any::<i64>(), any::<i64>()), 0..40),
        key in any::<i64>(),
        value in any::<i64>(),
    ) {
        let map: PersistentHashMap<i64, i64> = entries.into_iter().collect();
        let once = map.assoc(key, value);
        let twice = once.assoc(key, value);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.get(&key), Some(&value));
    }

    /// dissoc removes exactly one key and leaves the source intact.
    #[test]
    fn prop_hashmap_dissoc(
        entries in prop::collection::vec((0_i64..20, any::<i64>()), 1..40),
        key in 0_i64..20,
    ) {
        let map: PersistentHashMap<i64, i64> = entries.into_iter().collect();
        let removed = map.dissoc(&key);
        prop_assert!(!removed.contains_key(&key));
        prop_assert_eq!(removed.len() + usize::from(map.contains_key(&key)), map.len());
        for (other, found) in &removed {
            prop_assert_eq!(map.get(other), Some(found));
        }
    }
}

// =============================================================================
// Equality & Hashing
// =============================================================================

proptest! {
    /// Every value is equivalent to itself and hashes consistently.
    #[test]
    fn prop_equiv_reflexive(value in arb_value()) {
        prop_assert!(value.equiv(&value.clone()));
        prop_assert_eq!(value.hash_code(), value.clone().hash_code());
    }

    /// Equivalent values have equal hash codes.
    #[test]
    fn prop_equiv_implies_equal_hash(left in arb_value(), right in arb_value()) {
        if left.equiv(&right) {
            prop_assert_eq!(left.hash_code(), right.hash_code());
        }
    }

    /// A vector, the list of the same elements and a lazy copy are all
    /// equal and hash alike.
    #[test]
    fn prop_sequential_representations_agree(
        elements in prop::collection::vec(arb_value(), 0..8),
    ) {
        let runtime = Runtime::new();
        let vector = Value::vector(elements.clone());
        let list = Value::list(elements);
        let lazy = runtime.map(&Value::function("identity", |_, args| Ok(args[0].clone())), &vector);

        prop_assert!(runtime.equiv(&vector, &list).unwrap());
        prop_assert!(runtime.equiv(&list, &lazy).unwrap());
        prop_assert_eq!(vector.hash_code(), list.hash_code());
        prop_assert_eq!(list.hash_code(), lazy.hash_code());
    }

    /// The runtime's Hash operation agrees with the intrinsic hash.
    #[test]
    fn prop_runtime_hash_matches_intrinsic(value in arb_value()) {
        prop_assert_eq!(Runtime::new().hash(&value).unwrap(), value.hash_code());
    }
}
