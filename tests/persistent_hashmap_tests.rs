//! Unit tests for PersistentHashMap, including forced hash collisions.

use persistent_runtime::equality::{Equiv, HashCode, hash_entry, hash_unordered};
use persistent_runtime::persistent::PersistentHashMap;
use persistent_runtime::prelude::{Runtime, Value};
use rstest::rstest;

/// A key whose hash is chosen by the test, so distinct keys can collide.
#[derive(Debug, Clone)]
struct Colliding {
    name: &'static str,
    hash: i32,
}

impl Colliding {
    const fn new(name: &'static str, hash: i32) -> Self {
        Self { name, hash }
    }
}

impl Equiv for Colliding {
    fn equiv(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl HashCode for Colliding {
    fn hash_code(&self) -> i32 {
        self.hash
    }
}

// =============================================================================
// Basic operations
// =============================================================================

#[rstest]
fn test_assoc_and_get() {
    let map = PersistentHashMap::new().assoc("a", 1).assoc("b", 2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"a"), Some(&1));
    assert_eq!(map.get(&"c"), None);
    assert_eq!(map.get_or(&"c", &0), &0);
}

#[rstest]
fn test_overwrite_keeps_count_and_original() {
    let original = PersistentHashMap::new().assoc("a", 1);
    let updated = original.assoc("a", 2);
    assert_eq!(updated.len(), 1);
    assert_eq!(updated.get(&"a"), Some(&2));
    assert_eq!(original.get(&"a"), Some(&1));
}

#[rstest]
fn test_dissoc_of_absent_key_is_same_map() {
    let map = PersistentHashMap::new().assoc("a", 1);
    let unchanged = map.dissoc(&"z");
    assert!(unchanged.ptr_eq(&map));
    assert!(map.dissoc(&"a").is_empty());
}

#[rstest]
fn test_contains_key() {
    let map = PersistentHashMap::singleton(7_i64, "seven");
    assert!(map.contains_key(&7));
    assert!(!map.contains_key(&8));
}

// =============================================================================
// Collisions
// =============================================================================

#[rstest]
fn test_colliding_keys_share_a_bucket() {
    let map = PersistentHashMap::new()
        .assoc(Colliding::new("left", 42), 1)
        .assoc(Colliding::new("right", 42), 2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.bucket_count(), 1);
    assert_eq!(map.get(&Colliding::new("left", 42)), Some(&1));
    assert_eq!(map.get(&Colliding::new("right", 42)), Some(&2));
}

#[rstest]
fn test_dissoc_inside_colliding_bucket_keeps_neighbour() {
    let map = PersistentHashMap::new()
        .assoc(Colliding::new("left", 42), 1)
        .assoc(Colliding::new("right", 42), 2);
    let removed = map.dissoc(&Colliding::new("left", 42));
    assert_eq!(removed.len(), 1);
    assert_eq!(removed.get(&Colliding::new("right", 42)), Some(&2));
    assert_eq!(map.len(), 2);
}

#[rstest]
fn test_overwrite_inside_colliding_bucket() {
    let map = PersistentHashMap::new()
        .assoc(Colliding::new("left", 42), 1)
        .assoc(Colliding::new("right", 42), 2)
        .assoc(Colliding::new("right", 42), 3);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&Colliding::new("right", 42)), Some(&3));
}

// =============================================================================
// Iteration, equality and hashing
// =============================================================================

#[rstest]
fn test_iteration_visits_ascending_hashes() {
    let map: PersistentHashMap<i64, i64> = [(30, 0), (10, 0), (20, 0)].into_iter().collect();
    let keys: Vec<i64> = map.keys().copied().collect();
    assert_eq!(keys, vec![10, 20, 30]);
}

#[rstest]
fn test_equality_ignores_insertion_order() {
    let forward = PersistentHashMap::new().assoc("a", 1).assoc("b", 2);
    let backward = PersistentHashMap::new().assoc("b", 2).assoc("a", 1);
    assert!(forward.equiv(&backward));
    assert_eq!(forward.hash_code(), backward.hash_code());
    assert!(!forward.equiv(&backward.assoc("b", 3)));
}

#[rstest]
fn test_hash_is_sum_of_entry_hashes() {
    let map = PersistentHashMap::new().assoc(1_i64, 2_i64).assoc(3, 4);
    let expected = hash_unordered([hash_entry(1, 2), hash_entry(3, 4)]);
    assert_eq!(map.hash_code(), expected);
}

// =============================================================================
// Through the runtime
// =============================================================================

#[rstest]
fn test_runtime_get_or_on_hash_map_value() {
    let runtime = Runtime::new();
    let map = runtime
        .assoc(&Value::empty_hash_map(), Value::keyword("x"), Value::from(1))
        .unwrap();
    assert!(matches!(map, Value::HashMap(_)));
    assert_eq!(runtime.get(&map, &Value::keyword("x")).unwrap(), Value::from(1));
    assert_eq!(
        runtime
            .get_or(&map, &Value::keyword("y"), Value::keyword("not-found"))
            .unwrap(),
        Value::keyword("not-found")
    );
    assert_eq!(runtime.count(&map).unwrap(), 1);
    assert_eq!(runtime.count(&Value::empty_hash_map()).unwrap(), 0);
}
