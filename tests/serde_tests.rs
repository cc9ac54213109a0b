#![cfg(feature = "serde")]

//! Serde round trips for the configuration and the generic collections.

use persistent_runtime::config::RuntimeConfig;
use persistent_runtime::persistent::{PersistentHashMap, PersistentVector};
use rstest::rstest;

#[rstest]
fn test_config_json_roundtrip() {
    let config = RuntimeConfig::default()
        .with_print_length(Some(20))
        .with_hash_map_threshold(4);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"print_length":20,"hash_map_threshold":4}"#);
    let restored: RuntimeConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

#[rstest]
fn test_config_missing_fields_take_defaults() {
    let restored: RuntimeConfig = serde_json::from_str(r#"{"print_length":3}"#).unwrap();
    assert_eq!(restored, RuntimeConfig::default().with_print_length(Some(3)));
}

#[rstest]
fn test_vector_serializes_as_array() {
    let vector: PersistentVector<i64> = (1..=3).collect();
    assert_eq!(serde_json::to_string(&vector).unwrap(), "[1,2,3]");
    let restored: PersistentVector<i64> = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(restored, vector);
}

#[rstest]
fn test_hashmap_json_roundtrip() {
    let map: PersistentHashMap<String, i64> = [("a".to_string(), 1), ("b".to_string(), 2)]
        .into_iter()
        .collect();
    let json = serde_json::to_string(&map).unwrap();
    let restored: PersistentHashMap<String, i64> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, map);
}

#[rstest]
fn test_hashmap_duplicate_keys_keep_last() {
    let restored: PersistentHashMap<String, i64> =
        serde_json::from_str(r#"{"a":1,"a":2}"#).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored.get(&"a".to_string()), Some(&2));
}
