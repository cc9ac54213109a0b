//! Operations shared by the two map representations.
//!
//! A map value is either an [`ObjMap`] keyed by [`ObjKey`] or a
//! [`PersistentHashMap`] keyed by any [`Value`]. An `ObjMap` is promoted to
//! a hash map when it receives a key that is not string-like, or when an
//! insertion would grow it beyond the configured threshold. Promotion is one
//! way; a hash map never shrinks back into an `ObjMap`.

use super::{ObjKey, Value};
use crate::equality::Equiv;
use crate::persistent::{ObjMap, PersistentHashMap};

/// Looks up `key` in a map value.
pub(crate) fn lookup<'a>(map: &'a Value, key: &Value) -> Option<&'a Value> {
    match map.unannotated() {
        Value::ObjMap(map) => ObjKey::from_value(key).and_then(|key| map.get(&key)),
        Value::HashMap(map) => map.get(key),
        _ => None,
    }
}

/// Returns the entries of a map value, keys converted to values.
pub(crate) fn entries(map: &Value) -> Box<dyn Iterator<Item = (Value, &Value)> + '_> {
    match map.unannotated() {
        Value::ObjMap(map) => Box::new(map.iter().map(|(key, value)| (key.to_value(), value))),
        Value::HashMap(map) => Box::new(map.iter().map(|(key, value)| (key.clone(), value))),
        _ => Box::new(std::iter::empty()),
    }
}

/// Returns the number of entries of a map value.
pub(crate) fn len(map: &Value) -> usize {
    match map.unannotated() {
        Value::ObjMap(map) => map.len(),
        Value::HashMap(map) => map.len(),
        _ => 0,
    }
}

/// Copies every entry of `map` into a hash map.
pub(crate) fn promote(map: &ObjMap<ObjKey, Value>) -> PersistentHashMap<Value, Value> {
    map.iter()
        .map(|(key, value)| (key.to_value(), value.clone()))
        .collect()
}

/// Associates `key` with `value` in a map value (nil acts as the empty map).
pub(crate) fn assoc(map: &Value, key: Value, value: Value, threshold: usize) -> Value {
    match map.unannotated() {
        Value::HashMap(map) => Value::HashMap(map.assoc(key, value)),
        Value::ObjMap(map) => assoc_obj_map(map, key, value, threshold),
        _ => assoc_obj_map(&ObjMap::new(), key, value, threshold),
    }
}

fn assoc_obj_map(map: &ObjMap<ObjKey, Value>, key: Value, value: Value, threshold: usize) -> Value {
    match ObjKey::from_value(&key) {
        Some(obj_key) if map.contains_key(&obj_key) || map.len() < threshold => {
            Value::ObjMap(map.assoc(obj_key, value))
        }
        Some(_) => {
            tracing::debug!(count = map.len(), threshold, "promoting obj-map past threshold");
            Value::HashMap(promote(map).assoc(key, value))
        }
        None => {
            tracing::debug!(key_type = key.type_name(), "promoting obj-map for non string key");
            Value::HashMap(promote(map).assoc(key, value))
        }
    }
}

/// Removes `key` from a map value.
pub(crate) fn dissoc(map: &Value, key: &Value) -> Value {
    match map.unannotated() {
        Value::ObjMap(obj_map) => match ObjKey::from_value(key) {
            Some(key) => Value::ObjMap(obj_map.dissoc(&key)),
            None => map.unannotated().clone(),
        },
        Value::HashMap(hash_map) => Value::HashMap(hash_map.dissoc(key)),
        other => other.clone(),
    }
}

/// Structural equality of two map values of either representation.
pub(crate) fn equiv(left: &Value, right: &Value) -> bool {
    len(left) == len(right)
        && entries(left)
            .all(|(key, value)| lookup(right, &key).is_some_and(|found| found.equiv(value)))
}
