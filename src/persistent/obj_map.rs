//! Small flat map with insertion ordered keys.
//!
//! [`ObjMap`] keeps a key-order array next to a host hash table. It is the
//! representation for small maps whose keys are all string-like; the value
//! layer promotes it to a [`PersistentHashMap`](super::PersistentHashMap)
//! when either condition stops holding.
//!
//! Invariant: every key of the order array has an entry in the table and
//! vice versa.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::ObjMap;
//!
//! let map = ObjMap::new().assoc("b", 2).assoc("a", 1);
//! let keys: Vec<&&str> = map.keys().collect();
//! assert_eq!(keys, vec![&"b", &"a"]); // Insertion order
//! ```

use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

use rustc_hash::FxHashMap;

use super::ReferenceCounter;
use crate::equality::{Equiv, HashCode, hash_entry, hash_unordered};

/// A persistent flat map preserving key insertion order.
///
/// Every update copies the order array and/or the table it touches.
pub struct ObjMap<K, V> {
    /// Keys in insertion order.
    keys: ReferenceCounter<Vec<K>>,
    /// Host key/value table.
    entries: ReferenceCounter<FxHashMap<K, V>>,
}

impl<K, V> ObjMap<K, V> {
    /// Creates a new empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: ReferenceCounter::new(Vec::new()),
            entries: ReferenceCounter::new(FxHashMap::default()),
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the map is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> std::slice::Iter<'_, K> {
        self.keys.iter()
    }
}

impl<K: Eq + Hash, V> ObjMap<K, V> {
    /// Returns the value for `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the entries in insertion order.
    #[must_use]
    pub fn iter(&self) -> ObjMapIterator<'_, K, V> {
        ObjMapIterator {
            keys: self.keys.iter(),
            entries: &self.entries,
        }
    }
}

impl<K: Clone + Eq + Hash, V: Clone> ObjMap<K, V> {
    /// Associates `key` with `value`; a new key goes to the end of the order.
    #[must_use]
    pub fn assoc(&self, key: K, value: V) -> Self {
        let mut entries = (*self.entries).clone();
        let keys = if entries.contains_key(&key) {
            self.keys.clone()
        } else {
            let mut keys = (*self.keys).clone();
            keys.push(key.clone());
            ReferenceCounter::new(keys)
        };
        entries.insert(key, value);
        Self {
            keys,
            entries: ReferenceCounter::new(entries),
        }
    }

    /// Removes `key`; removing an absent key returns the same map.
    #[must_use]
    pub fn dissoc(&self, key: &K) -> Self {
        if !self.entries.contains_key(key) {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        entries.remove(key);
        let keys: Vec<K> = self.keys.iter().filter(|candidate| *candidate != key).cloned().collect();
        Self {
            keys: ReferenceCounter::new(keys),
            entries: ReferenceCounter::new(entries),
        }
    }
}

impl<K, V> Clone for ObjMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            keys: self.keys.clone(),
            entries: self.entries.clone(),
        }
    }
}

/// An iterator over the entries of an [`ObjMap`] in insertion order.
pub struct ObjMapIterator<'a, K, V> {
    keys: std::slice::Iter<'a, K>,
    entries: &'a FxHashMap<K, V>,
}

impl<'a, K: Eq + Hash, V> Iterator for ObjMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        self.entries.get(key).map(|value| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<K, V> Default for ObjMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + Eq + Hash, V: Clone> FromIterator<(K, V)> for ObjMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut keys = Vec::new();
        let mut entries = FxHashMap::default();
        for (key, value) in iter {
            if entries.insert(key.clone(), value).is_none() {
                keys.push(key);
            }
        }
        Self {
            keys: ReferenceCounter::new(keys),
            entries: ReferenceCounter::new(entries),
        }
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for ObjMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, V: Equiv> Equiv for ObjMap<K, V> {
    fn equiv(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|found| found.equiv(value)))
    }
}

impl<K: Eq + Hash + HashCode, V: HashCode> HashCode for ObjMap<K, V> {
    fn hash_code(&self) -> i32 {
        hash_unordered(
            self.iter()
                .map(|(key, value)| hash_entry(key.hash_code(), value.hash_code())),
        )
    }
}

impl<K: Eq + Hash + fmt::Debug, V: fmt::Debug> fmt::Debug for ObjMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_overwrite_keeps_position_and_shares_key_order() {
        let map = ObjMap::new().assoc("a", 1).assoc("b", 2);
        let updated = map.assoc("a", 10);
        assert!(ReferenceCounter::ptr_eq(&map.keys, &updated.keys));
        let entries: Vec<(&&str, &i32)> = updated.iter().collect();
        assert_eq!(entries, vec![(&"a", &10), (&"b", &2)]);
    }

    #[rstest]
    fn test_dissoc_keeps_key_array_and_table_in_sync() {
        let map: ObjMap<&str, i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let removed = map.dissoc(&"b");
        assert_eq!(removed.keys.len(), removed.entries.len());
        assert_eq!(removed.keys().copied().collect::<Vec<_>>(), vec!["a", "c"]);
    }
}
