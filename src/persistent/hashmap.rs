//! Persistent (immutable) hash-bucketed map.
//!
//! This module provides [`PersistentHashMap`], an immutable map from any
//! [`HashCode`] + [`Equiv`] key to a value.
//!
//! # Overview
//!
//! Keys are partitioned into buckets by their 32-bit hash code. The table
//! from hash code to bucket is ordered by hash code; each bucket is a flat
//! array of key/value pairs whose keys are pairwise distinct by
//! [`Equiv`], so hash collisions between distinct keys are resolved by a
//! linear scan of the bucket.
//!
//! An update clones the top-level table and the one bucket it touches; every
//! other bucket is shared with the previous version.
//!
//! # Iteration Order
//!
//! Entries are yielded by ascending hash code, then in bucket order. This
//! order is an artifact of the hash function and is not part of the
//! contract; it is neither insertion nor key order.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::PersistentHashMap;
//!
//! let map = PersistentHashMap::new()
//!     .assoc("one".to_string(), 1)
//!     .assoc("two".to_string(), 2);
//! assert_eq!(map.get(&"one".to_string()), Some(&1));
//!
//! let updated = map.assoc("one".to_string(), 100);
//! assert_eq!(map.get(&"one".to_string()), Some(&1));       // Original unchanged
//! assert_eq!(updated.get(&"one".to_string()), Some(&100)); // New version
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::iter::FromIterator;

use smallvec::{SmallVec, smallvec};

use super::ReferenceCounter;
use crate::equality::{Equiv, HashCode, hash_entry, hash_unordered};

/// Entries sharing one hash code. Almost every bucket holds a single entry,
/// which is stored inline.
type Entries<K, V> = SmallVec<[(K, V); 1]>;

/// A bucket: the key/value pairs whose keys share one hash code.
type Bucket<K, V> = ReferenceCounter<Entries<K, V>>;

/// A persistent (immutable) hash map.
///
/// # Time Complexity
///
/// | Operation      | Complexity                      |
/// |----------------|---------------------------------|
/// | `get`          | O(log B + bucket size)          |
/// | `assoc`        | O(B + bucket size)              |
/// | `dissoc`       | O(B + bucket size)              |
/// | `len`          | O(1)                            |
///
/// where B is the number of buckets.
pub struct PersistentHashMap<K, V> {
    /// Hash code to bucket, ordered by hash code.
    table: ReferenceCounter<BTreeMap<i32, Bucket<K, V>>>,
    /// Total number of entries across all buckets.
    length: usize,
}

impl<K, V> PersistentHashMap<K, V> {
    /// Creates a new empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: ReferenceCounter::new(BTreeMap::new()),
            length: 0,
        }
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of buckets (distinct hash codes).
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if both maps are the same version.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.table, &other.table)
    }

    /// Returns an iterator over the entries by ascending key hash.
    #[must_use]
    pub fn iter(&self) -> PersistentHashMapIterator<'_, K, V> {
        PersistentHashMapIterator {
            buckets: self.table.values(),
            current: [].iter(),
            remaining: self.length,
        }
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: HashCode + Equiv, V> PersistentHashMap<K, V> {
    /// Returns the value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::persistent::PersistentHashMap;
    ///
    /// let map = PersistentHashMap::new().assoc(1, "one");
    /// assert_eq!(map.get(&1), Some(&"one"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_entry(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.table
            .get(&key.hash_code())?
            .iter()
            .find(|(candidate, _)| candidate.equiv(key))
            .map(|(key, value)| (key, value))
    }

    /// Returns the value for `key`, or `default` when absent.
    #[inline]
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.get(key).unwrap_or(default)
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_entry(key).is_some()
    }
}

impl<K: Clone + HashCode + Equiv, V: Clone> PersistentHashMap<K, V> {
    /// Creates a map holding one entry.
    #[inline]
    #[must_use]
    pub fn singleton(key: K, value: V) -> Self {
        Self::new().assoc(key, value)
    }

    /// Associates `key` with `value`.
    ///
    /// A present key is overwritten inside the cloned bucket and the count is
    /// unchanged; an absent key is appended to its bucket.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::persistent::PersistentHashMap;
    ///
    /// let map = PersistentHashMap::new().assoc("x", 1).assoc("x", 2);
    /// assert_eq!(map.len(), 1);
    /// assert_eq!(map.get(&"x"), Some(&2));
    /// ```
    #[must_use]
    pub fn assoc(&self, key: K, value: V) -> Self {
        let hash = key.hash_code();
        let mut table = (*self.table).clone();
        let mut inserted = true;
        let bucket = match table.get(&hash) {
            Some(existing) => {
                let mut bucket: Entries<K, V> = (**existing).clone();
                if let Some(slot) = bucket.iter_mut().find(|(candidate, _)| candidate.equiv(&key)) {
                    slot.1 = value;
                    inserted = false;
                } else {
                    bucket.push((key, value));
                }
                bucket
            }
            None => smallvec![(key, value)],
        };
        table.insert(hash, ReferenceCounter::new(bucket));
        Self {
            table: ReferenceCounter::new(table),
            length: if inserted { self.length + 1 } else { self.length },
        }
    }

    /// Removes `key`.
    ///
    /// Removing an absent key returns the same version. A bucket emptied by
    /// the removal is dropped from the table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::persistent::PersistentHashMap;
    ///
    /// let map = PersistentHashMap::new().assoc("x", 1);
    /// assert!(map.dissoc(&"x").is_empty());
    /// assert!(map.dissoc(&"y").ptr_eq(&map));
    /// ```
    #[must_use]
    pub fn dissoc(&self, key: &K) -> Self {
        let hash = key.hash_code();
        let Some(existing) = self.table.get(&hash) else {
            return self.clone();
        };
        let Some(position) = existing.iter().position(|(candidate, _)| candidate.equiv(key)) else {
            return self.clone();
        };

        let mut table = (*self.table).clone();
        if existing.len() == 1 {
            table.remove(&hash);
        } else {
            let mut bucket: Entries<K, V> = (**existing).clone();
            bucket.remove(position);
            table.insert(hash, ReferenceCounter::new(bucket));
        }
        Self {
            table: ReferenceCounter::new(table),
            length: self.length - 1,
        }
    }
}

impl<K, V> Clone for PersistentHashMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            length: self.length,
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over the entries of a [`PersistentHashMap`].
pub struct PersistentHashMapIterator<'a, K, V> {
    buckets: btree_map::Values<'a, i32, Bucket<K, V>>,
    current: std::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for PersistentHashMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.current.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            self.current = self.buckets.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for PersistentHashMapIterator<'_, K, V> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for PersistentHashMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone + HashCode + Equiv, V: Clone> FromIterator<(K, V)> for PersistentHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |map, (key, value)| map.assoc(key, value))
    }
}

impl<'a, K, V> IntoIterator for &'a PersistentHashMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = PersistentHashMapIterator<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: HashCode + Equiv, V: PartialEq> PartialEq for PersistentHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: HashCode + Equiv, V: Equiv> Equiv for PersistentHashMap<K, V> {
    fn equiv(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.length == other.length
                && self
                    .iter()
                    .all(|(key, value)| other.get(key).is_some_and(|found| found.equiv(value))))
    }
}

impl<K: HashCode, V: HashCode> HashCode for PersistentHashMap<K, V> {
    fn hash_code(&self) -> i32 {
        hash_unordered(
            self.iter()
                .map(|(key, value)| hash_entry(key.hash_code(), value.hash_code())),
        )
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for PersistentHashMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K: serde::Serialize, V: serde::Serialize> serde::Serialize for PersistentHashMap<K, V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "serde")]
struct PersistentHashMapVisitor<K, V> {
    marker: std::marker::PhantomData<(K, V)>,
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for PersistentHashMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Clone + HashCode + Equiv,
    V: serde::Deserialize<'de> + Clone,
{
    type Value = PersistentHashMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = PersistentHashMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map = map.assoc(key, value);
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for PersistentHashMap<K, V>
where
    K: serde::Deserialize<'de> + Clone + HashCode + Equiv,
    V: serde::Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(PersistentHashMapVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_iteration_is_by_ascending_hash() {
        let map: PersistentHashMap<i64, &str> =
            [(30, "c"), (10, "a"), (20, "b")].into_iter().collect();
        let keys: Vec<i64> = map.keys().copied().collect();
        assert_eq!(keys, vec![10, 20, 30]);
    }

    #[rstest]
    fn test_untouched_buckets_are_shared() {
        let map: PersistentHashMap<i64, i64> = (0..4).map(|key| (key, key)).collect();
        let updated = map.assoc(0, 100);
        let original_bucket = map.table.get(&3).unwrap();
        let updated_bucket = updated.table.get(&3).unwrap();
        assert!(ReferenceCounter::ptr_eq(original_bucket, updated_bucket));
    }
}
