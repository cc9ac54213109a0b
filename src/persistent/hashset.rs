//! Persistent (immutable) hash set.
//!
//! [`PersistentHashSet`] is a [`PersistentHashMap`] from element to `()`;
//! membership is key presence.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::PersistentHashSet;
//!
//! let set = PersistentHashSet::new().conj(1).conj(2).conj(2);
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(&1));
//!
//! let smaller = set.disj(&1);
//! assert!(!smaller.contains(&1));
//! assert!(set.contains(&1)); // Original unchanged
//! ```

use std::fmt;
use std::iter::FromIterator;

use super::hashmap::{PersistentHashMap, PersistentHashMapIterator};
use crate::equality::{Equiv, HashCode, hash_unordered};

/// A persistent (immutable) hash set.
pub struct PersistentHashSet<T> {
    members: PersistentHashMap<T, ()>,
}

impl<T> PersistentHashSet<T> {
    /// Creates a new empty set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            members: PersistentHashMap::new(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns an iterator over the elements, in the map's hash order.
    #[must_use]
    pub fn iter(&self) -> PersistentHashSetIterator<'_, T> {
        PersistentHashSetIterator {
            inner: self.members.iter(),
        }
    }
}

impl<T: HashCode + Equiv> PersistentHashSet<T> {
    /// Returns `true` if `element` is a member.
    #[inline]
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.members.contains_key(element)
    }

    /// Returns the stored member equal to `element`.
    #[inline]
    #[must_use]
    pub fn get(&self, element: &T) -> Option<&T> {
        self.members.get_entry(element).map(|(member, ())| member)
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Clone + HashCode + Equiv> PersistentHashSet<T> {
    /// Adds `element`; adding a member returns an equal set.
    #[must_use]
    pub fn conj(&self, element: T) -> Self {
        if self.contains(&element) {
            return self.clone();
        }
        Self {
            members: self.members.assoc(element, ()),
        }
    }

    /// Removes `element`; removing a non-member returns the same set.
    #[must_use]
    pub fn disj(&self, element: &T) -> Self {
        Self {
            members: self.members.dissoc(element),
        }
    }
}

impl<T> Clone for PersistentHashSet<T> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
        }
    }
}

/// An iterator over the elements of a [`PersistentHashSet`].
pub struct PersistentHashSetIterator<'a, T> {
    inner: PersistentHashMapIterator<'a, T, ()>,
}

impl<'a, T> Iterator for PersistentHashSetIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(element, ())| element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for PersistentHashSetIterator<'_, T> {}

impl<T> Default for PersistentHashSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + HashCode + Equiv> FromIterator<T> for PersistentHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |set, element| set.conj(element))
    }
}

impl<'a, T> IntoIterator for &'a PersistentHashSet<T> {
    type Item = &'a T;
    type IntoIter = PersistentHashSetIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: HashCode + Equiv> PartialEq for PersistentHashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equiv(other)
    }
}

impl<T: HashCode + Equiv> Equiv for PersistentHashSet<T> {
    fn equiv(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<T: HashCode> HashCode for PersistentHashSet<T> {
    fn hash_code(&self) -> i32 {
        hash_unordered(self.iter().map(HashCode::hash_code))
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentHashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}
