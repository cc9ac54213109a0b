//! Persistent (immutable) vector backed by a single contiguous buffer.
//!
//! This module provides [`PersistentVector`], an indexed immutable sequence.
//!
//! # Overview
//!
//! Every version wraps one shared buffer. Reads are O(1); updates (`assoc`,
//! `conj`, `pop`) clone the buffer, modify the clone and wrap it in a new
//! vector, so the original is never touched. This trades the O(log n)
//! update of a bitmapped trie for the simplest possible persistence.
//!
//! - O(1) `nth`, `peek`, `len`
//! - O(n) `assoc`, `conj`, `pop`
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::PersistentVector;
//!
//! let vector = PersistentVector::new().conj("a").conj("b");
//! assert_eq!(vector.len(), 2);
//! assert_eq!(vector.nth(1), Ok(&"b"));
//!
//! let popped = vector.pop().unwrap();
//! assert_eq!(popped.len(), 1);
//! assert_eq!(vector.len(), 2); // Original unchanged
//! ```

use std::fmt;
use std::iter::FromIterator;

use super::ReferenceCounter;
use super::subvec::Subvec;
use crate::equality::{Equiv, HashCode, hash_ordered};
use crate::error::{Result, RuntimeError};

/// A persistent (immutable) vector.
///
/// # Time Complexity
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `nth`     | O(1)       |
/// | `peek`    | O(1)       |
/// | `assoc`   | O(n)       |
/// | `conj`    | O(n)       |
/// | `pop`     | O(n)       |
/// | `subvec`  | O(1)       |
pub struct PersistentVector<T> {
    /// The shared buffer; `len()` is always its length.
    elements: ReferenceCounter<Vec<T>>,
}

impl<T> PersistentVector<T> {
    /// Creates a new empty vector.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            elements: ReferenceCounter::new(Vec::new()),
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `index`, or `None` when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] when `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// assert_eq!(vector.nth(0), Ok(&1));
    /// assert!(vector.nth(3).is_err());
    /// ```
    pub fn nth(&self, index: usize) -> Result<&T> {
        self.elements
            .get(index)
            .ok_or_else(|| RuntimeError::index_out_of_bounds(index, self.len()))
    }

    /// Returns the element at `index`, or `default` when out of range.
    #[inline]
    #[must_use]
    pub fn nth_or<'a>(&'a self, index: usize, default: &'a T) -> &'a T {
        self.elements.get(index).unwrap_or(default)
    }

    /// Returns the last element.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.elements.last()
    }

    /// Returns the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns `true` if both vectors wrap the same buffer.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.elements, &other.elements)
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentVectorIterator<'_, T> {
        PersistentVectorIterator {
            inner: self.elements.iter(),
        }
    }

    /// Returns a window `[start, end)` sharing this vector's buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] unless
    /// `start <= end <= len()`.
    pub fn subvec(&self, start: usize, end: usize) -> Result<Subvec<T>> {
        Subvec::new(self.clone(), start, end)
    }
}

impl<T: Clone> PersistentVector<T> {
    /// Creates a vector holding one element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            elements: ReferenceCounter::new(vec![element]),
        }
    }

    /// Clones the buffer, applies `update` to the clone and wraps it.
    fn with_copy<F>(&self, update: F) -> Self
    where
        F: FnOnce(&mut Vec<T>),
    {
        let mut copy = Vec::with_capacity(self.len() + 1);
        copy.extend_from_slice(&self.elements);
        update(&mut copy);
        Self {
            elements: ReferenceCounter::new(copy),
        }
    }

    /// Replaces the element at `index`; `index == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] when `index > len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::persistent::PersistentVector;
    ///
    /// let vector: PersistentVector<i32> = (1..=3).collect();
    /// let updated = vector.assoc(1, 20).unwrap();
    /// assert_eq!(updated.nth(1), Ok(&20));
    /// assert_eq!(vector.nth(1), Ok(&2));
    ///
    /// let appended = vector.assoc(3, 4).unwrap();
    /// assert_eq!(appended.len(), 4);
    /// ```
    pub fn assoc(&self, index: usize, element: T) -> Result<Self> {
        match index.cmp(&self.len()) {
            std::cmp::Ordering::Less => Ok(self.with_copy(|copy| copy[index] = element)),
            std::cmp::Ordering::Equal => Ok(self.conj(element)),
            std::cmp::Ordering::Greater => {
                Err(RuntimeError::index_out_of_bounds(index, self.len()))
            }
        }
    }

    /// Appends an element.
    #[must_use]
    pub fn conj(&self, element: T) -> Self {
        self.with_copy(|copy| copy.push(element))
    }

    /// Removes the last element.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::EmptyCollection`] if the vector is empty.
    pub fn pop(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(RuntimeError::EmptyCollection { type_name: "vector" });
        }
        Ok(self.with_copy(|copy| {
            copy.pop();
        }))
    }
}

impl<T> Clone for PersistentVector<T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentVector`].
pub struct PersistentVectorIterator<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for PersistentVectorIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for PersistentVectorIterator<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for PersistentVectorIterator<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for PersistentVector<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentVector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: ReferenceCounter::new(iter.into_iter().collect()),
        }
    }
}

impl<T> From<Vec<T>> for PersistentVector<T> {
    fn from(elements: Vec<T>) -> Self {
        Self {
            elements: ReferenceCounter::new(elements),
        }
    }
}

impl<'a, T> IntoIterator for &'a PersistentVector<T> {
    type Item = &'a T;
    type IntoIter = PersistentVectorIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentVector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq> Eq for PersistentVector<T> {}

impl<T: Equiv> Equiv for PersistentVector<T> {
    fn equiv(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.len() == other.len()
                && self.iter().zip(other.iter()).all(|(left, right)| left.equiv(right)))
    }
}

impl<T: HashCode> HashCode for PersistentVector<T> {
    fn hash_code(&self) -> i32 {
        hash_ordered(self.iter().map(HashCode::hash_code))
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentVector<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentVector<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for PersistentVector<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}
