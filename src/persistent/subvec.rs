//! A window over a persistent vector.
//!
//! [`Subvec`] exposes `[start, end)` of a backing [`PersistentVector`]
//! without copying it. Index `i` of the window is index `start + i` of the
//! backing vector. Updates delegate to the backing vector and produce a new
//! window over the new backing vector.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::PersistentVector;
//!
//! let vector: PersistentVector<i32> = (0..10).collect();
//! let window = vector.subvec(2, 5).unwrap();
//! assert_eq!(window.len(), 3);
//! assert_eq!(window.nth(0), Ok(&2));
//!
//! let updated = window.assoc(0, 99).unwrap();
//! assert_eq!(updated.nth(0), Ok(&99));
//! assert_eq!(vector.nth(2), Ok(&2)); // Backing vector unchanged
//! ```

use std::fmt;

use super::vector::PersistentVector;
use crate::equality::{Equiv, HashCode, hash_ordered};
use crate::error::{Result, RuntimeError};

/// A `[start, end)` view over a [`PersistentVector`].
///
/// Invariant: `start <= end <= backing.len()`.
pub struct Subvec<T> {
    backing: PersistentVector<T>,
    start: usize,
    end: usize,
}

impl<T> Subvec<T> {
    /// Creates a window over `backing`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] unless
    /// `start <= end <= backing.len()`.
    pub fn new(backing: PersistentVector<T>, start: usize, end: usize) -> Result<Self> {
        if end > backing.len() {
            return Err(RuntimeError::index_out_of_bounds(end, backing.len()));
        }
        if start > end {
            return Err(RuntimeError::index_out_of_bounds(start, end));
        }
        Ok(Self {
            backing,
            start,
            end,
        })
    }

    /// Returns the number of elements in the window.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the window is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the backing vector.
    #[inline]
    #[must_use]
    pub const fn backing(&self) -> &PersistentVector<T> {
        &self.backing
    }

    /// Returns the start offset into the backing vector.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the exclusive end offset into the backing vector.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Returns the element at `index` of the window, if in range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            self.backing.get(self.start + index)
        } else {
            None
        }
    }

    /// Returns the element at `index` of the window.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] when `index >= len()`.
    pub fn nth(&self, index: usize) -> Result<&T> {
        self.get(index)
            .ok_or_else(|| RuntimeError::index_out_of_bounds(index, self.len()))
    }

    /// Returns the last element of the window.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            self.backing.get(self.end - 1)
        }
    }

    /// Returns the window's elements as a slice of the backing buffer.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.backing.as_slice()[self.start..self.end]
    }

    /// Returns an iterator over the window.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T: Clone> Subvec<T> {
    /// Replaces the element at `index`; `index == len()` appends.
    ///
    /// Appending writes through to `start + index` of the backing vector,
    /// so the window's end grows by one.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] when `index > len()`.
    pub fn assoc(&self, index: usize, element: T) -> Result<Self> {
        if index > self.len() {
            return Err(RuntimeError::index_out_of_bounds(index, self.len()));
        }
        let backing = self.backing.assoc(self.start + index, element)?;
        let end = if index == self.len() { self.end + 1 } else { self.end };
        Ok(Self {
            backing,
            start: self.start,
            end,
        })
    }

    /// Appends an element to the window.
    ///
    /// # Errors
    ///
    /// Propagates [`RuntimeError::IndexOutOfBounds`] from the backing
    /// vector when the window no longer ends inside it.
    pub fn conj(&self, element: T) -> Result<Self> {
        self.assoc(self.len(), element)
    }

    /// Removes the last element of the window.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::EmptyCollection`] if the window is empty.
    pub fn pop(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(RuntimeError::EmptyCollection { type_name: "subvec" });
        }
        Ok(Self {
            backing: self.backing.clone(),
            start: self.start,
            end: self.end - 1,
        })
    }

    /// Copies the window into a standalone vector.
    #[must_use]
    pub fn to_vector(&self) -> PersistentVector<T> {
        self.as_slice().iter().cloned().collect()
    }
}

impl<T> Clone for Subvec<T> {
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: PartialEq> PartialEq for Subvec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Equiv> Equiv for Subvec<T> {
    fn equiv(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(left, right)| left.equiv(right))
    }
}

impl<T: HashCode> HashCode for Subvec<T> {
    fn hash_code(&self) -> i32 {
        hash_ordered(self.iter().map(HashCode::hash_code))
    }
}

impl<T: fmt::Debug> fmt::Debug for Subvec<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}
