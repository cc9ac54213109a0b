//! Arithmetic progressions without materialized storage.
//!
//! A [`Range`] is described by `start`, an exclusive `end` and a non-zero
//! `step`. The count is computed by ceiling division and indexing computes
//! `start + n * step` directly.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::Range;
//!
//! let range = Range::new(0, 10, 3).unwrap();
//! assert_eq!(range.len(), 4);
//! assert_eq!(range.iter().collect::<Vec<_>>(), vec![0, 3, 6, 9]);
//!
//! let descending = Range::new(5, 0, -2).unwrap();
//! assert_eq!(descending.iter().collect::<Vec<_>>(), vec![5, 3, 1]);
//! ```

use std::fmt;

use crate::equality::{Equiv, HashCode, hash_integer, hash_ordered};
use crate::error::{Result, RuntimeError};

/// An arithmetic progression `start, start + step, ...` stopping before `end`.
#[derive(Clone, Copy)]
pub struct Range {
    start: i64,
    end: i64,
    step: i64,
    count: usize,
}

impl Range {
    /// Creates the range `[start, end)` with the given `step`.
    ///
    /// A step pointing away from `end` yields the empty range.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidArgument`] when `step` is zero.
    pub fn new(start: i64, end: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(RuntimeError::invalid_argument("range", "step must not be zero"));
        }
        Ok(Self {
            start,
            end,
            step,
            count: Self::count_of(start, end, step),
        })
    }

    /// Creates the ascending range `[start, end)` with step 1.
    #[must_use]
    pub fn upto(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            step: 1,
            count: Self::count_of(start, end, 1),
        }
    }

    fn count_of(start: i64, end: i64, step: i64) -> usize {
        let span = i128::from(end) - i128::from(start);
        let step = i128::from(step);
        if (step > 0 && span <= 0) || (step < 0 && span >= 0) {
            return 0;
        }
        let (span, step) = (span.abs(), step.abs());
        let count = (span + step - 1) / step;
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Returns the first element of the progression.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Returns the exclusive bound.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> i64 {
        self.end
    }

    /// Returns the step.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the range has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the element at `index`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i64> {
        if index >= self.count {
            return None;
        }
        let offset = i128::try_from(index).ok()? * i128::from(self.step);
        i64::try_from(i128::from(self.start) + offset).ok()
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] when `index >= len()`.
    pub fn nth(&self, index: usize) -> Result<i64> {
        self.get(index)
            .ok_or_else(|| RuntimeError::index_out_of_bounds(index, self.count))
    }

    /// Returns the element at `index`, or `default` when out of range.
    #[must_use]
    pub fn nth_or(&self, index: usize, default: i64) -> i64 {
        self.get(index).unwrap_or(default)
    }

    /// Returns the first element.
    #[must_use]
    pub const fn first(&self) -> Option<i64> {
        if self.count == 0 { None } else { Some(self.start) }
    }

    /// Returns the range without its first element.
    ///
    /// The rest of an empty or one-element range is empty.
    #[must_use]
    pub fn rest(&self) -> Self {
        if self.count <= 1 {
            return Self {
                start: self.end,
                end: self.end,
                step: self.step,
                count: 0,
            };
        }
        Self {
            start: self.start.wrapping_add(self.step),
            end: self.end,
            step: self.step,
            count: self.count - 1,
        }
    }

    /// Returns the last element.
    #[must_use]
    pub fn last(&self) -> Option<i64> {
        self.count.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Returns an iterator over the elements.
    #[must_use]
    pub const fn iter(&self) -> RangeIterator {
        RangeIterator {
            next: self.start,
            step: self.step,
            remaining: self.count,
        }
    }
}

/// An iterator over the elements of a [`Range`].
#[derive(Clone)]
pub struct RangeIterator {
    next: i64,
    step: i64,
    remaining: usize,
}

impl Iterator for RangeIterator {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        self.next = self.next.wrapping_add(self.step);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RangeIterator {}

impl IntoIterator for &Range {
    type Item = i64;
    type IntoIter = RangeIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.equiv(other)
    }
}

impl Eq for Range {}

impl Equiv for Range {
    fn equiv(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl HashCode for Range {
    fn hash_code(&self) -> i32 {
        hash_ordered(self.iter().map(hash_integer))
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}
