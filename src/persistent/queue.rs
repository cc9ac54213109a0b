//! Persistent (immutable) FIFO queue.
//!
//! [`PersistentQueue`] is a pair of a `front` list and a `rear` vector. The
//! logical order is the front (in list order) followed by the rear (in
//! vector order).
//!
//! - `conj` pushes onto the rear; into an empty queue it becomes the front.
//! - `pop` drops the front head; when the front runs out, the rear becomes
//!   the new front and the rear resets to empty.
//! - `pop` of an empty queue returns the empty queue.
//!
//! Invariant: the front is empty only when the whole queue is empty, so
//! `peek` is always the front head.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::PersistentQueue;
//!
//! let queue = PersistentQueue::new().conj(1).conj(2).conj(3);
//! assert_eq!(queue.peek(), Some(&1));
//!
//! let queue = queue.pop();
//! assert_eq!(queue.peek(), Some(&2));
//! assert_eq!(queue.len(), 2);
//! ```

use std::fmt;
use std::iter::FromIterator;

use super::list::{PersistentList, PersistentListIterator};
use super::vector::{PersistentVector, PersistentVectorIterator};
use crate::equality::{Equiv, HashCode, hash_ordered};

/// A persistent FIFO queue.
///
/// # Time Complexity
///
/// | Operation | Complexity            |
/// |-----------|-----------------------|
/// | `peek`    | O(1)                  |
/// | `conj`    | O(rear)               |
/// | `pop`     | O(1), O(rear) on turn |
pub struct PersistentQueue<T> {
    front: PersistentList<T>,
    rear: PersistentVector<T>,
    count: usize,
}

impl<T> PersistentQueue<T> {
    /// Creates a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            front: PersistentList::new(),
            rear: PersistentVector::new(),
            count: 0,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the queue is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the oldest element.
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<&T> {
        self.front.head()
    }

    /// Returns the front list.
    #[inline]
    #[must_use]
    pub const fn front(&self) -> &PersistentList<T> {
        &self.front
    }

    /// Returns the rear vector.
    #[inline]
    #[must_use]
    pub const fn rear(&self) -> &PersistentVector<T> {
        &self.rear
    }

    /// Returns an iterator from the oldest to the newest element.
    #[must_use]
    pub fn iter(&self) -> PersistentQueueIterator<'_, T> {
        PersistentQueueIterator {
            front: self.front.iter(),
            rear: self.rear.iter(),
        }
    }
}

impl<T: Clone> PersistentQueue<T> {
    /// Enqueues `element` at the back.
    #[must_use]
    pub fn conj(&self, element: T) -> Self {
        if self.front.is_empty() {
            Self {
                front: PersistentList::singleton(element),
                rear: PersistentVector::new(),
                count: self.count + 1,
            }
        } else {
            Self {
                front: self.front.clone(),
                rear: self.rear.conj(element),
                count: self.count + 1,
            }
        }
    }

    /// Dequeues the oldest element.
    ///
    /// Popping an empty queue returns the empty queue.
    #[must_use]
    pub fn pop(&self) -> Self {
        if self.front.is_empty() {
            return self.clone();
        }
        if self.front.len() > 1 {
            return Self {
                front: self.front.tail(),
                rear: self.rear.clone(),
                count: self.count - 1,
            };
        }
        Self {
            front: self.rear.iter().cloned().collect(),
            rear: PersistentVector::new(),
            count: self.count - 1,
        }
    }
}

impl<T> Clone for PersistentQueue<T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            rear: self.rear.clone(),
            count: self.count,
        }
    }
}

/// An iterator over a [`PersistentQueue`] in FIFO order.
pub struct PersistentQueueIterator<'a, T> {
    front: PersistentListIterator<'a, T>,
    rear: PersistentVectorIterator<'a, T>,
}

impl<'a, T> Iterator for PersistentQueueIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.front.next().or_else(|| self.rear.next())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.front.len() + self.rear.len();
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for PersistentQueueIterator<'_, T> {}

impl<T> Default for PersistentQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> FromIterator<T> for PersistentQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |queue, element| queue.conj(element))
    }
}

impl<T: PartialEq> PartialEq for PersistentQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl<T: Equiv> Equiv for PersistentQueue<T> {
    fn equiv(&self, other: &Self) -> bool {
        self.count == other.count
            && self.iter().zip(other.iter()).all(|(left, right)| left.equiv(right))
    }
}

impl<T: HashCode> HashCode for PersistentQueue<T> {
    fn hash_code(&self) -> i32 {
        hash_ordered(self.iter().map(HashCode::hash_code))
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentQueue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_first_conj_goes_to_front_without_rear() {
        let queue = PersistentQueue::new().conj(1);
        assert_eq!(queue.front().len(), 1);
        assert!(queue.rear().is_empty());
    }

    #[rstest]
    fn test_pop_of_last_front_element_turns_rear_into_front() {
        let queue: PersistentQueue<i32> = (1..=3).collect();
        assert_eq!(queue.front().len(), 1);
        assert_eq!(queue.rear().len(), 2);

        let popped = queue.pop();
        assert_eq!(popped.front().iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert!(popped.rear().is_empty());
    }
}
