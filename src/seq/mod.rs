//! The sequence abstraction.
//!
//! A seq is a forward-only traversal view. Every seqable value converts to
//! one of the seq representations with [`seq`]:
//!
//! - lists and ranges are their own seqs
//! - [`Cons`] cells prepend one element to another seq in O(1)
//! - [`IndexedSeq`] walks a slice of a vector; vectors, subvecs, maps, sets,
//!   queues, strings and bytes seq through it
//! - [`LazySeq`] defers the computation of its seq until first observed
//!
//! # Invariants
//!
//! - `seq` of an empty collection is [`Value::Nil`], uniformly
//! - `first` of an empty seq is nil
//! - `rest` of a seq with at most one element is the empty list, never nil
//!
//! The functions in this module are the intrinsic behaviour of the built-in
//! types. The [`Runtime`](crate::runtime::Runtime) uses them as its native
//! implementations and adds protocol dispatch for user objects on top.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::prelude::*;
//! use persistent_runtime::seq;
//!
//! let vector = Value::vector([Value::from(1), Value::from(2)]);
//! let items: Result<Vec<Value>> = seq::SeqIter::new(vector).collect();
//! assert_eq!(items.unwrap(), vec![Value::from(1), Value::from(2)]);
//!
//! assert!(seq::seq(&Value::empty_vector()).unwrap().is_nil());
//! assert_eq!(seq::rest(&Value::vector([Value::from(1)])).unwrap(), Value::empty_list());
//! ```

mod lazy;

pub use lazy::LazySeq;

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, RuntimeError};
use crate::persistent::PersistentVector;
use crate::protocol::Operation;
use crate::value::{Value, map};

// =============================================================================
// Cons
// =============================================================================

/// A seq cell holding one element in front of another seq.
pub struct Cons {
    first: Value,
    rest: Value,
}

impl Cons {
    /// Creates a cell of `first` in front of `rest`.
    ///
    /// `rest` is any seqable value; nil stands for the empty seq.
    #[must_use]
    pub const fn new(first: Value, rest: Value) -> Self {
        Self { first, rest }
    }

    /// Returns the first element.
    #[must_use]
    pub const fn first(&self) -> &Value {
        &self.first
    }

    /// Returns the seqable value following the first element.
    #[must_use]
    pub const fn rest(&self) -> &Value {
        &self.rest
    }
}

impl Drop for Cons {
    // Unlinks long chains iteratively; recursive drops of a deep chain would
    // exhaust the stack.
    fn drop(&mut self) {
        let mut next = std::mem::take(&mut self.rest);
        loop {
            next = match next {
                Value::Cons(cell) => match Arc::into_inner(cell) {
                    Some(mut cell) => std::mem::take(&mut cell.rest),
                    None => break,
                },
                Value::LazySeq(lazy) => match Arc::into_inner(lazy).and_then(LazySeq::into_realized) {
                    Some(Ok(realized)) => realized,
                    _ => break,
                },
                _ => break,
            };
        }
    }
}

impl fmt::Debug for Cons {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Cons({:?}, {:?})", self.first, self.rest)
    }
}

// =============================================================================
// IndexedSeq
// =============================================================================

/// A seq over the elements `start..end` of a vector.
///
/// Stepping produces a new `IndexedSeq` sharing the same buffer.
#[derive(Clone)]
pub struct IndexedSeq {
    elements: PersistentVector<Value>,
    start: usize,
    end: usize,
}

impl IndexedSeq {
    /// Creates a seq over `elements[start..end]`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] unless
    /// `start <= end <= elements.len()`.
    pub fn new(elements: PersistentVector<Value>, start: usize, end: usize) -> Result<Self> {
        if end > elements.len() {
            return Err(RuntimeError::index_out_of_bounds(end, elements.len()));
        }
        if start > end {
            return Err(RuntimeError::index_out_of_bounds(start, end));
        }
        Ok(Self {
            elements,
            start,
            end,
        })
    }

    fn whole(elements: PersistentVector<Value>) -> Self {
        let end = elements.len();
        Self {
            elements,
            start: 0,
            end,
        }
    }

    /// Returns the number of remaining elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if no elements remain.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the remaining elements.
    #[must_use]
    pub fn as_slice(&self) -> &[Value] {
        &self.elements.as_slice()[self.start..self.end]
    }

    /// Returns the first remaining element.
    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.as_slice().first()
    }

    /// Returns the remaining element at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.as_slice().get(index)
    }

    /// Returns the seq without its first element, or `None` when that is empty.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        (self.len() > 1).then(|| Self {
            elements: self.elements.clone(),
            start: self.start + 1,
            end: self.end,
        })
    }
}

impl fmt::Debug for IndexedSeq {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.as_slice()).finish()
    }
}

// =============================================================================
// Intrinsic seq operations
// =============================================================================

fn indexed(elements: PersistentVector<Value>) -> Value {
    if elements.is_empty() {
        Value::Nil
    } else {
        Value::IndexedSeq(IndexedSeq::whole(elements))
    }
}

/// Returns the seq view of a built-in seqable value, or nil when empty.
///
/// # Errors
///
/// Returns [`RuntimeError::MissingImplementation`] for values that are not
/// seqable without protocol dispatch, and propagates lazy realization
/// failures.
pub fn seq(value: &Value) -> Result<Value> {
    let mut current = value.unannotated().clone();
    loop {
        current = match current {
            Value::LazySeq(lazy) => lazy.realize()?,
            Value::Nil => return Ok(Value::Nil),
            Value::List(ref list) if list.is_empty() => return Ok(Value::Nil),
            Value::Range(range) if range.is_empty() => return Ok(Value::Nil),
            Value::IndexedSeq(ref indexed) if indexed.is_empty() => return Ok(Value::Nil),
            Value::List(_) | Value::Range(_) | Value::Cons(_) | Value::IndexedSeq(_) => {
                return Ok(current);
            }
            Value::Vector(vector) => return Ok(indexed(vector)),
            Value::Subvec(subvec) => {
                if subvec.is_empty() {
                    return Ok(Value::Nil);
                }
                return IndexedSeq::new(subvec.backing().clone(), subvec.start(), subvec.end())
                    .map(Value::IndexedSeq);
            }
            Value::ObjMap(_) | Value::HashMap(_) => {
                return Ok(indexed(
                    map::entries(&current)
                        .map(|(key, value)| Value::vector([key, value.clone()]))
                        .collect(),
                ));
            }
            Value::Set(set) => return Ok(indexed(set.iter().cloned().collect())),
            Value::Queue(queue) => return Ok(indexed(queue.iter().cloned().collect())),
            Value::String(text) => {
                return Ok(indexed(
                    text.chars()
                        .map(|character| Value::String(Arc::from(character.to_string())))
                        .collect(),
                ));
            }
            Value::Bytes(bytes) => {
                return Ok(indexed(
                    bytes.iter().map(|byte| Value::Integer(i64::from(*byte))).collect(),
                ));
            }
            Value::Annotated(annotated) => annotated.value().clone(),
            other => return Err(RuntimeError::missing(Operation::Seq, other.type_name())),
        };
    }
}

/// Splits a built-in seqable into its first element and the rest.
///
/// Returns `None` when the seqable is empty. The rest is a seqable value
/// (possibly nil for the tail of a cons cell).
///
/// # Errors
///
/// Same as [`seq`].
pub fn uncons(value: &Value) -> Result<Option<(Value, Value)>> {
    Ok(match seq(value)? {
        Value::List(list) => list
            .uncons()
            .map(|(head, tail)| (head.clone(), Value::List(tail))),
        Value::Cons(cell) => Some((cell.first.clone(), cell.rest.clone())),
        Value::IndexedSeq(indexed) => indexed.first().cloned().map(|head| {
            let tail = indexed
                .next()
                .map_or_else(Value::empty_list, Value::IndexedSeq);
            (head, tail)
        }),
        Value::Range(range) => range
            .first()
            .map(|head| (Value::Integer(head), Value::Range(range.rest()))),
        _ => None,
    })
}

/// Returns the first element of a built-in seqable, or nil when empty.
///
/// # Errors
///
/// Same as [`seq`].
pub fn first(value: &Value) -> Result<Value> {
    Ok(uncons(value)?.map_or(Value::Nil, |(head, _)| head))
}

/// Returns everything after the first element; never nil.
///
/// # Errors
///
/// Same as [`seq`].
pub fn rest(value: &Value) -> Result<Value> {
    Ok(match uncons(value)? {
        Some((_, Value::Nil)) | None => Value::empty_list(),
        Some((_, Value::Range(range))) if range.is_empty() => Value::empty_list(),
        Some((_, tail)) => tail,
    })
}

// =============================================================================
// SeqIter
// =============================================================================

/// A fallible iterator over the elements of a built-in seqable value.
///
/// Yields `Err` once and then stops when a lazy seq fails to realize.
pub struct SeqIter {
    pending: Value,
    done: bool,
}

impl SeqIter {
    /// Creates an iterator over `value`.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self {
            pending: value,
            done: false,
        }
    }
}

impl Iterator for SeqIter {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match uncons(&self.pending) {
            Ok(Some((head, tail))) => {
                self.pending = tail;
                Some(Ok(head))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}
