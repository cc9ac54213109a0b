//! Persistent (immutable) data structures.
//!
//! This module provides immutable containers whose "mutating" operations
//! return new versions and leave the original valid and unchanged:
//!
//! - [`PersistentList`]: singly linked list with O(1) cons, peek and pop
//! - [`PersistentVector`]: indexed vector backed by one contiguous buffer
//! - [`Subvec`]: a `[start, end)` window over a vector
//! - [`ObjMap`]: small flat map with insertion ordered keys
//! - [`PersistentHashMap`]: hash-bucketed map for arbitrary keys
//! - [`PersistentHashSet`]: set built on top of [`PersistentHashMap`]
//! - [`PersistentQueue`]: FIFO queue of a front list and a rear vector
//! - [`Range`]: arithmetic progression without materialized storage
//!
//! # Structural Sharing
//!
//! Lists share their tails, subvecs share their backing vector, and the
//! hashed map shares every bucket an update does not touch. The vector is
//! the deliberate exception: every update copies the whole buffer.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::persistent::{PersistentList, PersistentVector};
//!
//! let list = PersistentList::new().cons(3).cons(2).cons(1);
//! let extended = list.cons(0);
//! assert_eq!(list.len(), 3);     // Original unchanged
//! assert_eq!(extended.len(), 4); // New list
//!
//! let vector: PersistentVector<i32> = (0..10).collect();
//! let updated = vector.assoc(5, 99).unwrap();
//! assert_eq!(vector.nth(5), Ok(&5));    // Original unchanged
//! assert_eq!(updated.nth(5), Ok(&99)); // New version
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// Always `std::sync::Arc` so that containers may be shared between threads.
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

mod hashmap;
mod hashset;
mod list;
mod obj_map;
mod queue;
mod range;
mod subvec;
mod vector;

pub use hashmap::PersistentHashMap;
pub use hashmap::PersistentHashMapIterator;
pub use hashset::PersistentHashSet;
pub use hashset::PersistentHashSetIterator;
pub use list::PersistentList;
pub use list::PersistentListIntoIterator;
pub use list::PersistentListIterator;
pub use obj_map::ObjMap;
pub use obj_map::ObjMapIterator;
pub use queue::PersistentQueue;
pub use queue::PersistentQueueIterator;
pub use range::Range;
pub use range::RangeIterator;
pub use subvec::Subvec;
pub use vector::PersistentVector;
pub use vector::PersistentVectorIterator;

// =============================================================================
// Tests
// =============================================================================
