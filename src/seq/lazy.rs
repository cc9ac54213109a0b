//! Memoizing lazy sequences.
//!
//! A [`LazySeq`] wraps a producer that runs at most once. The first
//! observer runs it; concurrent first observers block until the result is
//! stored and then share it. The result is cached whether it is a value or
//! an error, so a failing producer fails the same way on every observation.
//!
//! # Re-entry
//!
//! A producer that realizes its own lazy seq deadlocks. Producers built by
//! the runtime only ever refer to the seqs that follow them.

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::error::Result;
use crate::value::Value;

type Producer = Box<dyn FnOnce() -> Result<Value> + Send>;

/// A seq whose contents are computed on first observation.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use persistent_runtime::prelude::*;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let lazy = LazySeq::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
///     Ok(Value::list([Value::from(1)]))
/// });
///
/// assert!(!lazy.is_realized());
/// assert_eq!(lazy.realize().unwrap(), Value::list([Value::from(1)]));
/// assert_eq!(lazy.realize().unwrap(), Value::list([Value::from(1)]));
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct LazySeq {
    producer: Mutex<Option<Producer>>,
    value: OnceLock<Result<Value>>,
}

impl LazySeq {
    /// Creates a lazy seq realized by `producer`.
    ///
    /// The producer returns any seqable value; nil stands for the empty seq.
    pub fn new<F>(producer: F) -> Self
    where
        F: FnOnce() -> Result<Value> + Send + 'static,
    {
        Self {
            producer: Mutex::new(Some(Box::new(producer))),
            value: OnceLock::new(),
        }
    }

    /// Runs the producer if it has not run yet and returns its result.
    ///
    /// # Errors
    ///
    /// Returns the producer's error, on this and every later call.
    pub fn realize(&self) -> Result<Value> {
        self.value
            .get_or_init(|| {
                let producer = self.producer.lock().take();
                producer.map_or(Ok(Value::Nil), |producer| {
                    tracing::trace!("realizing lazy seq");
                    producer()
                })
            })
            .clone()
    }

    /// Returns `true` once the producer has run.
    #[must_use]
    pub fn is_realized(&self) -> bool {
        self.value.get().is_some()
    }

    pub(crate) fn into_realized(self) -> Option<Result<Value>> {
        self.value.into_inner()
    }
}

impl fmt::Debug for LazySeq {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(Ok(value)) => write!(formatter, "LazySeq({value:?})"),
            Some(Err(error)) => write!(formatter, "LazySeq(<failed: {error}>)"),
            None => formatter.write_str("LazySeq(<pending>)"),
        }
    }
}
