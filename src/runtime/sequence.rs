//! The sequence library: lazy transformers and eager collectors.
//!
//! Lazy transformers return a [`Value::LazySeq`] immediately and do no work
//! until it is observed. Each realization step produces one cons cell whose
//! tail is the next lazy step, so walking a transformed seq never recurses.

use crate::error::Result;
use crate::value::Value;

use super::Runtime;

/// A fallible iterator over any seqable value.
///
/// Created by [`Runtime::iter`]. Yields `Err` once and then stops when the
/// traversal fails.
#[derive(Debug)]
pub struct Iter<'a> {
    runtime: &'a Runtime,
    pending: Value,
    done: bool,
}

impl Iterator for Iter<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.runtime.uncons(&self.pending) {
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

impl Runtime {
    /// Returns an iterator over the elements of `coll`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::prelude::*;
    ///
    /// let runtime = Runtime::new();
    /// let range = Value::range(0, 3, 1).unwrap();
    /// let items: Vec<Value> = runtime.iter(&range).collect::<Result<_>>().unwrap();
    /// assert_eq!(items, vec![Value::from(0), Value::from(1), Value::from(2)]);
    /// ```
    #[must_use]
    pub fn iter(&self, coll: &Value) -> Iter<'_> {
        Iter {
            runtime: self,
            pending: coll.clone(),
            done: false,
        }
    }

    /// Lazily applies `function` to every element of `coll`.
    #[must_use]
    pub fn map(&self, function: &Value, coll: &Value) -> Value {
        let runtime = self.clone();
        let function = function.clone();
        let coll = coll.clone();
        Value::lazy_seq(move || {
            Ok(match runtime.uncons(&coll)? {
                None => Value::Nil,
                Some((head, tail)) => {
                    let mapped = runtime.invoke(&function, &[head])?;
                    Value::cons(mapped, runtime.map(&function, &tail))
                }
            })
        })
    }

    /// Lazily keeps the elements of `coll` for which `predicate` is truthy.
    #[must_use]
    pub fn filter(&self, predicate: &Value, coll: &Value) -> Value {
        let runtime = self.clone();
        let predicate = predicate.clone();
        let mut pending = coll.clone();
        Value::lazy_seq(move || {
            while let Some((head, tail)) = runtime.uncons(&pending)? {
                if runtime.invoke(&predicate, std::slice::from_ref(&head))?.is_truthy() {
                    return Ok(Value::cons(head, runtime.filter(&predicate, &tail)));
                }
                pending = tail;
            }
            Ok(Value::Nil)
        })
    }

    /// Lazily takes at most `count` elements of `coll`.
    #[must_use]
    pub fn take(&self, count: usize, coll: &Value) -> Value {
        let runtime = self.clone();
        let coll = coll.clone();
        Value::lazy_seq(move || {
            if count == 0 {
                return Ok(Value::Nil);
            }
            Ok(match runtime.uncons(&coll)? {
                None => Value::Nil,
                Some((head, tail)) => Value::cons(head, runtime.take(count - 1, &tail)),
            })
        })
    }

    /// Lazily skips the first `count` elements of `coll`.
    #[must_use]
    pub fn drop(&self, count: usize, coll: &Value) -> Value {
        let runtime = self.clone();
        let mut pending = coll.clone();
        Value::lazy_seq(move || {
            for _ in 0..count {
                match runtime.uncons(&pending)? {
                    None => return Ok(Value::Nil),
                    Some((_, tail)) => pending = tail,
                }
            }
            runtime.seq(&pending)
        })
    }

    /// Lazily chains `colls` end to end.
    #[must_use]
    pub fn concat(&self, colls: &[Value]) -> Value {
        let runtime = self.clone();
        let mut colls = colls.to_vec();
        Value::lazy_seq(move || {
            while !colls.is_empty() {
                if let Some((head, tail)) = runtime.uncons(&colls[0])? {
                    colls[0] = tail;
                    return Ok(Value::cons(head, runtime.concat(&colls)));
                }
                colls.remove(0);
            }
            Ok(Value::Nil)
        })
    }

    /// Returns the infinite seq `seed, f(seed), f(f(seed)), ...`.
    ///
    /// Each application of `function` happens when its element is first
    /// observed.
    #[must_use]
    pub fn iterate(&self, function: &Value, seed: Value) -> Value {
        let runtime = self.clone();
        let function = function.clone();
        let current = seed.clone();
        let tail = Value::lazy_seq(move || {
            let following = runtime.invoke(&function, &[current])?;
            Ok(runtime.iterate(&function, following))
        });
        Value::cons(seed, tail)
    }

    /// Conjoins every element of `from` onto `to`.
    ///
    /// # Errors
    ///
    /// Propagates traversal and conj errors.
    pub fn into(&self, to: &Value, from: &Value) -> Result<Value> {
        self.iter(from).try_fold(to.clone(), |grown, element| {
            self.conj(&grown, &[element?])
        })
    }

    /// Returns the elements of `coll` as a list in reverse order.
    ///
    /// # Errors
    ///
    /// Propagates traversal errors.
    pub fn reverse(&self, coll: &Value) -> Result<Value> {
        self.iter(coll)
            .try_fold(Value::empty_list(), |reversed, element| {
                Ok(self.cons(element?, &reversed))
            })
    }

    /// Returns a seq of the keys of a map, or nil when it is empty.
    ///
    /// # Errors
    ///
    /// Fails when `map` does not seq into `[key value]` entries.
    pub fn keys(&self, map: &Value) -> Result<Value> {
        self.entry_parts(map, 0)
    }

    /// Returns a seq of the values of a map, or nil when it is empty.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::keys`].
    pub fn vals(&self, map: &Value) -> Result<Value> {
        self.entry_parts(map, 1)
    }

    fn entry_parts(&self, map: &Value, index: i64) -> Result<Value> {
        let parts = self
            .iter(map)
            .map(|entry| self.nth(&entry?, index))
            .collect::<Result<Vec<_>>>()?;
        self.seq(&Value::vector(parts))
    }

    /// Collects the elements of `coll`.
    ///
    /// # Errors
    ///
    /// Propagates traversal errors.
    pub fn to_vec(&self, coll: &Value) -> Result<Vec<Value>> {
        self.iter(coll).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn increment() -> Value {
        Value::function("inc", |_, args| {
            Ok(Value::from(args[0].as_integer().unwrap_or_default() + 1))
        })
    }

    #[rstest]
    fn test_take_of_iterate_is_finite() {
        let runtime = Runtime::new();
        let naturals = runtime.iterate(&increment(), Value::from(0));
        let first_three = runtime.take(3, &naturals);
        assert_eq!(
            runtime.to_vec(&first_three).unwrap(),
            vec![Value::from(0), Value::from(1), Value::from(2)]
        );
    }

    #[rstest]
    fn test_drop_past_end_is_empty() {
        let runtime = Runtime::new();
        let dropped = runtime.drop(5, &Value::vector([Value::from(1)]));
        assert!(runtime.seq(&dropped).unwrap().is_nil());
    }

    #[rstest]
    fn test_concat_skips_empty_parts() {
        let runtime = Runtime::new();
        let joined = runtime.concat(&[
            Value::empty_vector(),
            Value::list([Value::from(1)]),
            Value::Nil,
            Value::vector([Value::from(2)]),
        ]);
        assert_eq!(joined, Value::list([Value::from(1), Value::from(2)]));
    }

    #[rstest]
    fn test_reverse_builds_a_list() {
        let runtime = Runtime::new();
        let reversed = runtime.reverse(&Value::range(0, 3, 1).unwrap()).unwrap();
        assert!(matches!(reversed, Value::List(_)));
        assert_eq!(reversed, Value::list([2, 1, 0].map(Value::from)));
    }
}
