//! A validated, watch-notified reference cell.
//!
//! An [`Atom`] holds one [`Value`] that can be replaced atomically. Updates
//! go through [`Atom::reset`], [`Atom::swap`] or [`Atom::compare_and_set`];
//! each candidate state is offered to the validator first and every watch is
//! notified after the commit, outside any lock.
//!
//! `swap` computes the new state without holding the lock and commits only
//! when no other update landed in between, retrying otherwise. The update
//! function may therefore run more than once and should be free of side
//! effects.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::equality::Equiv;
use crate::error::{Result, RuntimeError};
use crate::persistent::PersistentHashMap;
use crate::runtime::Runtime;
use crate::value::Value;

struct State {
    value: Value,
    version: u64,
}

/// A mutable reference to an immutable value.
///
/// # Examples
///
/// ```rust
/// use persistent_runtime::prelude::*;
///
/// let runtime = Runtime::new();
/// let counter = Value::atom(Value::from(0));
/// let increment = Value::function("inc", |_, args| {
///     Ok(Value::from(args[0].as_integer().unwrap_or_default() + 1))
/// });
///
/// runtime.swap(&counter, &increment, &[]).unwrap();
/// assert_eq!(runtime.deref(&counter).unwrap(), Value::from(1));
/// ```
pub struct Atom {
    state: RwLock<State>,
    validator: RwLock<Option<Value>>,
    watches: RwLock<PersistentHashMap<Value, Value>>,
}

impl Atom {
    /// Creates an atom holding `initial`, with no validator and no watches.
    #[must_use]
    pub fn new(initial: Value) -> Self {
        Self {
            state: RwLock::new(State {
                value: initial,
                version: 0,
            }),
            validator: RwLock::new(None),
            watches: RwLock::new(PersistentHashMap::new()),
        }
    }

    /// Returns the current state.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn deref(&self) -> Value {
        self.state.read().value.clone()
    }

    /// Replaces the state with `value` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ValidationRejected`] when the validator
    /// refuses `value`; the state is left unchanged. Errors raised by a
    /// watch are returned after the commit.
    pub fn reset(self: &Arc<Self>, runtime: &Runtime, value: Value) -> Result<Value> {
        self.validate(runtime, &value)?;
        let old = {
            let mut state = self.state.write();
            state.version += 1;
            std::mem::replace(&mut state.value, value.clone())
        };
        self.notify(runtime, old, value.clone())?;
        Ok(value)
    }

    /// Replaces the state with `function(state, args...)` and returns the
    /// new state.
    ///
    /// # Errors
    ///
    /// Propagates errors from `function`, and fails like [`Atom::reset`].
    pub fn swap(self: &Arc<Self>, runtime: &Runtime, function: &Value, args: &[Value]) -> Result<Value> {
        loop {
            let (current, version) = {
                let state = self.state.read();
                (state.value.clone(), state.version)
            };
            let mut call = Vec::with_capacity(args.len() + 1);
            call.push(current.clone());
            call.extend_from_slice(args);
            let next = runtime.invoke(function, &call)?;
            self.validate(runtime, &next)?;

            let committed = {
                let mut state = self.state.write();
                if state.version == version {
                    state.value = next.clone();
                    state.version += 1;
                    true
                } else {
                    false
                }
            };
            if committed {
                self.notify(runtime, current, next.clone())?;
                return Ok(next);
            }
            tracing::trace!("atom changed during swap, retrying");
        }
    }

    /// Replaces the state with `value` only if the current state is
    /// equivalent to `expected`. Returns whether the replacement happened.
    ///
    /// # Errors
    ///
    /// Fails like [`Atom::reset`].
    pub fn compare_and_set(
        self: &Arc<Self>,
        runtime: &Runtime,
        expected: &Value,
        value: Value,
    ) -> Result<bool> {
        self.validate(runtime, &value)?;
        let old = {
            let mut state = self.state.write();
            if !state.value.equiv(expected) {
                return Ok(false);
            }
            state.version += 1;
            std::mem::replace(&mut state.value, value.clone())
        };
        self.notify(runtime, old, value)?;
        Ok(true)
    }

    /// Installs `validator`, a function of one argument whose falsy result
    /// rejects a candidate state.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::ValidationRejected`] when the current state
    /// does not pass `validator`; the previous validator stays installed.
    pub fn set_validator(&self, runtime: &Runtime, validator: Value) -> Result<()> {
        check(runtime, &validator, &self.deref())?;
        *self.validator.write() = Some(validator);
        Ok(())
    }

    /// Removes the validator.
    pub fn clear_validator(&self) {
        *self.validator.write() = None;
    }

    /// Returns the installed validator.
    #[must_use]
    pub fn validator(&self) -> Option<Value> {
        self.validator.read().clone()
    }

    /// Registers `watch` under `key`, replacing any watch with an equal key.
    ///
    /// The watch is called with `(key, atom, old, new)` after every commit.
    pub fn add_watch(&self, key: Value, watch: Value) {
        let mut watches = self.watches.write();
        *watches = watches.assoc(key, watch);
    }

    /// Removes the watch registered under `key`.
    pub fn remove_watch(&self, key: &Value) {
        let mut watches = self.watches.write();
        *watches = watches.dissoc(key);
    }

    fn validate(&self, runtime: &Runtime, candidate: &Value) -> Result<()> {
        let validator = self.validator();
        match validator {
            Some(validator) => check(runtime, &validator, candidate),
            None => Ok(()),
        }
    }

    fn notify(self: &Arc<Self>, runtime: &Runtime, old: Value, new: Value) -> Result<()> {
        let watches = self.watches.read().clone();
        if watches.is_empty() {
            return Ok(());
        }
        let reference = Value::Atom(Arc::clone(self));
        for (key, watch) in &watches {
            tracing::trace!(?key, "notifying atom watch");
            runtime.invoke(watch, &[key.clone(), reference.clone(), old.clone(), new.clone()])?;
        }
        Ok(())
    }
}

fn check(runtime: &Runtime, validator: &Value, candidate: &Value) -> Result<()> {
    if runtime.invoke(validator, std::slice::from_ref(candidate))?.is_truthy() {
        return Ok(());
    }
    let value = runtime
        .pr_str(candidate)
        .unwrap_or_else(|_| format!("{candidate:?}"));
    tracing::debug!(%value, "validator rejected atom state");
    Err(RuntimeError::ValidationRejected { value })
}

impl fmt::Debug for Atom {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Atom({:?})", self.state.read().value)
    }
}
