//! The extensible dispatch table behind tiers two and three.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::{Method, NativeMethod, Operation, primitive};
use crate::value::TypeTag;

/// Key of a registry entry: a type tag or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchKey {
    /// Entries for values with this tag.
    Type(TypeTag),
    /// The universal fallback.
    Wildcard,
}

impl fmt::Display for DispatchKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(tag) => write!(formatter, "{tag}"),
            Self::Wildcard => formatter.write_str("*"),
        }
    }
}

/// A map from `(operation, dispatch key)` to implementation.
///
/// A registry is an ordinary value: each [`Runtime`](crate::runtime::Runtime)
/// owns its own, so extensions made through one runtime are invisible to
/// every other.
#[derive(Clone, Default)]
pub struct Registry {
    methods: FxHashMap<(Operation, DispatchKey), Method>,
}

impl Registry {
    /// Creates a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry holding the core entries: the primitive types'
    /// protocols and the wildcard equality, hashing and printing defaults.
    #[must_use]
    pub fn core() -> Self {
        let mut registry = Self::empty();
        for (tag, operation, method) in primitive::ENTRIES {
            registry.insert_native(DispatchKey::Type(*tag), *operation, *method);
        }
        for (operation, method) in primitive::DEFAULTS {
            registry.insert_native(DispatchKey::Wildcard, *operation, *method);
        }
        registry
    }

    fn insert_native(&mut self, key: DispatchKey, operation: Operation, method: NativeMethod) {
        self.methods.insert((operation, key), Arc::new(method));
    }

    /// Installs `method` for `operation` under `key`, replacing any previous
    /// entry.
    pub fn insert(&mut self, key: DispatchKey, operation: Operation, method: Method) {
        tracing::debug!(%key, %operation, "registering protocol method");
        self.methods.insert((operation, key), method);
    }

    /// Removes the entry for `operation` under `key`.
    pub fn remove(&mut self, key: DispatchKey, operation: Operation) -> Option<Method> {
        self.methods.remove(&(operation, key))
    }

    /// Returns the entry for `operation` under `key`.
    #[must_use]
    pub fn get(&self, key: DispatchKey, operation: Operation) -> Option<&Method> {
        self.methods.get(&(operation, key))
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns `true` if the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = self
            .methods
            .keys()
            .map(|(operation, key)| format!("{key}.{operation}"))
            .collect();
        keys.sort();
        formatter.debug_struct("Registry").field("methods", &keys).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_core_registers_nil_count_and_wildcard_print() {
        let registry = Registry::core();
        assert!(registry.get(DispatchKey::Type(TypeTag::Nil), Operation::Count).is_some());
        assert!(registry.get(DispatchKey::Wildcard, Operation::Print).is_some());
        assert!(registry.get(DispatchKey::Type(TypeTag::Number), Operation::Count).is_none());
    }

    #[rstest]
    fn test_clones_are_independent() {
        let original = Registry::core();
        let mut extended = original.clone();
        extended.remove(DispatchKey::Wildcard, Operation::Print);
        assert!(original.get(DispatchKey::Wildcard, Operation::Print).is_some());
        assert!(extended.get(DispatchKey::Wildcard, Operation::Print).is_none());
    }
}
