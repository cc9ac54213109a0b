//! The runtime context: protocol registry, configuration and every generic
//! operation.
//!
//! A [`Runtime`] is cheap to clone. Clones share the registry until one of
//! them is extended, at which point that clone gets its own copy. Lazy seqs
//! built by a runtime capture a clone, so later extensions of the original
//! never change how an existing lazy seq realizes.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::prelude::*;
//!
//! let runtime = Runtime::new();
//! let map = runtime
//!     .assoc(&Value::empty_map(), Value::keyword("a"), Value::from(1))
//!     .unwrap();
//!
//! assert_eq!(runtime.get(&map, &Value::keyword("a")).unwrap(), Value::from(1));
//! assert_eq!(runtime.pr_str(&map).unwrap(), "{:a 1}");
//! ```

pub(crate) mod print;
mod sequence;

pub use sequence::Iter;

use std::fmt;
use std::sync::Arc;

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::protocol::native::check_arity;
use crate::protocol::{self, DispatchKey, Method, NativeMethod, Operation, Protocol, Registry};
use crate::seq;
use crate::value::{Annotated, TypeTag, Value};

/// A resolved protocol method.
enum Resolved<'a> {
    Native(NativeMethod),
    Registered(&'a Method),
    Carried(Method),
}

impl Resolved<'_> {
    fn call(&self, runtime: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
        match self {
            Self::Native(method) => method(runtime, receiver, args),
            Self::Registered(method) => method(runtime, receiver, args),
            Self::Carried(method) => method(runtime, receiver, args),
        }
    }
}

/// Owns the protocol registry and the configuration.
///
/// Every generic collection operation is a method on the runtime and goes
/// through protocol dispatch.
#[derive(Clone)]
pub struct Runtime {
    registry: Arc<Registry>,
    config: Arc<RuntimeConfig>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Runtime")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

// =============================================================================
// Construction & Extension
// =============================================================================

impl Runtime {
    /// Creates a runtime with the core registry and the default
    /// configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Creates a runtime with the core registry and `config`.
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            registry: Arc::new(Registry::core()),
            config: Arc::new(config),
        }
    }

    /// Creates a runtime configured from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_config(RuntimeConfig::from_env())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registers `method` as the implementation of `operation` for values
    /// tagged `tag`.
    ///
    /// Built-in containers resolve their own implementations first, so an
    /// entry for one of their tags only fills operations they lack.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use persistent_runtime::prelude::*;
    ///
    /// let mut runtime = Runtime::new();
    /// assert!(runtime.count(&Value::from(5)).is_err());
    ///
    /// runtime.extend_type(TypeTag::Number, Operation::Count, |_, _, _| Ok(Value::from(1)));
    /// assert_eq!(runtime.count(&Value::from(5)).unwrap(), 1);
    /// ```
    pub fn extend_type<F>(&mut self, tag: TypeTag, operation: Operation, method: F)
    where
        F: Fn(&Self, &Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.registry).insert(DispatchKey::Type(tag), operation, Arc::new(method));
    }

    /// Registers `method` as the wildcard implementation of `operation`.
    pub fn extend_default<F>(&mut self, operation: Operation, method: F)
    where
        F: Fn(&Self, &Value, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.registry).insert(DispatchKey::Wildcard, operation, Arc::new(method));
    }
}

// =============================================================================
// Dispatch
// =============================================================================

impl Runtime {
    fn resolve(&self, operation: Operation, receiver: &Value) -> Option<Resolved<'_>> {
        self.resolve_specific(operation, receiver).or_else(|| {
            self.registry
                .get(DispatchKey::Wildcard, operation)
                .map(Resolved::Registered)
        })
    }

    /// Tiers one and two.
    fn resolve_specific(&self, operation: Operation, receiver: &Value) -> Option<Resolved<'_>> {
        if let Some(method) = protocol::resolve_native(operation, receiver) {
            return Some(Resolved::Native(method));
        }
        if let Value::Object(object) = receiver
            && let Some(method) = object.implementation(operation)
        {
            return Some(Resolved::Carried(method));
        }
        self.registry
            .get(DispatchKey::Type(receiver.type_tag()), operation)
            .map(Resolved::Registered)
    }

    /// Invokes `operation` on `receiver` with `args`.
    ///
    /// Metadata is transparent: an annotated receiver dispatches on the
    /// value it wraps, and updates that keep the value's type keep its
    /// metadata.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] when no tier
    /// resolves the operation, and any error the implementation raises.
    pub fn dispatch(&self, operation: Operation, receiver: &Value, args: &[Value]) -> Result<Value> {
        if let Value::Annotated(annotated) = receiver {
            return self.dispatch_annotated(operation, annotated, args);
        }
        match self.resolve(operation, receiver) {
            Some(method) => method.call(self, receiver, args),
            None => {
                tracing::trace!(%operation, type_name = receiver.type_name(), "no protocol method");
                Err(RuntimeError::missing(operation, receiver.type_name()))
            }
        }
    }

    fn dispatch_annotated(
        &self,
        operation: Operation,
        annotated: &Annotated,
        args: &[Value],
    ) -> Result<Value> {
        let inner = annotated.value();
        match operation {
            Operation::Meta => {
                check_arity(operation, args, 0, 0, "0")?;
                Ok(annotated.meta().clone())
            }
            Operation::Assoc
            | Operation::Dissoc
            | Operation::Disjoin
            | Operation::Conj
            | Operation::Pop
            | Operation::Empty => {
                let updated = self.dispatch(operation, inner, args)?;
                Ok(if updated.type_tag() == inner.type_tag() {
                    Value::annotate(&updated, annotated.meta().clone())
                } else {
                    updated
                })
            }
            _ => self.dispatch(operation, inner, args),
        }
    }

    /// Returns `true` if every operation of `protocol` resolves for `value`
    /// without falling back to a wildcard default.
    #[must_use]
    pub fn satisfies(&self, protocol: Protocol, value: &Value) -> bool {
        let receiver = value.unannotated();
        protocol
            .operations()
            .iter()
            .all(|operation| self.resolve_specific(*operation, receiver).is_some())
    }

    fn integer_result(operation: Operation, value: &Value) -> Result<i64> {
        value.as_integer().ok_or_else(|| {
            RuntimeError::invalid_argument(
                operation.name(),
                format!("implementation returned {}, expected an integer", value.type_name()),
            )
        })
    }
}

// =============================================================================
// Collection operations
// =============================================================================

impl Runtime {
    /// Returns the number of elements of `coll`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for values that are
    /// not countable.
    pub fn count(&self, coll: &Value) -> Result<usize> {
        let count = Self::integer_result(Operation::Count, &self.dispatch(Operation::Count, coll, &[])?)?;
        usize::try_from(count).map_err(|_| {
            RuntimeError::invalid_argument("count", format!("negative count {count}"))
        })
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::IndexOutOfBounds`] when `index` is outside
    /// the collection.
    pub fn nth(&self, coll: &Value, index: i64) -> Result<Value> {
        self.dispatch(Operation::Nth, coll, &[Value::Integer(index)])
    }

    /// Returns the element at `index`, or `default` when out of range.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for values that are
    /// not indexed.
    pub fn nth_or(&self, coll: &Value, index: i64, default: Value) -> Result<Value> {
        self.dispatch(Operation::Nth, coll, &[Value::Integer(index), default])
    }

    /// Returns the value stored under `key`, or nil.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for values without
    /// lookup.
    pub fn get(&self, coll: &Value, key: &Value) -> Result<Value> {
        self.dispatch(Operation::Lookup, coll, std::slice::from_ref(key))
    }

    /// Returns the value stored under `key`, or `default`.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::get`].
    pub fn get_or(&self, coll: &Value, key: &Value, default: Value) -> Result<Value> {
        self.dispatch(Operation::Lookup, coll, &[key.clone(), default])
    }

    /// Associates `key` with `value`.
    ///
    /// # Errors
    ///
    /// Vectors fail with [`RuntimeError::InvalidArgument`] for non-integer
    /// keys and [`RuntimeError::IndexOutOfBounds`] past the end.
    pub fn assoc(&self, coll: &Value, key: Value, value: Value) -> Result<Value> {
        self.dispatch(Operation::Assoc, coll, &[key, value])
    }

    /// Returns `true` if `key` is present in `coll`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for values that are
    /// not associative.
    pub fn contains_key(&self, coll: &Value, key: &Value) -> Result<bool> {
        Ok(self
            .dispatch(Operation::ContainsKey, coll, std::slice::from_ref(key))?
            .is_truthy())
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for values that are
    /// not maps.
    pub fn dissoc(&self, coll: &Value, key: &Value) -> Result<Value> {
        self.dispatch(Operation::Dissoc, coll, std::slice::from_ref(key))
    }

    /// Removes `element` from a set.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for values that are
    /// not sets.
    pub fn disj(&self, coll: &Value, element: &Value) -> Result<Value> {
        self.dispatch(Operation::Disjoin, coll, std::slice::from_ref(element))
    }

    /// Adds each of `elements` the collection's natural way: lists and
    /// seqs at the front, vectors and queues at the back.
    ///
    /// # Errors
    ///
    /// Maps fail with [`RuntimeError::InvalidArgument`] for elements that
    /// are neither `[key value]` pairs nor maps.
    pub fn conj(&self, coll: &Value, elements: &[Value]) -> Result<Value> {
        elements.iter().try_fold(coll.clone(), |grown, element| {
            self.dispatch(Operation::Conj, &grown, std::slice::from_ref(element))
        })
    }

    /// Returns the empty collection of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for non-collections.
    pub fn empty(&self, coll: &Value) -> Result<Value> {
        self.dispatch(Operation::Empty, coll, &[])
    }

    /// Returns the element [`Runtime::pop`] would remove, or nil.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for non-stacks.
    pub fn peek(&self, coll: &Value) -> Result<Value> {
        self.dispatch(Operation::Peek, coll, &[])
    }

    /// Removes the element [`Runtime::peek`] returns.
    ///
    /// # Errors
    ///
    /// Lists, vectors and subvecs fail with
    /// [`RuntimeError::EmptyCollection`] when empty.
    pub fn pop(&self, coll: &Value) -> Result<Value> {
        self.dispatch(Operation::Pop, coll, &[])
    }

    /// Returns the seq view of `coll`, or nil when it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for non-seqables.
    pub fn seq(&self, coll: &Value) -> Result<Value> {
        self.dispatch(Operation::Seq, coll, &[])
    }

    /// Returns the first element of `coll`, or nil when it is empty.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::seq`].
    pub fn first(&self, coll: &Value) -> Result<Value> {
        if self.resolve_specific(Operation::First, coll.unannotated()).is_some() {
            return self.dispatch(Operation::First, coll, &[]);
        }
        match self.seq(coll)? {
            Value::Nil => Ok(Value::Nil),
            seq => self.dispatch(Operation::First, &seq, &[]),
        }
    }

    /// Returns everything after the first element; never nil.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::seq`].
    pub fn rest(&self, coll: &Value) -> Result<Value> {
        if self.resolve_specific(Operation::Rest, coll.unannotated()).is_some() {
            return self.dispatch(Operation::Rest, coll, &[]);
        }
        match self.seq(coll)? {
            Value::Nil => Ok(Value::empty_list()),
            seq => self.dispatch(Operation::Rest, &seq, &[]),
        }
    }

    /// Returns `seq(rest(coll))`.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::seq`].
    pub fn next(&self, coll: &Value) -> Result<Value> {
        self.seq(&self.rest(coll)?)
    }

    /// Prepends `element` to `coll` without touching it.
    ///
    /// Lists and nil grow into a longer list; any other seqable becomes the
    /// tail of a cons cell.
    #[must_use]
    pub fn cons(&self, element: Value, coll: &Value) -> Value {
        match coll {
            Value::Nil => Value::list([element]),
            Value::List(list) => Value::List(list.cons(element)),
            other => Value::cons(element, other.clone()),
        }
    }

    /// Splits `coll` into its first element and the rest, or `None` when it
    /// is empty.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::seq`], plus lazy realization failures.
    pub fn uncons(&self, coll: &Value) -> Result<Option<(Value, Value)>> {
        let receiver = coll.unannotated();
        if protocol::resolve_native(Operation::Seq, receiver).is_some() {
            return seq::uncons(receiver);
        }
        let seq = self.seq(receiver)?;
        if seq.is_nil() {
            return Ok(None);
        }
        if protocol::resolve_native(Operation::Seq, &seq).is_some() {
            return seq::uncons(&seq);
        }
        let head = self.dispatch(Operation::First, &seq, &[])?;
        let tail = self.dispatch(Operation::Rest, &seq, &[])?;
        Ok(Some((head, tail)))
    }

    /// Folds `coll` with `function`, seeding with the first element.
    ///
    /// An empty collection returns `function()`.
    ///
    /// # Errors
    ///
    /// Propagates errors from the traversal and from `function`.
    pub fn reduce(&self, coll: &Value, function: &Value) -> Result<Value> {
        self.dispatch(Operation::Reduce, coll, std::slice::from_ref(function))
    }

    /// Folds `coll` with `function`, seeding with `init`.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::reduce`].
    pub fn reduce_with(&self, coll: &Value, function: &Value, init: Value) -> Result<Value> {
        self.dispatch(Operation::Reduce, coll, &[function.clone(), init])
    }

    /// Returns the hash of `value`.
    ///
    /// # Errors
    ///
    /// Fails when a registered implementation does, and with
    /// [`RuntimeError::InvalidArgument`] when it returns an integer outside
    /// the 32-bit range.
    pub fn hash(&self, value: &Value) -> Result<i32> {
        let hash = Self::integer_result(Operation::Hash, &self.dispatch(Operation::Hash, value, &[])?)?;
        i32::try_from(hash).map_err(|_| {
            RuntimeError::invalid_argument(
                Operation::Hash.name(),
                format!("implementation returned {hash}, outside the 32-bit hash range"),
            )
        })
    }

    /// Returns `true` if `left` and `right` are equivalent.
    ///
    /// # Errors
    ///
    /// Fails only when a registered implementation does.
    pub fn equiv(&self, left: &Value, right: &Value) -> Result<bool> {
        Ok(self
            .dispatch(Operation::Equiv, left, std::slice::from_ref(right))?
            .is_truthy())
    }

    /// Returns the metadata of `value`, or nil.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for scalars.
    pub fn meta(&self, value: &Value) -> Result<Value> {
        self.dispatch(Operation::Meta, value, &[])
    }

    /// Returns a value equal to `value` carrying `meta`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for scalars.
    pub fn with_meta(&self, value: &Value, meta: Value) -> Result<Value> {
        self.dispatch(Operation::WithMeta, value, &[meta])
    }

    /// Returns the current value of a reference.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::MissingImplementation`] for non-references.
    pub fn deref(&self, reference: &Value) -> Result<Value> {
        self.dispatch(Operation::Deref, reference, &[])
    }
}

// =============================================================================
// Printing & invocation
// =============================================================================

impl Runtime {
    /// Returns the readable printed form of `value`: strings are quoted.
    ///
    /// # Errors
    ///
    /// Propagates errors from printing hooks and lazy realization.
    pub fn pr_str(&self, value: &Value) -> Result<String> {
        self.render(value, true)
    }

    /// Returns the display form of `value`: strings print raw.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::pr_str`].
    pub fn print_str(&self, value: &Value) -> Result<String> {
        self.render(value, false)
    }

    pub(crate) fn render(&self, value: &Value, readable: bool) -> Result<String> {
        print::printed_text(self.dispatch(Operation::Print, value, &[Value::Boolean(readable)])?)
    }

    /// Calls `callee` with `args`.
    ///
    /// Functions run their body. Keywords look themselves up in their first
    /// argument; maps and sets look up their first argument.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::NotCallable`] for other values and
    /// [`RuntimeError::ArityMismatch`] for lookups with the wrong argument
    /// count.
    pub fn invoke(&self, callee: &Value, args: &[Value]) -> Result<Value> {
        let callee = callee.unannotated();
        match callee {
            Value::Function(function) => function.call(self, args),
            Value::Keyword(keyword) => match args {
                [coll] => self.get(coll, callee),
                [coll, default] => self.get_or(coll, callee, default.clone()),
                _ => Err(RuntimeError::arity(keyword.to_string(), "1 or 2", args.len())),
            },
            Value::ObjMap(_) | Value::HashMap(_) | Value::Set(_) => match args {
                [key] => self.get(callee, key),
                [key, default] => self.get_or(callee, key, default.clone()),
                _ => Err(RuntimeError::arity(callee.type_name(), "1 or 2", args.len())),
            },
            other => Err(RuntimeError::NotCallable {
                type_name: other.type_name().to_string(),
            }),
        }
    }

    /// Replaces the state of an atom value.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidArgument`] when `atom` is not an atom
    /// and [`RuntimeError::ValidationRejected`] when its validator refuses
    /// `value`.
    pub fn reset(&self, atom: &Value, value: Value) -> Result<Value> {
        Self::atom_argument("reset", atom)?.reset(self, value)
    }

    /// Applies `function` to the state of an atom value and `args`.
    ///
    /// # Errors
    ///
    /// Same as [`Runtime::reset`], plus errors from `function`.
    pub fn swap(&self, atom: &Value, function: &Value, args: &[Value]) -> Result<Value> {
        Self::atom_argument("swap", atom)?.swap(self, function, args)
    }

    fn atom_argument<'a>(operation: &'static str, atom: &'a Value) -> Result<&'a Arc<crate::atom::Atom>> {
        atom.as_atom().ok_or_else(|| {
            RuntimeError::invalid_argument(
                operation,
                format!("expected an atom, got {}", atom.type_name()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::any::Any;

    #[derive(Debug)]
    struct Opaque;

    impl crate::value::Object for Opaque {
        fn type_name(&self) -> &str {
            "Opaque"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[rstest]
    fn test_opaque_objects_print_their_type_name() {
        let runtime = Runtime::new();
        assert_eq!(runtime.pr_str(&Value::object(Opaque)).unwrap(), "#<Opaque>");
    }

    #[rstest]
    fn test_missing_implementation_names_receiver_type() {
        let runtime = Runtime::new();
        assert_eq!(
            runtime.count(&Value::from(true)).unwrap_err(),
            RuntimeError::missing(Operation::Count, "boolean")
        );
    }

    #[rstest]
    fn test_registry_entry_cannot_shadow_native_method() {
        let mut runtime = Runtime::new();
        runtime.extend_type(TypeTag::Vector, Operation::Count, |_, _, _| Ok(Value::from(99)));
        assert_eq!(runtime.count(&Value::vector([Value::from(1)])).unwrap(), 1);
    }

    #[rstest]
    fn test_extension_does_not_leak_into_clones() {
        let original = Runtime::new();
        let mut extended = original.clone();
        extended.extend_type(TypeTag::Number, Operation::Count, |_, _, _| Ok(Value::from(1)));
        assert!(original.count(&Value::from(3)).is_err());
        assert_eq!(extended.count(&Value::from(3)).unwrap(), 1);
    }

    #[rstest]
    fn test_wildcard_is_last_resort() {
        let mut runtime = Runtime::new();
        runtime.extend_default(Operation::Deref, |_, _, _| Ok(Value::from("fallback")));
        assert_eq!(runtime.deref(&Value::from(1)).unwrap(), Value::from("fallback"));
        let atom = Value::atom(Value::from(2));
        assert_eq!(runtime.deref(&atom).unwrap(), Value::from(2));
    }

    #[rstest]
    fn test_satisfies_ignores_wildcard_defaults() {
        let runtime = Runtime::new();
        assert!(runtime.satisfies(Protocol::Countable, &Value::string("abc")));
        assert!(!runtime.satisfies(Protocol::Countable, &Value::from(1)));
        assert!(!runtime.satisfies(Protocol::Printable, &Value::object(Opaque)));
        assert!(runtime.satisfies(Protocol::Stack, &Value::empty_queue()));
    }

    #[rstest]
    fn test_metadata_survives_same_type_updates() {
        let runtime = Runtime::new();
        let meta = Value::map([(Value::keyword("tag"), Value::from(1))]);
        let vector = runtime
            .with_meta(&Value::vector([Value::from(1)]), meta.clone())
            .unwrap();
        let grown = runtime.conj(&vector, &[Value::from(2)]).unwrap();
        assert_eq!(runtime.meta(&grown).unwrap(), meta);
        assert_eq!(grown, Value::vector([Value::from(1), Value::from(2)]));
        assert_eq!(runtime.count(&grown).unwrap(), 2);
    }

    #[rstest]
    fn test_with_meta_on_scalar_is_missing() {
        let runtime = Runtime::new();
        assert_eq!(
            runtime.with_meta(&Value::from(1), Value::Nil).unwrap_err(),
            RuntimeError::missing(Operation::WithMeta, "number")
        );
    }

    #[rstest]
    fn test_keyword_and_map_invocation_look_up() {
        let runtime = Runtime::new();
        let map = Value::map([(Value::keyword("a"), Value::from(1))]);
        assert_eq!(runtime.invoke(&Value::keyword("a"), &[map.clone()]).unwrap(), Value::from(1));
        assert_eq!(runtime.invoke(&map, &[Value::keyword("b"), Value::from(0)]).unwrap(), Value::from(0));
        assert_eq!(
            runtime.invoke(&Value::from(1), &[]).unwrap_err(),
            RuntimeError::NotCallable {
                type_name: "number".to_string()
            }
        );
    }

    #[rstest]
    fn test_first_of_vector_goes_through_seq() {
        let runtime = Runtime::new();
        let vector = Value::vector([Value::from(1), Value::from(2)]);
        assert_eq!(runtime.first(&vector).unwrap(), Value::from(1));
        assert_eq!(runtime.rest(&vector).unwrap(), Value::list([Value::from(2)]));
        assert!(runtime.next(&Value::vector([Value::from(1)])).unwrap().is_nil());
    }
}
