//! Capability protocols and their dispatch tables.
//!
//! A [`Protocol`] is a named bundle of [`Operation`]s. A value satisfies a
//! protocol when every operation of the bundle resolves for it. Resolution
//! is performed by the [`Runtime`](crate::runtime::Runtime) in three tiers,
//! first match wins:
//!
//! 1. the implementation carried by the receiver's type (the native tables
//!    of the built-in containers, or [`Object::implementation`](crate::value::Object::implementation))
//! 2. the [`Registry`] entry for the receiver's [`TypeTag`](crate::value::TypeTag)
//! 3. the [`Registry`] wildcard entry
//!
//! No coercion happens between tiers. When nothing resolves the operation
//! fails with [`RuntimeError::MissingImplementation`](crate::error::RuntimeError::MissingImplementation).

pub(crate) mod native;
mod primitive;
mod registry;

pub(crate) use native::resolve as resolve_native;
pub use registry::{DispatchKey, Registry};

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::runtime::Runtime;
use crate::value::Value;

/// An implementation of one operation: `(runtime, receiver, args) -> result`.
pub type Method = Arc<dyn Fn(&Runtime, &Value, &[Value]) -> Result<Value> + Send + Sync>;

/// A method that needs no captured state.
pub type NativeMethod = fn(&Runtime, &Value, &[Value]) -> Result<Value>;

/// Named capability bundles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Protocol {
    /// `count`.
    Countable,
    /// `nth`.
    Indexed,
    /// `get`.
    Lookupable,
    /// `assoc` and `contains_key`.
    Associative,
    /// `dissoc`.
    Dissociable,
    /// `disj`.
    Disjoinable,
    /// `conj` and `empty`.
    Collection,
    /// `peek` and `pop`.
    Stack,
    /// `seq`.
    Seqable,
    /// `first` and `rest`.
    Sequential,
    /// `reduce`.
    Reducible,
    /// `hash`.
    Hashable,
    /// `equiv`.
    Equatable,
    /// `meta` and `with_meta`.
    Meta,
    /// `deref`.
    Derefable,
    /// `print`.
    Printable,
}

impl Protocol {
    /// Every protocol.
    pub const ALL: [Self; 16] = [
        Self::Countable,
        Self::Indexed,
        Self::Lookupable,
        Self::Associative,
        Self::Dissociable,
        Self::Disjoinable,
        Self::Collection,
        Self::Stack,
        Self::Seqable,
        Self::Sequential,
        Self::Reducible,
        Self::Hashable,
        Self::Equatable,
        Self::Meta,
        Self::Derefable,
        Self::Printable,
    ];

    /// Returns the operations making up the protocol.
    #[must_use]
    pub const fn operations(self) -> &'static [Operation] {
        match self {
            Self::Countable => &[Operation::Count],
            Self::Indexed => &[Operation::Nth],
            Self::Lookupable => &[Operation::Lookup],
            Self::Associative => &[Operation::Assoc, Operation::ContainsKey],
            Self::Dissociable => &[Operation::Dissoc],
            Self::Disjoinable => &[Operation::Disjoin],
            Self::Collection => &[Operation::Conj, Operation::Empty],
            Self::Stack => &[Operation::Peek, Operation::Pop],
            Self::Seqable => &[Operation::Seq],
            Self::Sequential => &[Operation::First, Operation::Rest],
            Self::Reducible => &[Operation::Reduce],
            Self::Hashable => &[Operation::Hash],
            Self::Equatable => &[Operation::Equiv],
            Self::Meta => &[Operation::Meta, Operation::WithMeta],
            Self::Derefable => &[Operation::Deref],
            Self::Printable => &[Operation::Print],
        }
    }

    /// Returns the protocol's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Countable => "Countable",
            Self::Indexed => "Indexed",
            Self::Lookupable => "Lookupable",
            Self::Associative => "Associative",
            Self::Dissociable => "Dissociable",
            Self::Disjoinable => "Disjoinable",
            Self::Collection => "Collection",
            Self::Stack => "Stack",
            Self::Seqable => "Seqable",
            Self::Sequential => "Sequential",
            Self::Reducible => "Reducible",
            Self::Hashable => "Hashable",
            Self::Equatable => "Equatable",
            Self::Meta => "Meta",
            Self::Derefable => "Derefable",
            Self::Printable => "Printable",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A single dispatchable operation.
///
/// The argument conventions (receiver excluded) are:
///
/// | Operation     | Arguments           | Result                  |
/// |---------------|---------------------|-------------------------|
/// | `Count`       | none                | integer                 |
/// | `Nth`         | index, [default]    | element                 |
/// | `Lookup`      | key, [default]      | value, default or nil   |
/// | `Assoc`       | key, value          | new collection          |
/// | `ContainsKey` | key                 | boolean                 |
/// | `Dissoc`      | key                 | new collection          |
/// | `Disjoin`     | element             | new collection          |
/// | `Conj`        | element             | new collection          |
/// | `Empty`       | none                | empty collection        |
/// | `Peek`        | none                | element or nil          |
/// | `Pop`         | none                | new collection          |
/// | `Seq`         | none                | seq or nil              |
/// | `First`       | none                | element or nil          |
/// | `Rest`        | none                | seq, never nil          |
/// | `Reduce`      | f, [init]           | accumulated value       |
/// | `Hash`        | none                | integer                 |
/// | `Equiv`       | other               | boolean                 |
/// | `Meta`        | none                | metadata or nil         |
/// | `WithMeta`    | metadata            | annotated value         |
/// | `Deref`       | none                | current value           |
/// | `Print`       | readable (boolean)  | string                  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    /// Number of elements.
    Count,
    /// Element at an index.
    Nth,
    /// Value for a key.
    Lookup,
    /// Associate a key with a value.
    Assoc,
    /// Key membership.
    ContainsKey,
    /// Remove a key.
    Dissoc,
    /// Remove a set element.
    Disjoin,
    /// Add an element the collection's natural way.
    Conj,
    /// The empty collection of the same kind.
    Empty,
    /// The element `pop` would remove.
    Peek,
    /// Remove the element `peek` returns.
    Pop,
    /// Seq view.
    Seq,
    /// First element of a seq.
    First,
    /// Seq after the first element.
    Rest,
    /// Fold the elements.
    Reduce,
    /// Structural hash.
    Hash,
    /// Structural equality.
    Equiv,
    /// Metadata.
    Meta,
    /// Replace metadata.
    WithMeta,
    /// Current value of a reference.
    Deref,
    /// Printed representation.
    Print,
}

impl Operation {
    /// Returns the protocol the operation belongs to.
    #[must_use]
    pub const fn protocol(self) -> Protocol {
        match self {
            Self::Count => Protocol::Countable,
            Self::Nth => Protocol::Indexed,
            Self::Lookup => Protocol::Lookupable,
            Self::Assoc | Self::ContainsKey => Protocol::Associative,
            Self::Dissoc => Protocol::Dissociable,
            Self::Disjoin => Protocol::Disjoinable,
            Self::Conj | Self::Empty => Protocol::Collection,
            Self::Peek | Self::Pop => Protocol::Stack,
            Self::Seq => Protocol::Seqable,
            Self::First | Self::Rest => Protocol::Sequential,
            Self::Reduce => Protocol::Reducible,
            Self::Hash => Protocol::Hashable,
            Self::Equiv => Protocol::Equatable,
            Self::Meta | Self::WithMeta => Protocol::Meta,
            Self::Deref => Protocol::Derefable,
            Self::Print => Protocol::Printable,
        }
    }

    /// Returns the operation's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Nth => "nth",
            Self::Lookup => "get",
            Self::Assoc => "assoc",
            Self::ContainsKey => "contains_key",
            Self::Dissoc => "dissoc",
            Self::Disjoin => "disj",
            Self::Conj => "conj",
            Self::Empty => "empty",
            Self::Peek => "peek",
            Self::Pop => "pop",
            Self::Seq => "seq",
            Self::First => "first",
            Self::Rest => "rest",
            Self::Reduce => "reduce",
            Self::Hash => "hash",
            Self::Equiv => "equiv",
            Self::Meta => "meta",
            Self::WithMeta => "with_meta",
            Self::Deref => "deref",
            Self::Print => "print",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}
