//! The dynamic value model.
//!
//! Every generic operation of the [`Runtime`](crate::runtime::Runtime)
//! accepts and returns [`Value`], a closed variant over the supported
//! categories:
//!
//! - primitives: nil, booleans, numbers, strings, keywords and bytes
//! - persistent containers: list, vector, subvec, the two map
//!   representations, set, queue and range
//! - seqs: cons cells, indexed seqs and lazy seqs
//! - references and callables: atoms, functions and reduced markers
//! - metadata-annotated values and user [`Object`]s
//!
//! Values are cheap to clone: every non-scalar payload is reference counted.
//! [`Value`] implements [`Equiv`] and [`HashCode`] intrinsically, which is
//! what hashed containers key on. Equality ignores metadata.
//!
//! # Examples
//!
//! ```rust
//! use persistent_runtime::prelude::*;
//!
//! let vector = Value::vector([Value::from(1), Value::from(2)]);
//! let list = Value::list([Value::from(1), Value::from(2)]);
//! assert_eq!(vector, list);
//! assert_eq!(vector.hash_code(), list.hash_code());
//! assert_eq!(vector.type_name(), "vector");
//! ```

mod function;
mod keyword;
pub(crate) mod map;
mod object;

pub use function::{Function, FunctionBody};
pub use keyword::Keyword;
pub use object::Object;

use std::fmt;
use std::sync::Arc;

use crate::atom::Atom;
use crate::config::RuntimeConfig;
use crate::equality::{
    Equiv, HashCode, hash_float, hash_integer, hash_ordered, hash_string,
};
use crate::error::Result;
use crate::persistent::{
    ObjMap, PersistentHashMap, PersistentHashSet, PersistentList, PersistentQueue,
    PersistentVector, Range, Subvec,
};
use crate::seq::{Cons, IndexedSeq, LazySeq, SeqIter};

/// A runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Nil,
    /// `true` or `false`.
    Boolean(bool),
    /// A 64-bit integer.
    Integer(i64),
    /// A double precision float.
    Float(f64),
    /// An immutable string.
    String(Arc<str>),
    /// A keyword.
    Keyword(Keyword),
    /// An immutable byte sequence.
    Bytes(Arc<[u8]>),
    /// A persistent list.
    List(PersistentList<Value>),
    /// A persistent vector.
    Vector(PersistentVector<Value>),
    /// A window over a persistent vector.
    Subvec(Subvec<Value>),
    /// A small insertion ordered map with string-like keys.
    ObjMap(ObjMap<ObjKey, Value>),
    /// A hash-bucketed map with arbitrary keys.
    HashMap(PersistentHashMap<Value, Value>),
    /// A persistent set.
    Set(PersistentHashSet<Value>),
    /// A persistent FIFO queue.
    Queue(PersistentQueue<Value>),
    /// An arithmetic progression.
    Range(Range),
    /// A cons cell.
    Cons(Arc<Cons>),
    /// A seq over a slice of a vector.
    IndexedSeq(IndexedSeq),
    /// A memoizing lazy seq.
    LazySeq(Arc<LazySeq>),
    /// A mutable reference cell.
    Atom(Arc<Atom>),
    /// A callable function.
    Function(Function),
    /// Early termination marker for `reduce`.
    Reduced(Arc<Value>),
    /// A value carrying metadata.
    Annotated(Arc<Annotated>),
    /// A user-defined value.
    Object(Arc<dyn Object>),
}

static_assertions::assert_impl_all!(Value: Send, Sync);

/// The dispatch tag of a [`Value`].
///
/// Integers and floats share [`TypeTag::Number`]; every user object shares
/// [`TypeTag::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    /// [`Value::Nil`].
    Nil,
    /// [`Value::Boolean`].
    Boolean,
    /// [`Value::Integer`] and [`Value::Float`].
    Number,
    /// [`Value::String`].
    String,
    /// [`Value::Keyword`].
    Keyword,
    /// [`Value::Bytes`].
    Bytes,
    /// [`Value::List`].
    List,
    /// [`Value::Vector`].
    Vector,
    /// [`Value::Subvec`].
    Subvec,
    /// [`Value::ObjMap`].
    ObjMap,
    /// [`Value::HashMap`].
    HashMap,
    /// [`Value::Set`].
    Set,
    /// [`Value::Queue`].
    Queue,
    /// [`Value::Range`].
    Range,
    /// [`Value::Cons`].
    Cons,
    /// [`Value::IndexedSeq`].
    IndexedSeq,
    /// [`Value::LazySeq`].
    LazySeq,
    /// [`Value::Atom`].
    Atom,
    /// [`Value::Function`].
    Function,
    /// [`Value::Reduced`].
    Reduced,
    /// [`Value::Object`].
    Object,
}

impl TypeTag {
    /// Returns the tag's name as used in errors and printed forms.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Keyword => "keyword",
            Self::Bytes => "bytes",
            Self::List => "list",
            Self::Vector => "vector",
            Self::Subvec => "subvec",
            Self::ObjMap => "obj-map",
            Self::HashMap => "hash-map",
            Self::Set => "set",
            Self::Queue => "queue",
            Self::Range => "range",
            Self::Cons => "cons",
            Self::IndexedSeq => "indexed-seq",
            Self::LazySeq => "lazy-seq",
            Self::Atom => "atom",
            Self::Function => "function",
            Self::Reduced => "reduced",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// A key of an [`ObjMap`]: a string or a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjKey {
    /// A string key.
    String(Arc<str>),
    /// A keyword key.
    Keyword(Keyword),
}

impl ObjKey {
    /// Returns the key for a string-like value.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::String(Arc::clone(text))),
            Value::Keyword(keyword) => Some(Self::Keyword(keyword.clone())),
            _ => None,
        }
    }

    /// Returns the key as a value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(text) => Value::String(Arc::clone(text)),
            Self::Keyword(keyword) => Value::Keyword(keyword.clone()),
        }
    }
}

impl Equiv for ObjKey {
    fn equiv(&self, other: &Self) -> bool {
        self == other
    }
}

impl HashCode for ObjKey {
    fn hash_code(&self) -> i32 {
        match self {
            Self::String(text) => hash_string(text),
            Self::Keyword(keyword) => keyword.hash_code(),
        }
    }
}

/// A value paired with its metadata.
#[derive(Debug)]
pub struct Annotated {
    value: Value,
    meta: Value,
}

impl Annotated {
    /// Returns the annotated value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the metadata.
    #[must_use]
    pub const fn meta(&self) -> &Value {
        &self.meta
    }
}

// =============================================================================
// Construction
// =============================================================================

impl Value {
    /// Creates a string value.
    #[must_use]
    pub fn string(text: &str) -> Self {
        Self::String(Arc::from(text))
    }

    /// Creates a keyword from `name` or `ns/name`.
    #[must_use]
    pub fn keyword(text: &str) -> Self {
        Self::Keyword(Keyword::parse(text))
    }

    /// Creates a byte sequence.
    #[must_use]
    pub fn bytes(data: &[u8]) -> Self {
        Self::Bytes(Arc::from(data))
    }

    /// Creates a list of `items`.
    pub fn list<I: IntoIterator<Item = Self>>(items: I) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Returns the empty list.
    #[must_use]
    pub const fn empty_list() -> Self {
        Self::List(PersistentList::new())
    }

    /// Creates a vector of `items`.
    pub fn vector<I: IntoIterator<Item = Self>>(items: I) -> Self {
        Self::Vector(items.into_iter().collect())
    }

    /// Returns the empty vector.
    #[must_use]
    pub fn empty_vector() -> Self {
        Self::Vector(PersistentVector::new())
    }

    /// Creates a map of `entries`, later entries overwriting earlier ones.
    ///
    /// The map starts as an [`ObjMap`] and is promoted to a hash map by the
    /// default [`RuntimeConfig`] rules.
    pub fn map<I: IntoIterator<Item = (Self, Self)>>(entries: I) -> Self {
        let threshold = RuntimeConfig::default().hash_map_threshold;
        entries
            .into_iter()
            .fold(Self::empty_map(), |map, (key, value)| {
                map::assoc(&map, key, value, threshold)
            })
    }

    /// Returns the empty map.
    #[must_use]
    pub fn empty_map() -> Self {
        Self::ObjMap(ObjMap::new())
    }

    /// Creates a hash-bucketed map of `entries`.
    pub fn hash_map<I: IntoIterator<Item = (Self, Self)>>(entries: I) -> Self {
        Self::HashMap(entries.into_iter().collect())
    }

    /// Returns the empty hash-bucketed map.
    #[must_use]
    pub fn empty_hash_map() -> Self {
        Self::HashMap(PersistentHashMap::new())
    }

    /// Creates a set of `items`.
    pub fn set<I: IntoIterator<Item = Self>>(items: I) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Returns the empty set.
    #[must_use]
    pub fn empty_set() -> Self {
        Self::Set(PersistentHashSet::new())
    }

    /// Creates a queue of `items` in FIFO order.
    pub fn queue<I: IntoIterator<Item = Self>>(items: I) -> Self {
        Self::Queue(items.into_iter().collect())
    }

    /// Returns the empty queue.
    #[must_use]
    pub fn empty_queue() -> Self {
        Self::Queue(PersistentQueue::new())
    }

    /// Creates the range `[start, end)` stepping by `step`.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::InvalidArgument`](crate::error::RuntimeError::InvalidArgument)
    /// when `step` is zero.
    pub fn range(start: i64, end: i64, step: i64) -> Result<Self> {
        Range::new(start, end, step).map(Self::Range)
    }

    /// Creates a cons cell of `first` onto the seq `rest`.
    #[must_use]
    pub fn cons(first: Self, rest: Self) -> Self {
        Self::Cons(Arc::new(Cons::new(first, rest)))
    }

    /// Creates a lazy seq realized by `producer`.
    pub fn lazy_seq<F>(producer: F) -> Self
    where
        F: FnOnce() -> Result<Self> + Send + 'static,
    {
        Self::LazySeq(Arc::new(LazySeq::new(producer)))
    }

    /// Creates an atom holding `initial`.
    #[must_use]
    pub fn atom(initial: Self) -> Self {
        Self::Atom(Arc::new(Atom::new(initial)))
    }

    /// Creates a named function.
    pub fn function<F>(name: &str, body: F) -> Self
    where
        F: Fn(&crate::runtime::Runtime, &[Self]) -> Result<Self> + Send + Sync + 'static,
    {
        Self::Function(Function::new(name, body))
    }

    /// Wraps a user object.
    pub fn object<O: Object + 'static>(object: O) -> Self {
        Self::Object(Arc::new(object))
    }

    /// Marks `value` as the final result of a reduction.
    #[must_use]
    pub fn reduced(value: Self) -> Self {
        Self::Reduced(Arc::new(value))
    }

    /// Returns `value` carrying `meta`; nil metadata strips the annotation.
    pub(crate) fn annotate(value: &Self, meta: Self) -> Self {
        let value = value.unannotated().clone();
        if meta.is_nil() {
            value
        } else {
            Self::Annotated(Arc::new(Annotated { value, meta }))
        }
    }
}

// =============================================================================
// Inspection
// =============================================================================

impl Value {
    /// Returns `true` for nil.
    #[inline]
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Returns `false` for nil and `false`, `true` for everything else.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        !matches!(self.unannotated(), Self::Nil | Self::Boolean(false))
    }

    /// Returns the value without its metadata annotation.
    #[must_use]
    pub fn unannotated(&self) -> &Self {
        match self {
            Self::Annotated(annotated) => &annotated.value,
            other => other,
        }
    }

    /// Returns the dispatch tag.
    #[must_use]
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Nil => TypeTag::Nil,
            Self::Boolean(_) => TypeTag::Boolean,
            Self::Integer(_) | Self::Float(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Keyword(_) => TypeTag::Keyword,
            Self::Bytes(_) => TypeTag::Bytes,
            Self::List(_) => TypeTag::List,
            Self::Vector(_) => TypeTag::Vector,
            Self::Subvec(_) => TypeTag::Subvec,
            Self::ObjMap(_) => TypeTag::ObjMap,
            Self::HashMap(_) => TypeTag::HashMap,
            Self::Set(_) => TypeTag::Set,
            Self::Queue(_) => TypeTag::Queue,
            Self::Range(_) => TypeTag::Range,
            Self::Cons(_) => TypeTag::Cons,
            Self::IndexedSeq(_) => TypeTag::IndexedSeq,
            Self::LazySeq(_) => TypeTag::LazySeq,
            Self::Atom(_) => TypeTag::Atom,
            Self::Function(_) => TypeTag::Function,
            Self::Reduced(_) => TypeTag::Reduced,
            Self::Annotated(annotated) => annotated.value.type_tag(),
            Self::Object(_) => TypeTag::Object,
        }
    }

    /// Returns the type name used in errors; objects report their own name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::Object(object) => object.type_name(),
            Self::Annotated(annotated) => annotated.value.type_name(),
            other => other.type_tag().name(),
        }
    }

    /// Returns `true` for values compared element-wise in order.
    #[must_use]
    pub fn is_sequential(&self) -> bool {
        matches!(
            self.unannotated(),
            Self::List(_)
                | Self::Vector(_)
                | Self::Subvec(_)
                | Self::Queue(_)
                | Self::Range(_)
                | Self::Cons(_)
                | Self::IndexedSeq(_)
                | Self::LazySeq(_)
        )
    }

    /// Returns `true` for either map representation.
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self.unannotated(), Self::ObjMap(_) | Self::HashMap(_))
    }

    /// Returns the integer payload.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self.unannotated() {
            Self::Integer(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the numeric payload as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self.unannotated() {
            Self::Integer(number) => Some(*number as f64),
            Self::Float(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the string payload.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self.unannotated() {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the keyword payload.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&Keyword> {
        match self.unannotated() {
            Self::Keyword(keyword) => Some(keyword),
            _ => None,
        }
    }

    /// Returns the atom payload.
    #[must_use]
    pub fn as_atom(&self) -> Option<&Arc<Atom>> {
        match self.unannotated() {
            Self::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// Returns the function payload.
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match self.unannotated() {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Downcasts a user object to its concrete type.
    #[must_use]
    pub fn downcast_object<T: 'static>(&self) -> Option<&T> {
        match self.unannotated() {
            Self::Object(object) => object.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Returns the element count when it is known without traversal.
    pub(crate) fn counted_len(&self) -> Option<usize> {
        match self.unannotated() {
            Self::List(list) => Some(list.len()),
            Self::Vector(vector) => Some(vector.len()),
            Self::Subvec(subvec) => Some(subvec.len()),
            Self::Queue(queue) => Some(queue.len()),
            Self::Range(range) => Some(range.len()),
            Self::IndexedSeq(seq) => Some(seq.len()),
            Self::ObjMap(map) => Some(map.len()),
            Self::HashMap(map) => Some(map.len()),
            Self::Set(set) => Some(set.len()),
            _ => None,
        }
    }
}

/// Hashes an allocation address.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn identity_hash(pointer: *const ()) -> i32 {
    hash_integer(pointer.addr() as i64)
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<Keyword> for Value {
    fn from(value: Keyword) -> Self {
        Self::Keyword(value)
    }
}

impl From<PersistentList<Self>> for Value {
    fn from(value: PersistentList<Self>) -> Self {
        Self::List(value)
    }
}

impl From<PersistentVector<Self>> for Value {
    fn from(value: PersistentVector<Self>) -> Self {
        Self::Vector(value)
    }
}

impl From<PersistentHashMap<Self, Self>> for Value {
    fn from(value: PersistentHashMap<Self, Self>) -> Self {
        Self::HashMap(value)
    }
}

impl From<PersistentHashSet<Self>> for Value {
    fn from(value: PersistentHashSet<Self>) -> Self {
        Self::Set(value)
    }
}

impl From<Range> for Value {
    fn from(value: Range) -> Self {
        Self::Range(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

// =============================================================================
// Structural Equality & Hashing
// =============================================================================

impl Equiv for Value {
    fn equiv(&self, other: &Self) -> bool {
        let (left, right) = (self.unannotated(), other.unannotated());
        match (left, right) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Integer(integer), Self::Float(float))
            | (Self::Float(float), Self::Integer(integer)) => integral_equals(*integer, *float),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Keyword(a), Self::Keyword(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Vector(a), Self::Vector(b)) => a.equiv(b),
            (Self::List(a), Self::List(b)) => a.ptr_eq(b) || a.equiv(b),
            (Self::Set(a), Self::Set(b)) => a.equiv(b),
            (Self::Atom(a), Self::Atom(b)) => Arc::ptr_eq(a, b),
            (Self::Function(a), Self::Function(b)) => a.ptr_eq(b),
            (Self::Reduced(a), Self::Reduced(b)) => a.equiv(b),
            (Self::Object(a), Self::Object(b)) => {
                Arc::ptr_eq(a, b) || Object::equiv(a.as_ref(), b.as_ref())
            }
            _ if left.is_sequential() && right.is_sequential() => equiv_sequential(left, right),
            _ if left.is_map() && right.is_map() => map::equiv(left, right),
            _ => false,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral_equals(integer: i64, float: f64) -> bool {
    float.fract() == 0.0 && float as i128 == i128::from(integer)
}

fn equiv_sequential(left: &Value, right: &Value) -> bool {
    if let (Some(left_len), Some(right_len)) = (left.counted_len(), right.counted_len())
        && left_len != right_len
    {
        return false;
    }
    let mut left_iter = SeqIter::new(left.clone());
    let mut right_iter = SeqIter::new(right.clone());
    loop {
        match (left_iter.next(), right_iter.next()) {
            (None, None) => return true,
            (Some(Ok(a)), Some(Ok(b))) => {
                if !a.equiv(&b) {
                    return false;
                }
            }
            (Some(Err(error)), _) | (_, Some(Err(error))) => {
                tracing::trace!(%error, "seq realization failed during equality");
                return false;
            }
            _ => return false,
        }
    }
}

impl HashCode for Value {
    fn hash_code(&self) -> i32 {
        match self {
            Self::Nil | Self::Boolean(false) => 0,
            Self::Boolean(true) => 1,
            Self::Integer(number) => hash_integer(*number),
            Self::Float(number) => hash_float(*number),
            Self::String(text) => hash_string(text),
            Self::Keyword(keyword) => keyword.hash_code(),
            Self::Bytes(bytes) => hash_ordered(bytes.iter().map(|byte| hash_integer(i64::from(*byte)))),
            Self::List(list) => list.hash_code(),
            Self::Vector(vector) => vector.hash_code(),
            Self::Subvec(subvec) => subvec.hash_code(),
            Self::Queue(queue) => queue.hash_code(),
            Self::Range(range) => range.hash_code(),
            Self::ObjMap(map) => map.hash_code(),
            Self::HashMap(map) => map.hash_code(),
            Self::Set(set) => set.hash_code(),
            Self::Cons(_) | Self::IndexedSeq(_) | Self::LazySeq(_) => hash_ordered(
                SeqIter::new(self.clone())
                    .map_while(|element| {
                        element
                            .inspect_err(|error| {
                                tracing::trace!(%error, "seq realization failed during hashing");
                            })
                            .ok()
                    })
                    .map(|element| element.hash_code()),
            ),
            Self::Atom(atom) => identity_hash(Arc::as_ptr(atom).cast::<()>()),
            Self::Function(function) => function.identity_hash(),
            Self::Reduced(inner) => inner.hash_code(),
            Self::Annotated(annotated) => annotated.value.hash_code(),
            Self::Object(object) => Object::hash_code(object.as_ref())
                .unwrap_or_else(|| identity_hash(Arc::as_ptr(object).cast::<()>())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equiv(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => formatter.write_str("nil"),
            Self::Boolean(value) => write!(formatter, "{value}"),
            Self::Integer(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::String(value) => write!(formatter, "{value:?}"),
            Self::Keyword(value) => write!(formatter, "{value}"),
            Self::Bytes(value) => write!(formatter, "#bytes {value:?}"),
            Self::List(value) => write!(formatter, "List{value:?}"),
            Self::Vector(value) => write!(formatter, "{value:?}"),
            Self::Subvec(value) => write!(formatter, "Subvec{value:?}"),
            Self::ObjMap(value) => write!(formatter, "{value:?}"),
            Self::HashMap(value) => write!(formatter, "{value:?}"),
            Self::Set(value) => write!(formatter, "#{value:?}"),
            Self::Queue(value) => write!(formatter, "#queue {value:?}"),
            Self::Range(value) => write!(formatter, "Range{value:?}"),
            Self::Cons(value) => write!(formatter, "{value:?}"),
            Self::IndexedSeq(value) => write!(formatter, "{value:?}"),
            Self::LazySeq(value) => write!(formatter, "{value:?}"),
            Self::Atom(value) => write!(formatter, "{value:?}"),
            Self::Function(value) => write!(formatter, "{value:?}"),
            Self::Reduced(value) => write!(formatter, "#reduced {value:?}"),
            Self::Annotated(value) => write!(formatter, "^{:?} {:?}", value.meta, value.value),
            Self::Object(value) => write!(formatter, "{value:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_integral_float_equals_integer_and_hashes_alike() {
        let integer = Value::Integer(42);
        let float = Value::Float(42.0);
        assert!(integer.equiv(&float));
        assert_eq!(integer.hash_code(), float.hash_code());
        assert!(!integer.equiv(&Value::Float(42.5)));
    }

    #[rstest]
    fn test_annotation_is_invisible_to_equality() {
        let plain = Value::vector([Value::from(1)]);
        let annotated = Value::annotate(&plain, Value::keyword("tag"));
        assert_eq!(plain, annotated);
        assert_eq!(plain.hash_code(), annotated.hash_code());
        assert_eq!(annotated.type_tag(), TypeTag::Vector);
    }

    #[rstest]
    fn test_annotate_with_nil_strips_metadata() {
        let annotated = Value::annotate(&Value::empty_vector(), Value::from(true));
        assert!(matches!(
            Value::annotate(&annotated, Value::Nil),
            Value::Vector(_)
        ));
    }

    #[rstest]
    #[case(Value::Nil, false)]
    #[case(Value::Boolean(false), false)]
    #[case(Value::Integer(0), true)]
    #[case(Value::string(""), true)]
    #[case(Value::empty_list(), true)]
    fn test_truthiness(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_truthy(), expected);
    }

    #[rstest]
    fn test_obj_key_hash_matches_value_hash() {
        let key = Value::keyword("user/id");
        let obj_key = ObjKey::from_value(&key).unwrap();
        assert_eq!(obj_key.hash_code(), key.hash_code());
    }
}
