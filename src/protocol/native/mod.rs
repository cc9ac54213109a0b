//! Tier-one implementations carried by the built-in container and seq types.
//!
//! [`resolve`] is a closed table: a built-in type either implements an
//! operation here or falls through to the registry. Registry entries for
//! these types therefore only fill gaps; they never shadow a native method.

mod collection;
mod sequence;

pub(crate) use sequence::reduce;

use super::{NativeMethod, Operation};
use crate::error::{Result, RuntimeError};
use crate::runtime::{Runtime, print};
use crate::value::{TypeTag, Value};

/// Returns the native implementation of `operation` for `receiver`.
pub(crate) fn resolve(operation: Operation, receiver: &Value) -> Option<NativeMethod> {
    use Operation as Op;
    use TypeTag as Tag;

    let tag = receiver.type_tag();
    let seq_like = matches!(
        tag,
        Tag::List | Tag::Cons | Tag::IndexedSeq | Tag::LazySeq | Tag::Range
    );
    let vector_like = matches!(tag, Tag::Vector | Tag::Subvec);
    let map_like = matches!(tag, Tag::ObjMap | Tag::HashMap);
    let collection = seq_like || vector_like || map_like || matches!(tag, Tag::Set | Tag::Queue);

    let method: NativeMethod = match operation {
        Op::Count if collection => collection::count,
        Op::Conj if collection => collection::conj,
        Op::Empty if collection => collection::empty,
        Op::Seq if collection => sequence::seq,
        Op::Reduce if collection => sequence::reduce,
        Op::Nth if seq_like || vector_like || tag == Tag::Queue => collection::nth,
        Op::Lookup if vector_like || map_like || tag == Tag::Set => collection::lookup,
        Op::Assoc if vector_like || map_like => collection::assoc,
        Op::ContainsKey if vector_like || map_like || tag == Tag::Set => collection::contains_key,
        Op::Dissoc if map_like => collection::dissoc,
        Op::Disjoin if tag == Tag::Set => collection::disjoin,
        Op::Peek if vector_like || matches!(tag, Tag::List | Tag::Queue) => collection::peek,
        Op::Pop if vector_like || matches!(tag, Tag::List | Tag::Queue) => collection::pop,
        Op::First if seq_like => sequence::first,
        Op::Rest if seq_like => sequence::rest,
        Op::Meta if collection || matches!(tag, Tag::Function | Tag::Atom) => meta,
        Op::WithMeta if collection || matches!(tag, Tag::Function | Tag::Atom) => with_meta,
        Op::Deref if matches!(tag, Tag::Atom | Tag::Reduced) => deref,
        Op::Print if collection || matches!(tag, Tag::Function | Tag::Atom | Tag::Reduced) => {
            print::print_native
        }
        _ => return None,
    };
    Some(method)
}

// =============================================================================
// Argument helpers
// =============================================================================

/// Checks that `args` holds between `min` and `max` arguments.
pub(crate) fn check_arity(
    operation: Operation,
    args: &[Value],
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<()> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(RuntimeError::arity(operation.name(), expected, args.len()))
    }
}

/// Reads an integer index argument.
pub(crate) fn index_argument(operation: Operation, index: &Value) -> Result<i64> {
    index.as_integer().ok_or_else(|| {
        RuntimeError::invalid_argument(
            operation.name(),
            format!("index must be an integer, got {}", index.type_name()),
        )
    })
}

/// Converts `index` to a position below `count`.
pub(crate) fn position(index: i64, count: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|position| *position < count)
}

/// Converts a length to an integer value.
pub(crate) fn count_value(count: usize) -> Value {
    Value::Integer(i64::try_from(count).unwrap_or(i64::MAX))
}

// =============================================================================
// Meta & Deref
// =============================================================================

fn meta(_: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Meta, args, 0, 0, "0")?;
    Ok(Value::Nil)
}

fn with_meta(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::WithMeta, args, 1, 1, "1")?;
    Ok(Value::annotate(receiver, args[0].clone()))
}

fn deref(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Deref, args, 0, 0, "0")?;
    Ok(match receiver {
        Value::Atom(atom) => atom.deref(),
        Value::Reduced(inner) => (**inner).clone(),
        _ => Value::Nil,
    })
}
