//! Core registry entries for the primitive types and the wildcard defaults.
//!
//! Nil behaves as the empty collection: it counts zero, seqs to nil and
//! grows into a list or map. Strings index and seq by character, bytes by
//! octet.

use std::sync::Arc;

use super::native::{check_arity, count_value, index_argument, position, reduce};
use super::{NativeMethod, Operation};
use crate::equality::{Equiv, HashCode};
use crate::error::{Result, RuntimeError};
use crate::runtime::{Runtime, print};
use crate::seq;
use crate::value::{TypeTag, Value, map};

/// Per-tag entries installed by [`Registry::core`](super::Registry::core).
pub(super) const ENTRIES: &[(TypeTag, Operation, NativeMethod)] = &[
    (TypeTag::Nil, Operation::Count, nil_count),
    (TypeTag::Nil, Operation::Nth, nil_nth),
    (TypeTag::Nil, Operation::Lookup, nil_lookup),
    (TypeTag::Nil, Operation::Assoc, nil_assoc),
    (TypeTag::Nil, Operation::ContainsKey, nil_contains_key),
    (TypeTag::Nil, Operation::Dissoc, nil_unchanged),
    (TypeTag::Nil, Operation::Conj, nil_conj),
    (TypeTag::Nil, Operation::Empty, nil_unchanged),
    (TypeTag::Nil, Operation::Peek, nil_unchanged),
    (TypeTag::Nil, Operation::Pop, nil_unchanged),
    (TypeTag::Nil, Operation::Seq, nil_unchanged),
    (TypeTag::Nil, Operation::First, nil_unchanged),
    (TypeTag::Nil, Operation::Rest, nil_rest),
    (TypeTag::Nil, Operation::Reduce, reduce),
    (TypeTag::Nil, Operation::Print, print::print_native),
    (TypeTag::String, Operation::Count, text_count),
    (TypeTag::String, Operation::Nth, text_nth),
    (TypeTag::String, Operation::Lookup, text_lookup),
    (TypeTag::String, Operation::Seq, builtin_seq),
    (TypeTag::String, Operation::Reduce, reduce),
    (TypeTag::String, Operation::Print, print::print_native),
    (TypeTag::Bytes, Operation::Count, bytes_count),
    (TypeTag::Bytes, Operation::Nth, bytes_nth),
    (TypeTag::Bytes, Operation::Lookup, bytes_lookup),
    (TypeTag::Bytes, Operation::Seq, builtin_seq),
    (TypeTag::Bytes, Operation::Reduce, reduce),
    (TypeTag::Bytes, Operation::Print, print::print_native),
    (TypeTag::Number, Operation::Print, print::print_native),
    (TypeTag::Boolean, Operation::Print, print::print_native),
    (TypeTag::Keyword, Operation::Print, print::print_native),
];

/// Wildcard entries installed by [`Registry::core`](super::Registry::core).
pub(super) const DEFAULTS: &[(Operation, NativeMethod)] = &[
    (Operation::Equiv, structural_equiv),
    (Operation::Hash, structural_hash),
    (Operation::Print, print::print_opaque),
];

// =============================================================================
// Nil
// =============================================================================

fn nil_count(_: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Count, args, 0, 0, "0")?;
    Ok(Value::Integer(0))
}

fn nil_nth(_: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Nth, args, 1, 2, "1 or 2")?;
    let index = index_argument(Operation::Nth, &args[0])?;
    args.get(1)
        .cloned()
        .ok_or(RuntimeError::IndexOutOfBounds { index, count: 0 })
}

fn nil_lookup(_: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Lookup, args, 1, 2, "1 or 2")?;
    Ok(args.get(1).cloned().unwrap_or(Value::Nil))
}

fn nil_assoc(runtime: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Assoc, args, 2, 2, "2")?;
    Ok(map::assoc(
        &Value::Nil,
        args[0].clone(),
        args[1].clone(),
        runtime.config().hash_map_threshold,
    ))
}

fn nil_contains_key(_: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::ContainsKey, args, 1, 1, "1")?;
    Ok(Value::Boolean(false))
}

fn nil_conj(_: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Conj, args, 1, 1, "1")?;
    Ok(Value::list([args[0].clone()]))
}

fn nil_rest(_: &Runtime, _: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Rest, args, 0, 0, "0")?;
    Ok(Value::empty_list())
}

/// Dissoc, empty, peek, pop, seq and first of nil are all nil.
fn nil_unchanged(_: &Runtime, _: &Value, _: &[Value]) -> Result<Value> {
    Ok(Value::Nil)
}

// =============================================================================
// Strings & bytes
// =============================================================================

fn text(receiver: &Value) -> &str {
    receiver.as_str().unwrap_or_default()
}

fn octets(receiver: &Value) -> &[u8] {
    match receiver.unannotated() {
        Value::Bytes(bytes) => &bytes[..],
        _ => &[],
    }
}

fn character(text: &str, index: usize) -> Option<Value> {
    text.chars()
        .nth(index)
        .map(|character| Value::String(Arc::from(character.to_string())))
}

fn text_count(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Count, args, 0, 0, "0")?;
    Ok(count_value(text(receiver).chars().count()))
}

fn text_nth(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Nth, args, 1, 2, "1 or 2")?;
    let index = index_argument(Operation::Nth, &args[0])?;
    let found = usize::try_from(index)
        .ok()
        .and_then(|index| character(text(receiver), index));
    or_default(found, args.get(1), index, || text(receiver).chars().count())
}

fn text_lookup(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Lookup, args, 1, 2, "1 or 2")?;
    let found = args[0]
        .as_integer()
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| character(text(receiver), index));
    Ok(found.or_else(|| args.get(1).cloned()).unwrap_or(Value::Nil))
}

fn bytes_count(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Count, args, 0, 0, "0")?;
    Ok(count_value(octets(receiver).len()))
}

fn octet(bytes: &[u8], index: i64) -> Option<Value> {
    position(index, bytes.len()).map(|index| Value::Integer(i64::from(bytes[index])))
}

fn bytes_nth(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Nth, args, 1, 2, "1 or 2")?;
    let index = index_argument(Operation::Nth, &args[0])?;
    let bytes = octets(receiver);
    or_default(octet(bytes, index), args.get(1), index, || bytes.len())
}

fn bytes_lookup(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Lookup, args, 1, 2, "1 or 2")?;
    let found = args[0]
        .as_integer()
        .and_then(|index| octet(octets(receiver), index));
    Ok(found.or_else(|| args.get(1).cloned()).unwrap_or(Value::Nil))
}

fn builtin_seq(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Seq, args, 0, 0, "0")?;
    seq::seq(receiver)
}

fn or_default<F>(found: Option<Value>, default: Option<&Value>, index: i64, count: F) -> Result<Value>
where
    F: FnOnce() -> usize,
{
    match (found, default) {
        (Some(element), _) => Ok(element),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(RuntimeError::IndexOutOfBounds {
            index,
            count: count(),
        }),
    }
}

// =============================================================================
// Wildcard defaults
// =============================================================================

fn structural_equiv(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Equiv, args, 1, 1, "1")?;
    Ok(Value::Boolean(receiver.equiv(&args[0])))
}

fn structural_hash(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Hash, args, 0, 0, "0")?;
    Ok(Value::Integer(i64::from(receiver.hash_code())))
}
