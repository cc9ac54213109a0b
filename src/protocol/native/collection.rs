//! Countable, Indexed, Lookupable, Associative, Collection and Stack for the
//! built-in containers.

use super::{check_arity, count_value, index_argument, position};
use crate::error::{Result, RuntimeError};
use crate::persistent::PersistentList;
use crate::protocol::Operation;
use crate::runtime::Runtime;
use crate::value::{Value, map};

pub(super) fn count(runtime: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Count, args, 0, 0, "0")?;
    if let Some(count) = receiver.counted_len() {
        return Ok(count_value(count));
    }
    let mut count = 0_usize;
    for element in runtime.iter(receiver) {
        element?;
        count += 1;
    }
    Ok(count_value(count))
}

/// Indexed access. A receiver without a known length is walked at most up to
/// `index`; its reported count is then the number of elements observed.
pub(super) fn nth(runtime: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Nth, args, 1, 2, "1 or 2")?;
    let index = index_argument(Operation::Nth, &args[0])?;
    let found = match usize::try_from(index) {
        Err(_) => Err(receiver.counted_len().unwrap_or(0)),
        Ok(position) => match receiver {
            Value::Vector(vector) => vector.get(position).cloned().ok_or(vector.len()),
            Value::Subvec(subvec) => subvec.get(position).cloned().ok_or(subvec.len()),
            Value::List(list) => list.get(position).cloned().ok_or(list.len()),
            Value::Range(range) => range.get(position).map(Value::Integer).ok_or(range.len()),
            Value::IndexedSeq(indexed) => indexed.get(position).cloned().ok_or(indexed.len()),
            _ => walk_to(runtime, receiver, position)?,
        },
    };
    match (found, args.get(1)) {
        (Ok(element), _) => Ok(element),
        (Err(_), Some(default)) => Ok(default.clone()),
        (Err(count), None) => Err(RuntimeError::IndexOutOfBounds { index, count }),
    }
}

/// Walks to `position`, returning the element or the number of elements
/// seen before the seq ran out.
fn walk_to(runtime: &Runtime, receiver: &Value, position: usize) -> Result<std::result::Result<Value, usize>> {
    let mut visited = 0_usize;
    for element in runtime.iter(receiver) {
        let element = element?;
        if visited == position {
            return Ok(Ok(element));
        }
        visited += 1;
    }
    Ok(Err(visited))
}

pub(super) fn lookup(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Lookup, args, 1, 2, "1 or 2")?;
    let key = &args[0];
    let found = match receiver {
        Value::Vector(vector) => key
            .as_integer()
            .and_then(|index| position(index, vector.len()))
            .and_then(|index| vector.get(index)),
        Value::Subvec(subvec) => key
            .as_integer()
            .and_then(|index| position(index, subvec.len()))
            .and_then(|index| subvec.get(index)),
        Value::Set(set) => set.get(key),
        other => map::lookup(other, key),
    };
    Ok(found
        .or_else(|| args.get(1))
        .cloned()
        .unwrap_or(Value::Nil))
}

pub(super) fn assoc(runtime: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Assoc, args, 2, 2, "2")?;
    let (key, value) = (&args[0], &args[1]);
    match receiver {
        Value::Vector(vector) => {
            let index = vector_index(key, vector.len())?;
            vector.assoc(index, value.clone()).map(Value::Vector)
        }
        Value::Subvec(subvec) => {
            let index = vector_index(key, subvec.len())?;
            subvec.assoc(index, value.clone()).map(Value::Subvec)
        }
        other => Ok(map::assoc(
            other,
            key.clone(),
            value.clone(),
            runtime.config().hash_map_threshold,
        )),
    }
}

fn vector_index(key: &Value, count: usize) -> Result<usize> {
    let index = key.as_integer().ok_or_else(|| {
        RuntimeError::invalid_argument(
            "assoc",
            format!("vector key must be an integer, got {}", key.type_name()),
        )
    })?;
    usize::try_from(index).map_err(|_| RuntimeError::IndexOutOfBounds { index, count })
}

pub(super) fn contains_key(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::ContainsKey, args, 1, 1, "1")?;
    let key = &args[0];
    let contained = match receiver {
        Value::Vector(vector) => key
            .as_integer()
            .and_then(|index| position(index, vector.len()))
            .is_some(),
        Value::Subvec(subvec) => key
            .as_integer()
            .and_then(|index| position(index, subvec.len()))
            .is_some(),
        Value::Set(set) => set.contains(key),
        other => map::lookup(other, key).is_some(),
    };
    Ok(Value::Boolean(contained))
}

pub(super) fn dissoc(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Dissoc, args, 1, 1, "1")?;
    Ok(map::dissoc(receiver, &args[0]))
}

pub(super) fn disjoin(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Disjoin, args, 1, 1, "1")?;
    Ok(match receiver {
        Value::Set(set) => Value::Set(set.disj(&args[0])),
        other => other.clone(),
    })
}

pub(super) fn conj(runtime: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Conj, args, 1, 1, "1")?;
    let element = args[0].clone();
    match receiver {
        Value::List(list) => Ok(Value::List(list.cons(element))),
        Value::Vector(vector) => Ok(Value::Vector(vector.conj(element))),
        Value::Subvec(subvec) => subvec.conj(element).map(Value::Subvec),
        Value::Queue(queue) => Ok(Value::Queue(queue.conj(element))),
        Value::Set(set) => Ok(Value::Set(set.conj(element))),
        Value::ObjMap(_) | Value::HashMap(_) => conj_entry(runtime, receiver, &element),
        _ => Ok(Value::cons(element, receiver.clone())),
    }
}

/// Adds a `[key value]` entry, or every entry of another map.
fn conj_entry(runtime: &Runtime, receiver: &Value, entry: &Value) -> Result<Value> {
    let threshold = runtime.config().hash_map_threshold;
    if entry.is_map() {
        return Ok(map::entries(entry).fold(receiver.clone(), |merged, (key, value)| {
            map::assoc(&merged, key, value.clone(), threshold)
        }));
    }
    let pair = match entry.unannotated() {
        Value::Vector(vector) if vector.len() == 2 => vector.as_slice(),
        Value::Subvec(subvec) if subvec.len() == 2 => subvec.as_slice(),
        other => {
            return Err(RuntimeError::invalid_argument(
                "conj",
                format!("map entry must be a two element vector, got {}", other.type_name()),
            ));
        }
    };
    Ok(map::assoc(receiver, pair[0].clone(), pair[1].clone(), threshold))
}

pub(super) fn empty(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Empty, args, 0, 0, "0")?;
    Ok(match receiver {
        Value::Vector(_) | Value::Subvec(_) => Value::empty_vector(),
        Value::ObjMap(_) => Value::empty_map(),
        Value::HashMap(_) => Value::empty_hash_map(),
        Value::Set(_) => Value::empty_set(),
        Value::Queue(_) => Value::empty_queue(),
        _ => Value::List(PersistentList::new()),
    })
}

pub(super) fn peek(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Peek, args, 0, 0, "0")?;
    let top = match receiver {
        Value::List(list) => list.peek(),
        Value::Vector(vector) => vector.peek(),
        Value::Subvec(subvec) => subvec.peek(),
        Value::Queue(queue) => queue.peek(),
        _ => None,
    };
    Ok(top.cloned().unwrap_or(Value::Nil))
}

pub(super) fn pop(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Pop, args, 0, 0, "0")?;
    match receiver {
        Value::List(list) => list.pop().map(Value::List),
        Value::Vector(vector) => vector.pop().map(Value::Vector),
        Value::Subvec(subvec) => subvec.pop().map(Value::Subvec),
        Value::Queue(queue) => Ok(Value::Queue(queue.pop())),
        other => Ok(other.clone()),
    }
}
