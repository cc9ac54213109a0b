//! Seqable, Sequential and Reducible for the built-in containers.

use super::check_arity;
use crate::error::Result;
use crate::protocol::Operation;
use crate::runtime::Runtime;
use crate::seq;
use crate::value::Value;

pub(super) fn seq(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Seq, args, 0, 0, "0")?;
    seq::seq(receiver)
}

pub(super) fn first(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::First, args, 0, 0, "0")?;
    seq::first(receiver)
}

pub(super) fn rest(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Rest, args, 0, 0, "0")?;
    seq::rest(receiver)
}

/// Folds the elements of any seqable with `args[0]`.
///
/// Without an initial value the first element seeds the fold, and an empty
/// collection yields `f()`. A [`Value::Reduced`] accumulator stops the fold
/// and is unwrapped.
pub(crate) fn reduce(runtime: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity(Operation::Reduce, args, 1, 2, "1 or 2")?;
    let function = &args[0];
    let mut elements = runtime.iter(receiver);
    let mut accumulator = match args.get(1) {
        Some(init) => init.clone(),
        None => match elements.next() {
            Some(head) => head?,
            None => return runtime.invoke(function, &[]),
        },
    };
    for element in elements {
        if let Value::Reduced(inner) = accumulator {
            return Ok((*inner).clone());
        }
        accumulator = runtime.invoke(function, &[accumulator, element?])?;
    }
    Ok(match accumulator {
        Value::Reduced(inner) => (*inner).clone(),
        other => other,
    })
}
