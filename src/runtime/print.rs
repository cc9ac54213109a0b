//! Printed representations.
//!
//! The outer form of every built-in value is produced here; elements are
//! printed back through [`Runtime::render`] so registry and object hooks
//! apply at every depth.

use std::fmt::Write as _;

use super::Runtime;
use crate::error::{Result, RuntimeError};
use crate::protocol::Operation;
use crate::protocol::native::check_arity;
use crate::value::{Value, map};

/// Marker appended when `print_length` cuts a collection short.
const ELLIPSIS: &str = "...";

/// Printable for every built-in value.
pub(crate) fn print_native(runtime: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    let readable = readable(args)?;
    let printed = match receiver.unannotated() {
        Value::Nil => "nil".to_string(),
        Value::Boolean(flag) => flag.to_string(),
        Value::Integer(number) => number.to_string(),
        Value::Float(number) => float(*number),
        Value::String(text) if readable => escape(text),
        Value::String(text) => text.to_string(),
        Value::Keyword(keyword) => keyword.to_string(),
        Value::Bytes(bytes) => {
            let octets = bytes.iter().map(|byte| Ok(byte.to_string()));
            delimited(runtime, "#bytes [", "]", " ", octets)?
        }
        Value::Vector(_) | Value::Subvec(_) => {
            delimited(runtime, "[", "]", " ", elements(runtime, receiver, readable))?
        }
        Value::Set(_) => delimited(runtime, "#{", "}", " ", elements(runtime, receiver, readable))?,
        Value::Queue(_) => {
            delimited(runtime, "#queue [", "]", " ", elements(runtime, receiver, readable))?
        }
        Value::ObjMap(_) | Value::HashMap(_) => {
            let entries = map::entries(receiver).map(|(key, value)| {
                Ok(format!(
                    "{} {}",
                    runtime.render(&key, readable)?,
                    runtime.render(value, readable)?
                ))
            });
            delimited(runtime, "{", "}", ", ", entries)?
        }
        Value::List(_)
        | Value::Range(_)
        | Value::Cons(_)
        | Value::IndexedSeq(_)
        | Value::LazySeq(_) => {
            delimited(runtime, "(", ")", " ", elements(runtime, receiver, readable))?
        }
        Value::Atom(atom) => format!("#<Atom: {}>", runtime.render(&atom.deref(), readable)?),
        Value::Reduced(inner) => format!("#<Reduced: {}>", runtime.render(inner, readable)?),
        Value::Function(function) => match function.name() {
            Some(name) => format!("#<Function {name}>"),
            None => "#<Function>".to_string(),
        },
        Value::Object(_) | Value::Annotated(_) => opaque(receiver),
    };
    Ok(Value::from(printed))
}

/// The wildcard Printable: `#<TypeName>`.
pub(crate) fn print_opaque(_: &Runtime, receiver: &Value, args: &[Value]) -> Result<Value> {
    readable(args)?;
    Ok(Value::from(opaque(receiver)))
}

fn opaque(receiver: &Value) -> String {
    format!("#<{}>", receiver.type_name())
}

fn readable(args: &[Value]) -> Result<bool> {
    check_arity(Operation::Print, args, 0, 1, "0 or 1")?;
    Ok(args.first().is_none_or(Value::is_truthy))
}

fn elements(
    runtime: &Runtime,
    collection: &Value,
    readable: bool,
) -> impl Iterator<Item = Result<String>> {
    runtime
        .iter(collection)
        .map(move |element| runtime.render(&element?, readable))
}

/// Joins printed items between `open` and `close`, honouring `print_length`.
fn delimited<I>(
    runtime: &Runtime,
    open: &str,
    close: &str,
    separator: &str,
    items: I,
) -> Result<String>
where
    I: Iterator<Item = Result<String>>,
{
    let limit = runtime.config().print_length;
    let mut printed = String::from(open);
    for (index, item) in items.enumerate() {
        if index > 0 {
            printed.push_str(separator);
        }
        if limit.is_some_and(|limit| index >= limit) {
            printed.push_str(ELLIPSIS);
            break;
        }
        printed.push_str(&item?);
    }
    printed.push_str(close);
    Ok(printed)
}

fn float(number: f64) -> String {
    if number.is_nan() {
        "##NaN".to_string()
    } else if number.is_infinite() {
        if number > 0.0 { "##Inf" } else { "##-Inf" }.to_string()
    } else {
        format!("{number:?}")
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('"');
    for character in text.chars() {
        match character {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            control if control.is_control() => {
                let _ = write!(escaped, "\\u{:04x}", u32::from(control));
            }
            other => escaped.push(other),
        }
    }
    escaped.push('"');
    escaped
}

/// Extracts the string a Printable implementation returned.
pub(super) fn printed_text(value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.to_string()),
        other => Err(RuntimeError::invalid_argument(
            "print",
            format!("print must return a string, got {}", other.type_name()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.5, "1.5")]
    #[case(2.0, "2.0")]
    #[case(f64::INFINITY, "##Inf")]
    #[case(f64::NEG_INFINITY, "##-Inf")]
    #[case(f64::NAN, "##NaN")]
    fn test_float(#[case] number: f64, #[case] expected: &str) {
        assert_eq!(float(number), expected);
    }

    #[rstest]
    fn test_escape_quotes_and_newlines() {
        assert_eq!(escape("a\"b\nc"), "\"a\\\"b\\nc\"");
    }
}
