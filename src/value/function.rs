//! Host functions callable through [`Runtime::invoke`](crate::runtime::Runtime::invoke).

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::error::Result;
use crate::runtime::Runtime;

/// The body of a [`Function`].
pub type FunctionBody = dyn Fn(&Runtime, &[Value]) -> Result<Value> + Send + Sync;

/// A named or anonymous function value.
///
/// Functions compare by identity: two clones of the same function are equal,
/// two separately constructed functions never are.
///
/// # Examples
///
/// ```rust
/// use persistent_runtime::prelude::*;
///
/// let runtime = Runtime::new();
/// let increment = Value::function("inc", |_, args| match args {
///     [Value::Integer(n)] => Ok(Value::Integer(n + 1)),
///     _ => Err(RuntimeError::arity("inc", "1", args.len())),
/// });
/// assert_eq!(runtime.invoke(&increment, &[Value::Integer(1)]).unwrap(), Value::Integer(2));
/// ```
#[derive(Clone)]
pub struct Function {
    name: Option<Arc<str>>,
    body: Arc<FunctionBody>,
}

impl Function {
    /// Creates a named function.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&Runtime, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Some(Arc::from(name)),
            body: Arc::new(body),
        }
    }

    /// Creates an anonymous function.
    pub fn anonymous<F>(body: F) -> Self
    where
        F: Fn(&Runtime, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: None,
            body: Arc::new(body),
        }
    }

    /// Returns the function's name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Calls the function.
    ///
    /// # Errors
    ///
    /// Propagates whatever the body returns.
    pub fn call(&self, runtime: &Runtime, args: &[Value]) -> Result<Value> {
        (self.body)(runtime, args)
    }

    /// Returns `true` if both are the same function.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.body, &other.body)
    }

    pub(crate) fn identity_hash(&self) -> i32 {
        super::identity_hash(Arc::as_ptr(&self.body).cast::<()>())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(formatter, "#<Function {name}>"),
            None => formatter.write_str("#<Function>"),
        }
    }
}
