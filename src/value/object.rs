//! User-defined types participating in protocol dispatch.

use std::any::Any;
use std::fmt;

use crate::protocol::{Method, Operation};

/// A user-defined value type.
///
/// Implementors are wrapped in [`Value::Object`](super::Value::Object) and
/// take part in every generic operation. Dispatch asks
/// [`Object::implementation`] first, then the registry entries for
/// [`TypeTag::Object`](super::TypeTag::Object), then the wildcard defaults.
///
/// # Examples
///
/// ```rust
/// use std::any::Any;
/// use std::sync::Arc;
///
/// use persistent_runtime::prelude::*;
///
/// #[derive(Debug)]
/// struct Pair(Value, Value);
///
/// impl Object for Pair {
///     fn type_name(&self) -> &str {
///         "Pair"
///     }
///
///     fn implementation(&self, operation: Operation) -> Option<Method> {
///         match operation {
///             Operation::Count => Some(Arc::new(|_, _, _| Ok(Value::Integer(2)))),
///             _ => None,
///         }
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let runtime = Runtime::new();
/// let pair = Value::object(Pair(Value::Integer(1), Value::Integer(2)));
/// assert_eq!(runtime.count(&pair).unwrap(), 2);
/// assert!(runtime.first(&pair).is_err());
/// ```
pub trait Object: fmt::Debug + Send + Sync {
    /// Name reported in errors and in the default printed form.
    fn type_name(&self) -> &str;

    /// Returns the implementation of `operation` this type carries.
    fn implementation(&self, operation: Operation) -> Option<Method> {
        let _ = operation;
        None
    }

    /// Structural equality with another object.
    ///
    /// Only consulted when the two values are not the same allocation.
    fn equiv(&self, other: &dyn Object) -> bool {
        let _ = other;
        false
    }

    /// Structural hash; `None` selects the identity hash.
    fn hash_code(&self) -> Option<i32> {
        None
    }

    /// Upcast for downcasting in implementations.
    fn as_any(&self) -> &dyn Any;
}
