//! Error types raised by runtime operations.
//!
//! Every failure is signalled eagerly at the point of violation and
//! propagated to the immediate caller. No operation leaves a partially
//! updated container behind: it either returns a complete new version or
//! an error with the original untouched.

use thiserror::Error;

use crate::protocol::{Operation, Protocol};

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors raised by protocol dispatch, containers and reference cells.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// No implementation of a protocol operation exists for the receiver at
    /// any dispatch tier.
    #[error("No protocol method {protocol}.{operation} defined for type {type_name}")]
    MissingImplementation {
        /// The protocol the operation belongs to.
        protocol: Protocol,
        /// The operation that was invoked.
        operation: Operation,
        /// Type name of the receiver.
        type_name: String,
    },

    /// Indexed access without a default beyond the valid range.
    #[error("Index {index} out of bounds for count {count}")]
    IndexOutOfBounds {
        /// The requested index.
        index: i64,
        /// Number of elements in the collection.
        count: usize,
    },

    /// Pop on an empty list, vector or subvec.
    #[error("Can't pop empty {type_name}")]
    EmptyCollection {
        /// Name of the collection type.
        type_name: &'static str,
    },

    /// A reference cell's validator rejected a candidate state.
    #[error("Validator rejected reference state {value}")]
    ValidationRejected {
        /// Printed form of the rejected candidate.
        value: String,
    },

    /// An argument has the wrong shape for the operation.
    #[error("Invalid argument to {operation}: {message}")]
    InvalidArgument {
        /// Name of the operation.
        operation: &'static str,
        /// What was wrong with the argument.
        message: String,
    },

    /// A non-function value was invoked.
    #[error("{type_name} cannot be invoked as a function")]
    NotCallable {
        /// Type name of the invoked value.
        type_name: String,
    },

    /// A protocol method or function received an unsupported argument count.
    #[error("Wrong number of arguments ({actual}) passed to {name}, expected {expected}")]
    ArityMismatch {
        /// Name of the operation or function.
        name: String,
        /// Human readable description of the accepted counts.
        expected: &'static str,
        /// Number of arguments actually passed.
        actual: usize,
    },
}

impl RuntimeError {
    /// Builds an [`RuntimeError::IndexOutOfBounds`] from an unsigned index.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, count: usize) -> Self {
        Self::IndexOutOfBounds {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            count,
        }
    }

    /// Builds an [`RuntimeError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(operation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            message: message.into(),
        }
    }

    /// Builds an [`RuntimeError::ArityMismatch`].
    #[must_use]
    pub fn arity(name: impl Into<String>, expected: &'static str, actual: usize) -> Self {
        Self::ArityMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Builds an [`RuntimeError::MissingImplementation`] for `operation`.
    #[must_use]
    pub fn missing(operation: Operation, type_name: impl Into<String>) -> Self {
        Self::MissingImplementation {
            protocol: operation.protocol(),
            operation,
            type_name: type_name.into(),
        }
    }
}
