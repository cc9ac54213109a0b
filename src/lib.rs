//! # persistent-runtime
//!
//! Persistent, structurally shared collections accessed through a
//! protocol-based dispatch mechanism.
//!
//! ## Overview
//!
//! The crate is organised in layers, leaves first:
//!
//! - **Equality & Hashing**: [`Equiv`](equality::Equiv) and
//!   [`HashCode`](equality::HashCode) with the seeded hash combiner
//! - **Persistent Containers**: List, Vector, Subvec, `ObjMap`, `HashMap`,
//!   `HashSet`, Queue and Range, each returning new versions on update
//! - **Values**: the closed [`Value`](value::Value) variant that every
//!   generic operation accepts
//! - **Sequences**: cons cells, indexed seqs and memoizing lazy seqs
//! - **Protocols**: capability bundles resolved per type, per type tag, then
//!   through a wildcard default
//! - **Runtime**: the context object owning the protocol registry and the
//!   configuration; all generic operations are methods on it
//! - **Atom**: a validated, watch-notified mutable reference cell
//!
//! ## Example
//!
//! ```rust
//! use persistent_runtime::prelude::*;
//!
//! let runtime = Runtime::new();
//! let vector = runtime
//!     .conj(&Value::empty_vector(), &[Value::from("a"), Value::from("b")])
//!     .unwrap();
//!
//! assert_eq!(runtime.count(&vector).unwrap(), 2);
//! let popped = runtime.pop(&vector).unwrap();
//! assert_eq!(popped, Value::vector([Value::from("a")]));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the runtime, the value model and the error type.
///
/// # Usage
///
/// ```rust
/// use persistent_runtime::prelude::*;
/// ```
pub mod prelude {
    pub use crate::atom::Atom;
    pub use crate::config::RuntimeConfig;
    pub use crate::equality::{Equiv, HashCode};
    pub use crate::error::{Result, RuntimeError};
    pub use crate::persistent::*;
    pub use crate::protocol::{DispatchKey, Method, Operation, Protocol};
    pub use crate::runtime::Runtime;
    pub use crate::seq::{Cons, IndexedSeq, LazySeq};
    pub use crate::value::{Function, Keyword, ObjKey, Object, TypeTag, Value};
}

pub mod atom;
pub mod config;
pub mod equality;
pub mod error;
pub mod persistent;
pub mod protocol;
pub mod runtime;
pub mod seq;
pub mod value;
