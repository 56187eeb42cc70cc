//! Describe the expected shape of untyped JSON data and check values against it.
//!
//! - [`schema`]: the immutable schema tree and its constructors.
//! - [`validate`]: the validator; failures are values with a full path.
//! - [`typed`]: compile-time projection from a schema to the Rust type of the
//!   values it accepts.
//! - [`path_de`]: projection onto existing serde types.
//! - [`inference`]: derive a schema from sample documents.
//!
//! ```
//! use json_shape::schema::{array, number, object, string};
//! use serde_json::json;
//!
//! let people = array(object([("name", string()), ("age", number())]));
//! let err = people
//!     .validate(&json!([{"name": "a", "age": 1}, {"name": "b", "age": "2"}]))
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "index 1: property age: expected number, got string");
//! assert_eq!(err.path().pointer(), "/1/age");
//! ```
pub mod error;
pub mod inference;
pub mod kind;
pub mod path_de;
pub mod schema;
pub mod typed;
pub mod validate;

pub use error::{ErrorKind, Path, PathSegment, SchemaError, ValidationError};
pub use kind::Kind;
pub use schema::{Literal, Schema};
pub use validate::{validate, Config, Outcome, Validator};

// used by `record!` / `literal!` expansions
#[doc(hidden)]
pub use serde_json;
