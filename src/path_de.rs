//! Projection onto caller-defined serde types.
//!
//! The compile-time route is [`typed`](crate::typed). When the target type
//! already exists as a `Deserialize` struct, [`decode`] validates against a
//! runtime schema first and then deserializes, with JSON-path context on any
//! disagreement between the two.
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::ValidationError;
use crate::schema::Schema;
use crate::validate::Validator;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The value conforms to the schema but not to the target type.
    #[error("at JSON path {path} → {message}")]
    Deserialize { path: String, message: String },
}

pub fn decode<T: DeserializeOwned>(schema: &Schema, value: Value) -> Result<T, DecodeError> {
    decode_with(&Validator::default(), schema, value)
}

pub fn decode_with<T: DeserializeOwned>(
    validator: &Validator,
    schema: &Schema,
    value: Value,
) -> Result<T, DecodeError> {
    validator.validate(schema, &value)?;
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(DecodeError::Deserialize { path, message: err.into_inner().to_string() })
        }
    }
}
