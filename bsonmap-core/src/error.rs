//! Error types and result types for record mapping.
//!
//! Mapping itself signals "nothing to map" with `Ok(None)`, never with an error.
//! [`MapperError`] only covers values that cannot be encoded as BSON and
//! misuse of the process-wide configuration.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur while mapping a record.
#[derive(Error, Debug)]
pub enum MapperError {
    /// A raw field value could not be encoded as BSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The process-wide configuration was initialized more than once.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// Mapping options could not be loaded from their serialized form.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A specialized `Result` type for mapping operations.
pub type MapperResult<T> = Result<T, MapperError>;

impl From<BsonError> for MapperError {
    fn from(err: BsonError) -> Self {
        MapperError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for MapperError {
    fn from(err: SerdeJsonError) -> Self {
        MapperError::Configuration(err.to_string())
    }
}
