//! Options that drive how a record is mapped.
//!
//! [`MappingOptions`] is immutable once built and is shared unchanged by every
//! nested mapping call. Construct it with the builder or load it from
//! configuration:
//!
//! ```ignore
//! use bsonmap::options::MappingOptions;
//!
//! let options = MappingOptions::builder()
//!     .remove_identifier(true)
//!     .force_omit_empty(true)
//!     .build();
//!
//! let from_config = MappingOptions::from_json(r#"{ "remove_identifier": true }"#)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::MapperResult;

/// The reserved identifier key.
pub const ID_KEY: &str = "_id";

/// Switches consumed by the mapper.
///
/// All switches default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingOptions {
    use_identifier_if_present: bool,
    remove_identifier: bool,
    force_omit_empty: bool,
}

impl MappingOptions {
    /// Creates a new options builder for fluent construction.
    pub fn builder() -> MappingOptionsBuilder {
        MappingOptionsBuilder::new()
    }

    /// Options for building query filters: every empty field is omitted.
    pub fn filter() -> Self {
        Self::builder().force_omit_empty(true).build()
    }

    /// Options for building patch documents: every empty field is omitted and
    /// identifiers are never written.
    pub fn patch() -> Self {
        Self::builder()
            .force_omit_empty(true)
            .remove_identifier(true)
            .build()
    }

    /// Loads options from their JSON form. Missing switches default to `false`.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::Configuration`](crate::error::MapperError::Configuration)
    /// if the input is not a valid options object.
    pub fn from_json(input: &str) -> MapperResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// If a record's identifier is non-empty, the record maps to `{ "_id": <id> }`
    /// alone. Takes priority over every other option.
    pub fn use_identifier_if_present(&self) -> bool {
        self.use_identifier_if_present
    }

    /// Drops identifier fields at every nesting level.
    pub fn remove_identifier(&self) -> bool {
        self.remove_identifier
    }

    /// Treats every field as if it carried `omitempty`.
    pub fn force_omit_empty(&self) -> bool {
        self.force_omit_empty
    }
}

#[derive(Debug, Clone, Default)]
pub struct MappingOptionsBuilder {
    options: MappingOptions,
}

impl MappingOptionsBuilder {
    /// Creates a new builder with every switch off.
    pub fn new() -> Self {
        MappingOptionsBuilder {
            options: MappingOptions::default(),
        }
    }

    pub fn use_identifier_if_present(mut self, enabled: bool) -> Self {
        self.options.use_identifier_if_present = enabled;
        self
    }

    pub fn remove_identifier(mut self, enabled: bool) -> Self {
        self.options.remove_identifier = enabled;
        self
    }

    pub fn force_omit_empty(mut self, enabled: bool) -> Self {
        self.options.force_omit_empty = enabled;
        self
    }

    /// Builds and returns the final options.
    pub fn build(self) -> MappingOptions {
        self.options
    }
}
