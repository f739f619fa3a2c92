//! Convenient re-exports of commonly used types from bsonmap.
//!
//! Import this prelude module to quickly access the most frequently used types
//! and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use bsonmap::prelude::*;
//! ```
//!
//! This provides access to:
//! - The `Record` trait and derive macro
//! - The mapper handle and entry points
//! - Mapping options
//! - Error types
//! - The BSON document types the mapper produces

pub use bsonmap_core::{
    error::{MapperError, MapperResult},
    mapper::{RecordExt, RecordMapper, map_value, to_document},
    options::{MappingOptions, MappingOptionsBuilder},
    record::Record,
    value::FieldValue,
};

pub use bsonmap_macros::Record;

pub use bson::{Bson, Document, doc, oid::ObjectId};
