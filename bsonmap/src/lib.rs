//! Main bsonmap crate: project typed records into BSON documents.
//!
//! This crate is the primary entry point for users of bsonmap. It re-exports
//! the core types and functionality from `bsonmap-core` together with the
//! `#[derive(Record)]` macro.
//!
//! # Features
//!
//! - **Per-field directives** - Rename, omit, flatten or stringify fields through `#[bsonmap(...)]`
//! - **Recursive mapping** - Nested records, maps of records and sequences of records become documents
//! - **Filter and patch presets** - Skip empty values and identifiers without touching the record
//!
//! # Quick Start
//!
//! ```ignore
//! use bsonmap::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Record)]
//! pub struct Characteristics {
//!     #[bsonmap(bson = "leftHanded")]
//!     pub left_handed: bool,
//!     #[bsonmap(bson = "tall")]
//!     pub tall: bool,
//! }
//!
//! #[derive(Serialize, Record)]
//! pub struct User {
//!     #[bsonmap(bson = "_id")]
//!     pub id: ObjectId,
//!     #[bsonmap(bson = "firstName")]
//!     pub first_name: String,
//!     #[bsonmap(bson = "lastName,omitempty")]
//!     pub last_name: String,
//!     #[bsonmap(bson = "characteristics,flatten")]
//!     pub characteristics: Option<Characteristics>,
//!     #[bsonmap(bson = "-")]
//!     pub secret: String,
//! }
//!
//! fn main() -> MapperResult<()> {
//!     let user = User {
//!         id: ObjectId::new(),
//!         first_name: "Jane".to_string(),
//!         last_name: String::new(),
//!         characteristics: Some(Characteristics { left_handed: true, tall: false }),
//!         secret: "hunter2".to_string(),
//!     };
//!
//!     // { "_id": ..., "firstName": "Jane", "leftHanded": true, "tall": false }
//!     let insert = to_document(&user, None)?;
//!
//!     // { "firstName": "Jane", "leftHanded": true }
//!     let patch = user.to_patch()?;
//!
//!     // { "_id": ... }
//!     let by_id = user.to_document(Some(
//!         &MappingOptions::builder().use_identifier_if_present(true).build(),
//!     ))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Tags
//!
//! Directives are read from the `bson` tag by default. A handle can read from
//! another tag, and the process default can be replaced once at startup:
//!
//! ```ignore
//! use bsonmap::{RecordMapper, config};
//!
//! config::set_default_tag("json")?;
//!
//! let document = RecordMapper::new(&user).with_tag("bson").to_document(None)?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as bsonmap;

pub mod prelude;

pub use bsonmap_core::{classify, config, directive, error, mapper, options, record, value};

pub use bsonmap_core::{
    error::{MapperError, MapperResult},
    mapper::{RecordExt, RecordMapper, map_value, to_document},
    options::{MappingOptions, MappingOptionsBuilder},
    record::{FieldMeta, Record},
    value::{FieldValue, Kind, MapLike, SeqLike, Shape},
};

/// Derives [`Record`] and [`FieldValue`] for a struct with named fields.
pub use bsonmap_macros::Record;

// Re-export BSON types for convenience
pub use bson;

#[doc(hidden)]
pub mod __private {
    pub use bson::Bson;
    pub use bsonmap_core::{
        error::MapperResult,
        record::{FieldMeta, Record},
        value::{FieldValue, Kind, Shape, raw_bson},
    };
    pub use serde::Serialize;
}
