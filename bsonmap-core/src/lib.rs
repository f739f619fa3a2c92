//! Project typed records into BSON documents for use as query filters, insert
//! payloads or patch documents.
//!
//! This crate is the core of the bsonmap project and provides:
//!
//! - **Directives** ([`directive`]) - Parsing of per-field directive strings
//! - **Records** ([`record`]) - The record introspection trait and field enumeration
//! - **Field values** ([`value`]) - Runtime value capabilities and their standard implementations
//! - **Classification** ([`classify`]) - Shape and emptiness rules
//! - **Mapping** ([`mapper`]) - The recursive mapper and its entry points
//! - **Options** ([`options`]) - Switches that drive the mapper
//! - **Configuration** ([`config`]) - The process-wide default tag
//! - **Error handling** ([`error`]) - Error types and result types
//!
//! # Example
//!
//! ```ignore
//! use bsonmap::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Record)]
//! pub struct User {
//!     #[bsonmap(bson = "_id,omitempty")]
//!     pub id: ObjectId,
//!     #[bsonmap(bson = "firstName")]
//!     pub first_name: String,
//!     #[bsonmap(bson = "lastName,omitempty")]
//!     pub last_name: String,
//! }
//!
//! let filter = user.to_filter()?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as bsonmap_core;

pub mod classify;
pub mod config;
pub mod directive;
pub mod error;
pub mod mapper;
pub mod options;
pub mod record;
pub mod value;
