//! Procedural macros for the bsonmap project.
//!
//! `#[derive(Record)]` registers a struct's fields with the mapper once per
//! type, replacing runtime reflection:
//!
//! ```ignore
//! use bsonmap::Record;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Record)]
//! pub struct User {
//!     #[bsonmap(bson = "_id,omitempty", json = "id")]
//!     pub id: String,
//!     #[bsonmap(bson = "firstName")]
//!     pub first_name: String,
//!     // Not `pub`, never mapped.
//!     favourite_color: String,
//! }
//! ```
//!
//! Each `#[bsonmap(...)]` entry stores the directive for one tag key. Only
//! `pub` fields are visible to the mapper.

#[allow(unused_extern_crates)]
extern crate self as bsonmap_macros;

mod expand;
mod record;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

#[proc_macro_derive(Record, attributes(bsonmap))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match record::RecordDef::from_ast(&input) {
        Ok(def) => expand::record(&def).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
