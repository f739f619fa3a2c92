//! The recursive record mapper.
//!
//! [`RecordMapper`] walks a record's fields, applies each field's directive and
//! the active [`MappingOptions`], and descends into nested records, maps of
//! records and sequences of records. The result is a BSON [`Document`], or
//! `None` when nothing was mapped.
//!
//! # Directives
//!
//! Directives are read from the field's tag (`bson` unless configured
//! otherwise). The first segment renames the field, `-` removes it. The
//! remaining segments are flags:
//!
//! - `omitempty` - skip the field when its value is empty
//! - `omitnested` - keep the raw value instead of mapping nested records
//! - `flatten` - merge a nested document's keys into the enclosing document
//! - `string` - write the value's text form; values without one are dropped
//!
//! # Example
//!
//! ```ignore
//! use bsonmap::prelude::*;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Record)]
//! pub struct Person {
//!     #[bsonmap(bson = "_id,omitempty")]
//!     pub id: String,
//!     #[bsonmap(bson = "Name")]
//!     pub name: String,
//! }
//!
//! let person = Person { id: String::new(), name: "Jane".to_string() };
//! let document = to_document(&person, Some(&MappingOptions::filter()))?;
//! assert_eq!(document, Some(doc! { "Name": "Jane" }));
//! ```

use bson::{Bson, Document};
use log::{debug, trace};

use crate::{
    classify,
    config,
    directive::{FLATTEN, OMIT_EMPTY, OMIT_NESTED, STRING},
    error::MapperResult,
    options::{ID_KEY, MappingOptions},
    record::{self, Record},
    value::{FieldValue, Shape},
};

/// Outcome of mapping one record.
#[derive(Debug, Clone, PartialEq)]
enum Mapped {
    /// The identifier shortcut fired; the document holds only `_id`.
    ShortCircuited(Document),
    Complete(Document),
    /// No field produced an entry.
    Empty,
}

impl Mapped {
    fn into_document(self) -> Option<Document> {
        match self {
            Mapped::ShortCircuited(document) | Mapped::Complete(document) => Some(document),
            Mapped::Empty => None,
        }
    }
}

/// A record wrapped for mapping, together with the tag its directives are read from.
#[derive(Clone)]
pub struct RecordMapper<'a> {
    record: &'a dyn Record,
    tag: String,
}

impl<'a> RecordMapper<'a> {
    /// Wraps `record`, reading directives from the process default tag.
    pub fn new(record: &'a dyn Record) -> Self {
        RecordMapper {
            record,
            tag: config::default_tag().to_string(),
        }
    }

    /// Wraps the record held by `value`, dereferencing one reference level.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a record or a reference to one. Use
    /// [`map_value`] when the input's shape is not known in advance.
    pub fn from_value(value: &'a dyn FieldValue) -> Self {
        match value.shape() {
            Shape::Record(record) => Self::new(record),
            _ => panic!("RecordMapper::from_value called with a value that is not a record"),
        }
    }

    /// Replaces the tag directives are read from.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// Returns this mapper reading directives from `tag`.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.set_tag(tag);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Maps the wrapped record.
    ///
    /// Returns `Ok(None)` if the record produced no entries. `None` options
    /// behave like [`MappingOptions::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if a raw field value cannot be encoded as BSON.
    pub fn to_document(&self, options: Option<&MappingOptions>) -> MapperResult<Option<Document>> {
        let defaults = MappingOptions::default();
        let options = options.unwrap_or(&defaults);

        Ok(self.map_record(self.record, options)?.into_document())
    }

    fn map_record(&self, record: &dyn Record, options: &MappingOptions) -> MapperResult<Mapped> {
        let mut out = Document::new();

        for field in record::fields(record, &self.tag) {
            let key = field.key();
            let directive = &field.directive;
            let is_identifier = key == ID_KEY;

            if is_identifier && options.use_identifier_if_present() && !classify::is_empty(field.value) {
                debug!("identifier shortcut on field `{}`", field.name);

                let mut document = Document::new();
                document.insert(ID_KEY, field.value.to_bson()?);
                return Ok(Mapped::ShortCircuited(document));
            }

            if is_identifier && options.remove_identifier() {
                trace!("removed identifier field `{}`", field.name);
                continue;
            }

            if (directive.has(OMIT_EMPTY) || options.force_omit_empty()) && classify::is_empty(field.value) {
                trace!("omitted empty field `{}`", field.name);
                continue;
            }

            if directive.has(STRING) {
                match field.value.to_text() {
                    Some(text) => {
                        out.insert(key, text);
                    }
                    None => trace!("dropped field `{}` without a text form", field.name),
                }
                continue;
            }

            let nested = !directive.has(OMIT_NESTED);
            let resolved = if nested {
                self.resolve(field.value, options)?
            } else {
                field.value.to_bson()?
            };

            match resolved {
                Bson::Document(document)
                    if nested && directive.has(FLATTEN) && classify::is_document_shaped(field.value) =>
                {
                    // Later keys overwrite earlier ones.
                    for (nested_key, nested_value) in document {
                        out.insert(nested_key, nested_value);
                    }
                }
                resolved => {
                    out.insert(key, resolved);
                }
            }
        }

        if out.is_empty() {
            Ok(Mapped::Empty)
        } else {
            Ok(Mapped::Complete(out))
        }
    }

    fn resolve(&self, value: &dyn FieldValue, options: &MappingOptions) -> MapperResult<Bson> {
        match value.shape() {
            // A nested record that maps to nothing keeps its raw value.
            Shape::Record(record) => match self.map_record(record, options)?.into_document() {
                Some(document) => Ok(Bson::Document(document)),
                None => value.to_bson(),
            },
            Shape::Map(map) if map.holds_records() => {
                let mut document = Document::new();
                for (key, entry) in map.entries() {
                    document.insert(key, self.resolve(entry, options)?);
                }
                Ok(Bson::Document(document))
            }
            Shape::Sequence(sequence) if sequence.holds_records() => sequence
                .elements()
                .map(|element| self.resolve(element, options))
                .collect::<MapperResult<Vec<_>>>()
                .map(Bson::Array),
            _ => value.to_bson(),
        }
    }
}

/// Maps `record` using the process default tag.
///
/// Returns `Ok(None)` if the record produced no entries.
///
/// # Errors
///
/// Returns an error if a raw field value cannot be encoded as BSON.
pub fn to_document<R: Record>(record: &R, options: Option<&MappingOptions>) -> MapperResult<Option<Document>> {
    RecordMapper::new(record).to_document(options)
}

/// Maps `value` if it is a record or a reference to one.
///
/// Returns `Ok(None)` for any other value, and for records that produced no
/// entries.
///
/// # Errors
///
/// Returns an error if a raw field value cannot be encoded as BSON.
pub fn map_value(value: &dyn FieldValue, options: Option<&MappingOptions>) -> MapperResult<Option<Document>> {
    match value.shape() {
        Shape::Record(record) => RecordMapper::new(record).to_document(options),
        _ => Ok(None),
    }
}

/// Extension trait providing mapping shortcuts for records.
///
/// This trait is automatically implemented for all types that implement [`Record`].
pub trait RecordExt: Record {
    /// Maps this record with the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if a raw field value cannot be encoded as BSON.
    fn to_document(&self, options: Option<&MappingOptions>) -> MapperResult<Option<Document>>;

    /// Maps this record with [`MappingOptions::filter`].
    ///
    /// # Errors
    ///
    /// Returns an error if a raw field value cannot be encoded as BSON.
    fn to_filter(&self) -> MapperResult<Option<Document>>;

    /// Maps this record with [`MappingOptions::patch`].
    ///
    /// # Errors
    ///
    /// Returns an error if a raw field value cannot be encoded as BSON.
    fn to_patch(&self) -> MapperResult<Option<Document>>;
}

impl<R: Record> RecordExt for R {
    fn to_document(&self, options: Option<&MappingOptions>) -> MapperResult<Option<Document>> {
        to_document(self, options)
    }

    fn to_filter(&self) -> MapperResult<Option<Document>> {
        to_document(self, Some(&MappingOptions::filter()))
    }

    fn to_patch(&self) -> MapperResult<Option<Document>> {
        to_document(self, Some(&MappingOptions::patch()))
    }
}
