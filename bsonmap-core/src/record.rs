//! Record introspection and field enumeration.
//!
//! A [`Record`] describes its declared fields once per type through a static
//! [`FieldMeta`] table and hands out field values by index. The table is
//! normally generated by `#[derive(Record)]`, but it can be written by hand:
//!
//! ```ignore
//! use bsonmap::{FieldMeta, FieldValue, Record};
//!
//! pub struct Account {
//!     pub id: String,
//!     pub email: String,
//!     password_hash: String,
//! }
//!
//! impl Record for Account {
//!     fn record_fields(&self) -> &'static [FieldMeta] {
//!         const FIELDS: &[FieldMeta] = &[
//!             FieldMeta { name: "id", tags: &[("bson", "_id,omitempty")], visible: true },
//!             FieldMeta { name: "email", tags: &[], visible: true },
//!             FieldMeta { name: "password_hash", tags: &[], visible: false },
//!         ];
//!         FIELDS
//!     }
//!
//!     fn field_value(&self, index: usize) -> Option<&dyn FieldValue> {
//!         match index {
//!             0 => Some(&self.id),
//!             1 => Some(&self.email),
//!             _ => None,
//!         }
//!     }
//! }
//! ```

use crate::{directive::Directive, value::FieldValue};

/// Static description of one declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Declared field name.
    pub name: &'static str,
    /// Raw directives keyed by tag, e.g. `("bson", "_id,omitempty")`.
    pub tags: &'static [(&'static str, &'static str)],
    /// False for fields hidden from external code.
    pub visible: bool,
}

impl FieldMeta {
    /// The raw directive stored under `key`, or `""` if there is none.
    pub fn tag(&self, key: &str) -> &'static str {
        self.tags
            .iter()
            .find(|(tag, _)| *tag == key)
            .map(|(_, directive)| *directive)
            .unwrap_or_default()
    }
}

/// A structured value with named fields.
pub trait Record {
    /// Declared fields in source order, hidden ones included.
    fn record_fields(&self) -> &'static [FieldMeta];

    /// Value of the field at `index` in [`Record::record_fields`].
    ///
    /// Returns `None` for hidden fields.
    fn field_value(&self, index: usize) -> Option<&dyn FieldValue>;
}

/// A mappable field of a record instance.
pub struct Field<'a> {
    /// Declared field name.
    pub name: &'static str,
    /// Directive parsed from the active tag.
    pub directive: Directive<'static>,
    /// Current value.
    pub value: &'a dyn FieldValue,
}

impl Field<'_> {
    /// The key this field is written under.
    pub fn key(&self) -> &'static str {
        self.directive.key_or(self.name)
    }
}

/// Lists the mappable fields of `record` in declaration order.
///
/// Hidden fields and fields whose directive under `tag` is suppressed are
/// skipped.
pub fn fields<'a>(record: &'a dyn Record, tag: &str) -> Vec<Field<'a>> {
    record
        .record_fields()
        .iter()
        .enumerate()
        .filter(|(_, meta)| meta.visible)
        .filter_map(|(index, meta)| {
            let directive = Directive::parse(meta.tag(tag));
            if directive.is_suppressed() {
                log::trace!("field `{}` suppressed under tag `{}`", meta.name, tag);
                return None;
            }

            Some(Field {
                name: meta.name,
                directive,
                value: record.field_value(index)?,
            })
        })
        .collect()
}
