//! Shape and emptiness decisions that drive omission, recursion and flattening.

use crate::value::{FieldValue, Kind, Shape};

/// Returns true if `value` counts as empty for omission purposes.
///
/// A value is empty when it is the zero value of its type, or when it is a
/// container with no entries.
pub fn is_empty(value: &dyn FieldValue) -> bool {
    value.is_zero() || value.entry_count() == Some(0)
}

/// Returns true if `value` is a record or an associative container, after
/// dereferencing one reference level.
pub fn is_document_shaped(value: &dyn FieldValue) -> bool {
    matches!(value.shape(), Shape::Record(_) | Shape::Map(_))
}

/// Dynamic kind of `value`, after dereferencing one reference level.
pub fn classify(value: &dyn FieldValue) -> Kind {
    match value.shape() {
        Shape::Scalar => Kind::Scalar,
        Shape::Record(_) => Kind::Record,
        Shape::Map(_) => Kind::Map,
        Shape::Sequence(_) => Kind::Sequence,
    }
}

/// Returns true if a sequence of `T` must be mapped element by element.
pub fn sequence_holds_records<T: FieldValue>() -> bool {
    T::kind() == Kind::Record
}

/// Returns true if a map with values of type `V` must be mapped entry by entry.
///
/// Values qualify when they are records, or sequences of records.
pub fn map_holds_records<V: FieldValue>() -> bool {
    match V::kind() {
        Kind::Record => true,
        Kind::Sequence => V::element_kind() == Kind::Record,
        _ => false,
    }
}
