//! Runtime value capabilities used by the mapper.
//!
//! Every field a [`Record`] exposes is seen through [`FieldValue`], which tells
//! the mapper the value's shape, whether it is a zero value, how to encode it
//! unmapped, and whether it has a text representation.
//!
//! `Option<T>` is the nullable reference level: `None` is zero and encodes as
//! `Null`, `Some` is never zero and otherwise behaves like its contents.
//! `Box`, `Arc` and `&` are transparent.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
    sync::Arc,
};

use bson::{
    Binary, Bson, DateTime, Document, Uuid, oid::ObjectId, ser::serialize_to_bson,
    spec::BinarySubtype,
};
use serde::Serialize;

use crate::{
    classify,
    error::{MapperError, MapperResult},
    record::Record,
};

/// Static shape of a type, with one reference level unwrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar,
    Record,
    Map,
    Sequence,
}

/// Dynamic shape of a value, with one reference level dereferenced.
pub enum Shape<'a> {
    /// Anything the mapper passes through unchanged.
    Scalar,
    /// A record the mapper can descend into.
    Record(&'a dyn Record),
    /// An associative container with textual keys.
    Map(&'a dyn MapLike),
    /// An ordered sequence.
    Sequence(&'a dyn SeqLike),
}

/// Associative container access for the mapper.
pub trait MapLike {
    /// Returns true if the container's values are records, directly or through a sequence.
    fn holds_records(&self) -> bool;

    /// Iterates the entries with their keys rendered as text.
    fn entries(&self) -> Box<dyn Iterator<Item = (String, &dyn FieldValue)> + '_>;
}

/// Sequence access for the mapper.
pub trait SeqLike {
    /// Returns true if the elements are records.
    fn holds_records(&self) -> bool;

    /// Iterates the elements in order.
    fn elements(&self) -> Box<dyn Iterator<Item = &dyn FieldValue> + '_>;
}

/// A value that can appear in a record field.
///
/// Implementations exist for the scalar types, BSON types, chrono and uuid
/// values, the standard containers, and (through `#[derive(Record)]`) records.
///
/// # Example
///
/// ```ignore
/// use bsonmap::{FieldValue, MapperResult, bson::Bson};
///
/// pub struct Celsius(f64);
///
/// impl FieldValue for Celsius {
///     fn is_zero(&self) -> bool {
///         self.0 == 0.0
///     }
///
///     fn to_bson(&self) -> MapperResult<Bson> {
///         Ok(Bson::Double(self.0))
///     }
///
///     fn to_text(&self) -> Option<String> {
///         Some(format!("{}°C", self.0))
///     }
/// }
/// ```
pub trait FieldValue {
    /// Static shape of the implementing type.
    fn kind() -> Kind
    where
        Self: Sized,
    {
        Kind::Scalar
    }

    /// Static shape of the elements of a container type.
    fn element_kind() -> Kind
    where
        Self: Sized,
    {
        Kind::Scalar
    }

    /// Dynamic shape of this value.
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    /// Returns true if this is the zero value of its type.
    fn is_zero(&self) -> bool;

    /// Number of entries, for containers only.
    fn entry_count(&self) -> Option<usize> {
        None
    }

    /// Encodes the value as-is, without applying any directives.
    fn to_bson(&self) -> MapperResult<Bson>;

    /// Human readable text form, if the type defines one.
    fn to_text(&self) -> Option<String> {
        None
    }
}

/// Encodes a serializable value the way a document driver would store it.
pub fn raw_bson<T: Serialize + ?Sized>(value: &T) -> MapperResult<Bson> {
    Ok(serialize_to_bson(value)?)
}

macro_rules! impl_scalar {
    ($($ty:ty => $variant:ident($conv:ty)),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn is_zero(&self) -> bool {
                    *self == <$ty>::default()
                }

                fn to_bson(&self) -> MapperResult<Bson> {
                    Ok(Bson::$variant(<$conv>::from(*self)))
                }

                fn to_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Boolean(bool),
    i8 => Int32(i32),
    i16 => Int32(i32),
    i32 => Int32(i32),
    u8 => Int32(i32),
    u16 => Int32(i32),
    u32 => Int64(i64),
    i64 => Int64(i64),
}

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                // Bitwise, so `-0.0` is not zero.
                fn is_zero(&self) -> bool {
                    self.to_bits() == 0
                }

                fn to_bson(&self) -> MapperResult<Bson> {
                    Ok(Bson::Double(f64::from(*self)))
                }

                fn to_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_float!(f32, f64);

macro_rules! impl_wide_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn to_bson(&self) -> MapperResult<Bson> {
                    i64::try_from(*self).map(Bson::Int64).map_err(|_| {
                        MapperError::Serialization(format!(
                            "{} does not fit in a BSON int64",
                            self
                        ))
                    })
                }

                fn to_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_wide_integer!(u64, usize, isize);

impl FieldValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::String(self.clone()))
    }

    fn to_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl FieldValue for &str {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::String((*self).to_owned()))
    }

    fn to_text(&self) -> Option<String> {
        Some((*self).to_owned())
    }
}

impl FieldValue for Bson {
    fn shape(&self) -> Shape<'_> {
        match self {
            Bson::Document(document) => Shape::Map(document),
            Bson::Array(array) => Shape::Sequence(array),
            _ => Shape::Scalar,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Bson::Null => true,
            Bson::Boolean(value) => !value,
            Bson::Int32(value) => *value == 0,
            Bson::Int64(value) => *value == 0,
            Bson::Double(value) => value.to_bits() == 0,
            Bson::String(value) => value.is_empty(),
            Bson::Array(array) => array.is_empty(),
            Bson::Document(document) => document.is_empty(),
            _ => false,
        }
    }

    fn entry_count(&self) -> Option<usize> {
        match self {
            Bson::Array(array) => Some(array.len()),
            Bson::Document(document) => Some(document.len()),
            _ => None,
        }
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(self.clone())
    }

    fn to_text(&self) -> Option<String> {
        match self {
            Bson::String(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl MapLike for Document {
    fn holds_records(&self) -> bool {
        false
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (String, &dyn FieldValue)> + '_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key.clone(), value as &dyn FieldValue)),
        )
    }
}

impl FieldValue for Document {
    fn kind() -> Kind {
        Kind::Map
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Map(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn entry_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::Document(self.clone()))
    }
}

impl FieldValue for ObjectId {
    fn is_zero(&self) -> bool {
        self.bytes() == [0; 12]
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::ObjectId(*self))
    }

    fn to_text(&self) -> Option<String> {
        Some(self.to_hex())
    }
}

impl FieldValue for DateTime {
    fn is_zero(&self) -> bool {
        self.timestamp_millis() == 0
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::DateTime(*self))
    }

    fn to_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldValue for Uuid {
    fn is_zero(&self) -> bool {
        self.bytes() == [0; 16]
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::Binary(Binary::from_uuid(*self)))
    }

    fn to_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldValue for Binary {
    fn is_zero(&self) -> bool {
        self.subtype == BinarySubtype::Generic && self.bytes.is_empty()
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::Binary(self.clone()))
    }
}

impl FieldValue for chrono::DateTime<chrono::Utc> {
    fn is_zero(&self) -> bool {
        *self == chrono::DateTime::<chrono::Utc>::default()
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::DateTime(DateTime::from_chrono(*self)))
    }

    fn to_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FieldValue for uuid::Uuid {
    fn is_zero(&self) -> bool {
        self.is_nil()
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        Ok(Bson::Binary(Binary::from_uuid(Uuid::from_bytes(
            self.into_bytes(),
        ))))
    }

    fn to_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn kind() -> Kind {
        T::kind()
    }

    fn element_kind() -> Kind {
        T::element_kind()
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Scalar,
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        match self {
            Some(value) => value.to_bson(),
            None => Ok(Bson::Null),
        }
    }

    fn to_text(&self) -> Option<String> {
        self.as_ref().and_then(FieldValue::to_text)
    }
}

macro_rules! impl_transparent {
    ($($pointer:ident),* $(,)?) => {
        $(
            impl<T: FieldValue> FieldValue for $pointer<T> {
                fn kind() -> Kind {
                    T::kind()
                }

                fn element_kind() -> Kind {
                    T::element_kind()
                }

                fn shape(&self) -> Shape<'_> {
                    (**self).shape()
                }

                fn is_zero(&self) -> bool {
                    (**self).is_zero()
                }

                fn entry_count(&self) -> Option<usize> {
                    (**self).entry_count()
                }

                fn to_bson(&self) -> MapperResult<Bson> {
                    (**self).to_bson()
                }

                fn to_text(&self) -> Option<String> {
                    (**self).to_text()
                }
            }
        )*
    };
}

impl_transparent!(Box, Arc);

impl<T: FieldValue> FieldValue for &T {
    fn kind() -> Kind {
        T::kind()
    }

    fn element_kind() -> Kind {
        T::element_kind()
    }

    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn entry_count(&self) -> Option<usize> {
        (**self).entry_count()
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        (**self).to_bson()
    }

    fn to_text(&self) -> Option<String> {
        (**self).to_text()
    }
}

impl<T: FieldValue> SeqLike for Vec<T> {
    fn holds_records(&self) -> bool {
        classify::sequence_holds_records::<T>()
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn FieldValue> + '_> {
        Box::new(self.iter().map(|value| value as &dyn FieldValue))
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn element_kind() -> Kind {
        T::kind()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn entry_count(&self) -> Option<usize> {
        Some(self.len())
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        self.iter()
            .map(FieldValue::to_bson)
            .collect::<MapperResult<Vec<_>>>()
            .map(Bson::Array)
    }
}

impl<T: FieldValue, const N: usize> SeqLike for [T; N] {
    fn holds_records(&self) -> bool {
        classify::sequence_holds_records::<T>()
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn FieldValue> + '_> {
        Box::new(self.iter().map(|value| value as &dyn FieldValue))
    }
}

impl<T: FieldValue, const N: usize> FieldValue for [T; N] {
    fn kind() -> Kind {
        Kind::Sequence
    }

    fn element_kind() -> Kind {
        T::kind()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }

    // A fixed-size array is zero when every element is.
    fn is_zero(&self) -> bool {
        self.iter().all(FieldValue::is_zero)
    }

    fn entry_count(&self) -> Option<usize> {
        Some(N)
    }

    fn to_bson(&self) -> MapperResult<Bson> {
        self.iter()
            .map(FieldValue::to_bson)
            .collect::<MapperResult<Vec<_>>>()
            .map(Bson::Array)
    }
}

macro_rules! impl_map {
    ($($map:ident<K, V $(, $hasher:ident)?>),* $(,)?) => {
        $(
            impl<K: Display, V: FieldValue $(, $hasher)?> MapLike for $map<K, V $(, $hasher)?> {
                fn holds_records(&self) -> bool {
                    classify::map_holds_records::<V>()
                }

                fn entries(&self) -> Box<dyn Iterator<Item = (String, &dyn FieldValue)> + '_> {
                    Box::new(
                        self.iter()
                            .map(|(key, value)| (key.to_string(), value as &dyn FieldValue)),
                    )
                }
            }

            impl<K: Display, V: FieldValue $(, $hasher)?> FieldValue for $map<K, V $(, $hasher)?> {
                fn kind() -> Kind {
                    Kind::Map
                }

                fn element_kind() -> Kind {
                    V::kind()
                }

                fn shape(&self) -> Shape<'_> {
                    Shape::Map(self)
                }

                fn is_zero(&self) -> bool {
                    self.is_empty()
                }

                fn entry_count(&self) -> Option<usize> {
                    Some(self.len())
                }

                fn to_bson(&self) -> MapperResult<Bson> {
                    let mut document = Document::new();
                    for (key, value) in self {
                        document.insert(key.to_string(), value.to_bson()?);
                    }
                    Ok(Bson::Document(document))
                }
            }
        )*
    };
}

impl_map!(HashMap<K, V, S>, BTreeMap<K, V>);
