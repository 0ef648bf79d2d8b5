//! This module defines `AttrValue`, the container for one decoded scalar.
//!
//! An `AttrValue` is immutable after construction and holds exactly one
//! physical representation. Construction always goes through an
//! [`AttrValueCreator`](crate::attribute::AttrValueCreator) so that logical
//! types can apply their own validation; the variants here are the closed set
//! of physical shapes the engines know how to move around.
//!
//! `AttrValue` deliberately does not implement `Clone`. Duplicating a value
//! (or a whole tuple) is a schema-aware operation that must run back through
//! the registry, see [`TypeRegistry::duplicate_value`](crate::attribute::TypeRegistry::duplicate_value)
//! and [`copy_tuple`](crate::schema::copy_tuple).

use crate::error::RowpackError;
use crate::types::BaseType;

/// One decoded attribute value. Exactly one physical representation per
/// instance; never mutated after construction.
#[derive(Debug, PartialEq)]
pub enum AttrValue {
    /// A signed integer scalar.
    Integer(i64),
    /// A 64-bit IEEE-754 floating point scalar.
    Double(f64),
    /// An owned text payload.
    String(String),
    /// An unsigned index into an implicit enumeration domain.
    Enum(usize),
}

impl AttrValue {
    /// The physical storage kind of this value.
    pub fn base_type(&self) -> BaseType {
        match self {
            AttrValue::Integer(_) => BaseType::Integer,
            AttrValue::Double(_) => BaseType::Double,
            AttrValue::String(_) => BaseType::String,
            AttrValue::Enum(_) => BaseType::Enum,
        }
    }

    /// Returns the integer payload, or a `TypeMismatch` error if the value
    /// holds a different physical kind.
    pub fn as_integer(&self) -> Result<i64, RowpackError> {
        match self {
            AttrValue::Integer(v) => Ok(*v),
            other => Err(RowpackError::TypeMismatch {
                expected: BaseType::Integer,
                found: other.base_type(),
            }),
        }
    }

    /// Returns the floating-point payload, or a `TypeMismatch` error.
    pub fn as_double(&self) -> Result<f64, RowpackError> {
        match self {
            AttrValue::Double(v) => Ok(*v),
            other => Err(RowpackError::TypeMismatch {
                expected: BaseType::Double,
                found: other.base_type(),
            }),
        }
    }

    /// Returns a borrowed view of the text payload, or a `TypeMismatch` error.
    pub fn as_text(&self) -> Result<&str, RowpackError> {
        match self {
            AttrValue::String(v) => Ok(v.as_str()),
            other => Err(RowpackError::TypeMismatch {
                expected: BaseType::String,
                found: other.base_type(),
            }),
        }
    }

    /// Returns the enumeration index, or a `TypeMismatch` error.
    pub fn as_index(&self) -> Result<usize, RowpackError> {
        match self {
            AttrValue::Enum(v) => Ok(*v),
            other => Err(RowpackError::TypeMismatch {
                expected: BaseType::Enum,
                found: other.base_type(),
            }),
        }
    }
}
