//! This module defines the canonical, type-safe representation of attribute
//! types used throughout the rowpack pipeline.
//!
//! Two layers are kept deliberately distinct:
//!
//! * `BaseType` is the **closed** set of physical storage kinds the codec
//!   machinery manipulates. It never grows without a format revision.
//! * `AttrType` is the **open** set of logical attribute categories (catalog
//!   types such as "currency" or "city-enum"). New logical types are added by
//!   registering a creator, with no change to the engines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed enumeration of physical storage kinds. Every logical attribute
/// type reduces to exactly one of these; the registry enforces the mapping.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BaseType {
    Integer,
    Double,
    String,
    Enum,
}

/// Provides the canonical string representation for a `BaseType`.
impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// An integer identifier for a logical attribute category.
///
/// The identifier space is owned by the catalog that defines the schemas; the
/// library reserves nothing beyond the four built-in ids below.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct AttrType(pub u32);

impl AttrType {
    /// Built-in logical type stored directly as [`BaseType::Integer`].
    pub const INTEGER: AttrType = AttrType(0);
    /// Built-in logical type stored directly as [`BaseType::Double`].
    pub const DOUBLE: AttrType = AttrType(1);
    /// Built-in logical type stored directly as [`BaseType::String`].
    pub const STRING: AttrType = AttrType(2);
    /// Built-in logical type stored directly as [`BaseType::Enum`].
    pub const ENUM: AttrType = AttrType(3);
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attr_type({})", self.0)
    }
}

impl From<u32> for AttrType {
    fn from(id: u32) -> Self {
        AttrType(id)
    }
}
