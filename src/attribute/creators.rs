// In: src/attribute/creators.rs

//! This module defines the `AttrValueCreator` capability trait and the four
//! built-in creators, one per physical base type.
//!
//! Each construction and extraction capability is independently implementable.
//! The default methods report an explicit `UnsupportedCapability` error, so a
//! creator that does not support a given primitive kind fails cleanly at the
//! call site instead of propagating a null or a silent zero downstream.

use crate::error::RowpackError;
use crate::types::{AttrType, AttrValue};

/// Per-logical-type factory and reader.
///
/// A creator owns the construction and validation rules of one logical
/// attribute type and knows how to extract the raw primitive back out of a
/// value it built. Creators are registered once in a
/// [`TypeRegistry`](crate::attribute::TypeRegistry), which takes ownership.
pub trait AttrValueCreator: Send + Sync {
    /// The logical type this creator was built for. Used in error reporting.
    fn attr_type(&self) -> AttrType;

    // --- Construction capabilities ---

    /// Builds a value from a signed integer primitive.
    fn from_integer(&self, _value: i64) -> Result<AttrValue, RowpackError> {
        Err(self.unsupported("construct-from-integer"))
    }

    /// Builds a value from a floating-point primitive.
    fn from_double(&self, _value: f64) -> Result<AttrValue, RowpackError> {
        Err(self.unsupported("construct-from-double"))
    }

    /// Builds a value from raw text, applying the logical type's parsing rules.
    fn from_text(&self, _text: &str) -> Result<AttrValue, RowpackError> {
        Err(self.unsupported("construct-from-text"))
    }

    /// Builds a value from an enumeration index.
    fn from_index(&self, _index: usize) -> Result<AttrValue, RowpackError> {
        Err(self.unsupported("construct-from-index"))
    }

    // --- Extraction capabilities ---

    /// Reads the signed integer primitive back out of a value.
    fn read_integer(&self, _value: &AttrValue) -> Result<i64, RowpackError> {
        Err(self.unsupported("read-integer"))
    }

    /// Reads the floating-point primitive back out of a value.
    fn read_double(&self, _value: &AttrValue) -> Result<f64, RowpackError> {
        Err(self.unsupported("read-double"))
    }

    /// Reads the text payload back out of a value.
    fn read_text(&self, _value: &AttrValue) -> Result<String, RowpackError> {
        Err(self.unsupported("read-text"))
    }

    /// Reads the enumeration index back out of a value.
    fn read_index(&self, _value: &AttrValue) -> Result<usize, RowpackError> {
        Err(self.unsupported("read-index"))
    }

    /// The error every unimplemented capability reports.
    fn unsupported(&self, capability: &'static str) -> RowpackError {
        RowpackError::UnsupportedCapability {
            attr_type: self.attr_type(),
            capability,
        }
    }
}

//==================================================================================
// Built-in creators (the default/reference implementations)
//==================================================================================

/// Built-in creator for integer-based logical types.
pub struct IntegerAttrValueCreator {
    attr_type: AttrType,
}

impl IntegerAttrValueCreator {
    pub fn new(attr_type: AttrType) -> Self {
        Self { attr_type }
    }
}

impl AttrValueCreator for IntegerAttrValueCreator {
    fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    fn from_integer(&self, value: i64) -> Result<AttrValue, RowpackError> {
        Ok(AttrValue::Integer(value))
    }

    fn from_text(&self, text: &str) -> Result<AttrValue, RowpackError> {
        let parsed = text
            .trim()
            .parse::<i64>()
            .map_err(|e| RowpackError::InvalidValue {
                attr_type: self.attr_type,
                reason: format!("cannot parse {:?} as integer: {}", text, e),
            })?;
        Ok(AttrValue::Integer(parsed))
    }

    fn read_integer(&self, value: &AttrValue) -> Result<i64, RowpackError> {
        value.as_integer()
    }
}

/// Built-in creator for double-based logical types.
pub struct DoubleAttrValueCreator {
    attr_type: AttrType,
}

impl DoubleAttrValueCreator {
    pub fn new(attr_type: AttrType) -> Self {
        Self { attr_type }
    }
}

impl AttrValueCreator for DoubleAttrValueCreator {
    fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    fn from_double(&self, value: f64) -> Result<AttrValue, RowpackError> {
        Ok(AttrValue::Double(value))
    }

    fn from_text(&self, text: &str) -> Result<AttrValue, RowpackError> {
        let parsed = text
            .trim()
            .parse::<f64>()
            .map_err(|e| RowpackError::InvalidValue {
                attr_type: self.attr_type,
                reason: format!("cannot parse {:?} as double: {}", text, e),
            })?;
        Ok(AttrValue::Double(parsed))
    }

    fn read_double(&self, value: &AttrValue) -> Result<f64, RowpackError> {
        value.as_double()
    }
}

/// Built-in creator for string-based logical types.
pub struct StringAttrValueCreator {
    attr_type: AttrType,
}

impl StringAttrValueCreator {
    pub fn new(attr_type: AttrType) -> Self {
        Self { attr_type }
    }
}

impl AttrValueCreator for StringAttrValueCreator {
    fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    fn from_text(&self, text: &str) -> Result<AttrValue, RowpackError> {
        Ok(AttrValue::String(text.to_string()))
    }

    fn read_text(&self, value: &AttrValue) -> Result<String, RowpackError> {
        value.as_text().map(str::to_string)
    }
}

/// Built-in creator for enumeration-based logical types.
///
/// A bare enum creator accepts any index; a label-aware one (built with
/// [`with_labels`](EnumAttrValueCreator::with_labels)) additionally validates
/// indices against the domain size and parses label text into indices.
pub struct EnumAttrValueCreator {
    attr_type: AttrType,
    labels: Option<Vec<String>>,
}

impl EnumAttrValueCreator {
    pub fn new(attr_type: AttrType) -> Self {
        Self {
            attr_type,
            labels: None,
        }
    }

    /// A creator whose domain is the given ordered label list. Index `i`
    /// corresponds to `labels[i]`.
    pub fn with_labels(attr_type: AttrType, labels: Vec<String>) -> Self {
        Self {
            attr_type,
            labels: Some(labels),
        }
    }

    /// The domain size, if the domain was declared via labels.
    pub fn domain_size(&self) -> Option<usize> {
        self.labels.as_ref().map(Vec::len)
    }
}

impl AttrValueCreator for EnumAttrValueCreator {
    fn attr_type(&self) -> AttrType {
        self.attr_type
    }

    fn from_index(&self, index: usize) -> Result<AttrValue, RowpackError> {
        if let Some(labels) = &self.labels {
            if index >= labels.len() {
                return Err(RowpackError::InvalidValue {
                    attr_type: self.attr_type,
                    reason: format!("enum index {} out of domain of size {}", index, labels.len()),
                });
            }
        }
        Ok(AttrValue::Enum(index))
    }

    fn from_text(&self, text: &str) -> Result<AttrValue, RowpackError> {
        let labels = self.labels.as_ref().ok_or_else(|| RowpackError::InvalidValue {
            attr_type: self.attr_type,
            reason: "enum type has no label table to parse text against".to_string(),
        })?;
        let index = labels
            .iter()
            .position(|l| l == text)
            .ok_or_else(|| RowpackError::InvalidValue {
                attr_type: self.attr_type,
                reason: format!("unknown enum label {:?}", text),
            })?;
        Ok(AttrValue::Enum(index))
    }

    fn read_index(&self, value: &AttrValue) -> Result<usize, RowpackError> {
        value.as_index()
    }

    fn read_text(&self, value: &AttrValue) -> Result<String, RowpackError> {
        let index = value.as_index()?;
        let labels = self.labels.as_ref().ok_or_else(|| RowpackError::InvalidValue {
            attr_type: self.attr_type,
            reason: "enum type has no label table to render text from".to_string(),
        })?;
        labels
            .get(index)
            .cloned()
            .ok_or_else(|| RowpackError::InvalidValue {
                attr_type: self.attr_type,
                reason: format!("enum index {} out of domain of size {}", index, labels.len()),
            })
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_creator_roundtrip() -> Result<(), RowpackError> {
        let creator = IntegerAttrValueCreator::new(AttrType::INTEGER);
        let value = creator.from_integer(34)?;
        assert_eq!(creator.read_integer(&value)?, 34);
        Ok(())
    }

    #[test]
    fn test_integer_creator_parses_text() -> Result<(), RowpackError> {
        let creator = IntegerAttrValueCreator::new(AttrType::INTEGER);
        let value = creator.from_text(" 51 ")?;
        assert_eq!(creator.read_integer(&value)?, 51);
        assert!(creator.from_text("not a number").is_err());
        Ok(())
    }

    #[test]
    fn test_unsupported_capability_is_reported_not_defaulted() {
        let creator = StringAttrValueCreator::new(AttrType::STRING);
        let result = creator.from_integer(1);
        assert!(matches!(
            result,
            Err(RowpackError::UnsupportedCapability {
                capability: "construct-from-integer",
                ..
            })
        ));
    }

    #[test]
    fn test_enum_creator_validates_domain() {
        let creator = EnumAttrValueCreator::with_labels(
            AttrType(40),
            vec!["NY".to_string(), "LA".to_string()],
        );
        assert!(creator.from_index(1).is_ok());
        assert!(creator.from_index(2).is_err());
    }

    #[test]
    fn test_enum_creator_parses_and_renders_labels() -> Result<(), RowpackError> {
        let creator = EnumAttrValueCreator::with_labels(
            AttrType(40),
            vec!["NY".to_string(), "LA".to_string()],
        );
        let value = creator.from_text("LA")?;
        assert_eq!(creator.read_index(&value)?, 1);
        assert_eq!(creator.read_text(&value)?, "LA");
        assert!(creator.from_text("SF").is_err());
        Ok(())
    }

    #[test]
    fn test_bare_enum_creator_accepts_any_index_but_no_text() {
        let creator = EnumAttrValueCreator::new(AttrType::ENUM);
        assert!(creator.from_index(1_000_000).is_ok());
        assert!(creator.from_text("NY").is_err());
    }
}
