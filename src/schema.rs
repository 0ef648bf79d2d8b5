// In: src/schema.rs

//! This module defines `Schema` and `Tuple`, plus the schema-aware tuple copy
//! helper.
//!
//! A schema is the ordered list of logical attribute types of a compressed
//! stream; it is fixed for the stream's lifetime and, via the registry,
//! determines the physical base type of every column. A tuple is the ordered,
//! schema-conformant list of decoded values.
//!
//! `Tuple` implements neither `Clone` nor `Copy`. Duplicating a tuple is a
//! schema-aware operation — every slot is rebuilt through the registry's
//! creator for that column — so accidental shallow aliasing of variable-length
//! payloads is a compile-time impossibility, not a runtime convention.

use serde::{Deserialize, Serialize};

use crate::attribute::TypeRegistry;
use crate::error::RowpackError;
use crate::types::{AttrType, AttrValue};

/// An ordered sequence of logical attribute types, one per tuple column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    attr_types: Vec<AttrType>,
}

impl Schema {
    pub fn new(attr_types: Vec<AttrType>) -> Self {
        Self { attr_types }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.attr_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attr_types.is_empty()
    }

    /// The logical type of column `column`, if in range.
    pub fn attr_type(&self, column: usize) -> Option<AttrType> {
        self.attr_types.get(column).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = AttrType> + '_ {
        self.attr_types.iter().copied()
    }

    /// Checks that every column's type is registered. Engines call this once
    /// at construction so that missing registrations surface as configuration
    /// errors, never mid-stream.
    pub fn check_registered(&self, registry: &TypeRegistry) -> Result<(), RowpackError> {
        for attr_type in self.iter() {
            registry.lookup(attr_type)?;
        }
        Ok(())
    }

    /// Checks that `tuple` conforms to this schema: same column count, and
    /// every slot's physical kind matches the column's registered base type.
    pub fn check_tuple(
        &self,
        tuple: &Tuple,
        registry: &TypeRegistry,
    ) -> Result<(), RowpackError> {
        if tuple.len() != self.len() {
            return Err(RowpackError::TupleLengthMismatch {
                expected: self.len(),
                actual: tuple.len(),
            });
        }
        for (column, attr_type) in self.iter().enumerate() {
            let expected = registry.base_type_of(attr_type)?;
            let found = tuple.value(column)?.base_type();
            if expected != found {
                return Err(RowpackError::TypeMismatch { expected, found });
            }
        }
        Ok(())
    }
}

/// An ordered sequence of attribute values, index-aligned with the schema it
/// was built against.
#[derive(Debug, PartialEq)]
pub struct Tuple {
    values: Vec<AttrValue>,
}

impl Tuple {
    /// Assembles a tuple from per-column values. Conformance to a schema is
    /// checked by [`Schema::check_tuple`], which engines invoke before
    /// encoding.
    pub fn new(values: Vec<AttrValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the value in slot `column`. Out-of-range access is an internal
    /// error rather than a panic.
    pub fn value(&self, column: usize) -> Result<&AttrValue, RowpackError> {
        self.values.get(column).ok_or_else(|| {
            RowpackError::InternalError(format!(
                "tuple column {} out of range (len {})",
                column,
                self.values.len()
            ))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttrValue> {
        self.values.iter()
    }

    /// Replaces the value in slot `column`, returning the previous occupant.
    /// Used by the copy helper; ownership of the new value transfers in.
    fn replace(&mut self, column: usize, value: AttrValue) -> Result<AttrValue, RowpackError> {
        let len = self.values.len();
        let slot = self.values.get_mut(column).ok_or_else(|| {
            RowpackError::InternalError(format!("tuple column {} out of range (len {})", column, len))
        })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Builds a fresh, independent duplicate of this tuple by rebuilding
    /// every slot through the registry.
    pub fn duplicate(
        &self,
        schema: &Schema,
        registry: &TypeRegistry,
    ) -> Result<Tuple, RowpackError> {
        if self.len() != schema.len() {
            return Err(RowpackError::TupleLengthMismatch {
                expected: schema.len(),
                actual: self.len(),
            });
        }
        let mut values = Vec::with_capacity(self.len());
        for (column, attr_type) in schema.iter().enumerate() {
            values.push(registry.duplicate_value(attr_type, self.value(column)?)?);
        }
        Ok(Tuple::new(values))
    }
}

/// Copies `source` into `target`, column by column, rebuilding each slot via
/// the registry's creator for `schema[column]`.
///
/// Both tuples must already conform to `schema` in length; a mismatch is
/// rejected before any slot is touched, never silently truncated or padded.
pub fn copy_tuple(
    target: &mut Tuple,
    source: &Tuple,
    schema: &Schema,
    registry: &TypeRegistry,
) -> Result<(), RowpackError> {
    if source.len() != schema.len() {
        return Err(RowpackError::TupleLengthMismatch {
            expected: schema.len(),
            actual: source.len(),
        });
    }
    if target.len() != schema.len() {
        return Err(RowpackError::TupleLengthMismatch {
            expected: schema.len(),
            actual: target.len(),
        });
    }
    for (column, attr_type) in schema.iter().enumerate() {
        let rebuilt = registry.duplicate_value(attr_type, source.value(column)?)?;
        target.replace(column, rebuilt)?;
    }
    Ok(())
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BaseType;

    fn two_column_schema() -> Schema {
        Schema::new(vec![AttrType::INTEGER, AttrType::STRING])
    }

    #[test]
    fn test_schema_accessors() {
        let schema = two_column_schema();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.attr_type(1), Some(AttrType::STRING));
        assert_eq!(schema.attr_type(2), None);
    }

    #[test]
    fn test_check_registered_flags_missing_types() {
        let registry = TypeRegistry::with_builtins();
        let schema = Schema::new(vec![AttrType::INTEGER, AttrType(999)]);
        assert!(matches!(
            schema.check_registered(&registry),
            Err(RowpackError::UnknownAttrType(_))
        ));
    }

    #[test]
    fn test_check_tuple_rejects_wrong_base_type() {
        let registry = TypeRegistry::with_builtins();
        let schema = two_column_schema();
        let tuple = Tuple::new(vec![
            AttrValue::Integer(34),
            AttrValue::Double(1.0), // schema says string
        ]);
        assert!(matches!(
            schema.check_tuple(&tuple, &registry),
            Err(RowpackError::TypeMismatch {
                expected: BaseType::String,
                found: BaseType::Double,
            })
        ));
    }

    #[test]
    fn test_copy_tuple_produces_independent_values() -> Result<(), RowpackError> {
        // --- ARRANGE ---
        let registry = TypeRegistry::with_builtins();
        let schema = two_column_schema();
        let source = Tuple::new(vec![
            AttrValue::Integer(34),
            AttrValue::String("NY".to_string()),
        ]);
        let mut target = Tuple::new(vec![
            AttrValue::Integer(0),
            AttrValue::String(String::new()),
        ]);

        // --- ACT ---
        copy_tuple(&mut target, &source, &schema, &registry)?;

        // --- ASSERT ---
        assert_eq!(target, source);
        // Destroying the source must not affect the copy, string column included.
        drop(source);
        assert_eq!(target.value(0)?.as_integer()?, 34);
        assert_eq!(target.value(1)?.as_text()?, "NY");
        Ok(())
    }

    #[test]
    fn test_copy_tuple_rejects_length_mismatch() {
        let registry = TypeRegistry::with_builtins();
        let schema = two_column_schema();
        let source = Tuple::new(vec![AttrValue::Integer(1)]);
        let mut target = Tuple::new(vec![
            AttrValue::Integer(0),
            AttrValue::String(String::new()),
        ]);
        assert!(matches!(
            copy_tuple(&mut target, &source, &schema, &registry),
            Err(RowpackError::TupleLengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_duplicate_builds_a_fresh_tuple() -> Result<(), RowpackError> {
        let registry = TypeRegistry::with_builtins();
        let schema = two_column_schema();
        let source = Tuple::new(vec![
            AttrValue::Integer(51),
            AttrValue::String("LA".to_string()),
        ]);
        let copy = source.duplicate(&schema, &registry)?;
        assert_eq!(copy, source);
        Ok(())
    }
}
