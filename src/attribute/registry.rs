// In: src/attribute/registry.rs

//! This module defines the `TypeRegistry`, the process-wide mapping from
//! logical attribute types to their creators and physical base types.
//!
//! The registry follows a strict two-phase lifecycle: it is populated once at
//! startup (registration takes ownership of each creator and never
//! overwrites), then shared read-only — typically behind an `Arc` — by every
//! engine in the process. Concurrent readers need no locking because nothing
//! mutates after the population phase.

use hashbrown::HashMap;
use std::sync::Arc;

use crate::attribute::creators::{
    AttrValueCreator, DoubleAttrValueCreator, EnumAttrValueCreator, IntegerAttrValueCreator,
    StringAttrValueCreator,
};
use crate::error::RowpackError;
use crate::types::{AttrType, AttrValue, BaseType};

struct Registration {
    creator: Box<dyn AttrValueCreator>,
    base_type: BaseType,
}

/// Mapping from `AttrType` to `(creator, BaseType)`.
pub struct TypeRegistry {
    entries: HashMap<AttrType, Registration>,
}

impl TypeRegistry {
    /// An empty registry. Most callers want [`with_builtins`](Self::with_builtins).
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A registry pre-populated with the four built-in logical types
    /// ([`AttrType::INTEGER`], [`AttrType::DOUBLE`], [`AttrType::STRING`],
    /// [`AttrType::ENUM`]), each bound to its base-type creator.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // The built-in ids are distinct constants; registering them into a
        // fresh map cannot collide.
        let builtins: Vec<(AttrType, Box<dyn AttrValueCreator>, BaseType)> = vec![
            (
                AttrType::INTEGER,
                Box::new(IntegerAttrValueCreator::new(AttrType::INTEGER)),
                BaseType::Integer,
            ),
            (
                AttrType::DOUBLE,
                Box::new(DoubleAttrValueCreator::new(AttrType::DOUBLE)),
                BaseType::Double,
            ),
            (
                AttrType::STRING,
                Box::new(StringAttrValueCreator::new(AttrType::STRING)),
                BaseType::String,
            ),
            (
                AttrType::ENUM,
                Box::new(EnumAttrValueCreator::new(AttrType::ENUM)),
                BaseType::Enum,
            ),
        ];
        for (attr_type, creator, base_type) in builtins {
            registry
                .register(attr_type, creator, base_type)
                .expect("built-in registration into an empty registry cannot collide");
        }
        registry
    }

    /// Binds a logical type to a creator and its base type, taking ownership
    /// of the creator.
    ///
    /// Policy: registration never overwrites. A second `register` for the
    /// same `attr_type` fails with [`RowpackError::DuplicateAttrType`].
    pub fn register(
        &mut self,
        attr_type: AttrType,
        creator: Box<dyn AttrValueCreator>,
        base_type: BaseType,
    ) -> Result<(), RowpackError> {
        if self.entries.contains_key(&attr_type) {
            return Err(RowpackError::DuplicateAttrType(attr_type));
        }
        log::debug!("registering {} with base type {}", attr_type, base_type);
        self.entries.insert(
            attr_type,
            Registration {
                creator,
                base_type,
            },
        );
        Ok(())
    }

    /// Returns the registered creator for `attr_type`, or
    /// [`RowpackError::UnknownAttrType`] if nobody registered it.
    pub fn lookup(&self, attr_type: AttrType) -> Result<&dyn AttrValueCreator, RowpackError> {
        self.entries
            .get(&attr_type)
            .map(|r| r.creator.as_ref())
            .ok_or(RowpackError::UnknownAttrType(attr_type))
    }

    /// Returns the physical base type of `attr_type`, with the same failure
    /// contract as [`lookup`](Self::lookup).
    pub fn base_type_of(&self, attr_type: AttrType) -> Result<BaseType, RowpackError> {
        self.entries
            .get(&attr_type)
            .map(|r| r.base_type)
            .ok_or(RowpackError::UnknownAttrType(attr_type))
    }

    /// True if `attr_type` has been registered.
    pub fn is_registered(&self, attr_type: AttrType) -> bool {
        self.entries.contains_key(&attr_type)
    }

    /// Rebuilds a value through the creator registered for `attr_type`:
    /// extract the raw primitive for the type's base kind, then construct a
    /// fresh value from it. This is the primitive behind schema-aware tuple
    /// copies; it is the only sanctioned way to duplicate an `AttrValue`.
    pub fn duplicate_value(
        &self,
        attr_type: AttrType,
        value: &AttrValue,
    ) -> Result<AttrValue, RowpackError> {
        let creator = self.lookup(attr_type)?;
        match self.base_type_of(attr_type)? {
            BaseType::Integer => creator.from_integer(creator.read_integer(value)?),
            BaseType::Double => creator.from_double(creator.read_double(value)?),
            BaseType::String => creator.from_text(&creator.read_text(value)?),
            BaseType::Enum => creator.from_index(creator.read_index(value)?),
        }
    }

    /// Convenience for the common startup shape: builtins plus caller-defined
    /// registrations, finished into a shareable handle.
    pub fn into_shared(self) -> Arc<TypeRegistry> {
        Arc::new(self)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_roundtrip_for_every_base_type() -> Result<(), RowpackError> {
        let registry = TypeRegistry::with_builtins();

        let int_creator = registry.lookup(AttrType::INTEGER)?;
        assert_eq!(int_creator.read_integer(&int_creator.from_integer(-7)?)?, -7);

        let dbl_creator = registry.lookup(AttrType::DOUBLE)?;
        assert_eq!(dbl_creator.read_double(&dbl_creator.from_double(1.25)?)?, 1.25);

        let str_creator = registry.lookup(AttrType::STRING)?;
        assert_eq!(str_creator.read_text(&str_creator.from_text("NY")?)?, "NY");

        let enum_creator = registry.lookup(AttrType::ENUM)?;
        assert_eq!(enum_creator.read_index(&enum_creator.from_index(3)?)?, 3);

        Ok(())
    }

    #[test]
    fn test_unknown_type_lookup_fails_loudly() {
        let registry = TypeRegistry::with_builtins();
        let missing = AttrType(999);
        assert!(matches!(
            registry.lookup(missing),
            Err(RowpackError::UnknownAttrType(t)) if t == missing
        ));
        assert!(matches!(
            registry.base_type_of(missing),
            Err(RowpackError::UnknownAttrType(_))
        ));
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let mut registry = TypeRegistry::with_builtins();
        let result = registry.register(
            AttrType::INTEGER,
            Box::new(IntegerAttrValueCreator::new(AttrType::INTEGER)),
            BaseType::Integer,
        );
        assert!(matches!(result, Err(RowpackError::DuplicateAttrType(_))));
        // The original registration is untouched.
        assert!(registry.lookup(AttrType::INTEGER).is_ok());
    }

    #[test]
    fn test_user_defined_type_composes_with_base_storage() -> Result<(), RowpackError> {
        let city = AttrType(40);
        let mut registry = TypeRegistry::with_builtins();
        registry.register(
            city,
            Box::new(EnumAttrValueCreator::with_labels(
                city,
                vec!["NY".to_string(), "LA".to_string()],
            )),
            BaseType::Enum,
        )?;

        assert_eq!(registry.base_type_of(city)?, BaseType::Enum);
        let creator = registry.lookup(city)?;
        let value = creator.from_text("NY")?;
        assert_eq!(creator.read_index(&value)?, 0);
        Ok(())
    }

    #[test]
    fn test_duplicate_value_rebuilds_through_the_creator() -> Result<(), RowpackError> {
        let registry = TypeRegistry::with_builtins();
        let original = AttrValue::String("Los Angeles".to_string());
        let copy = registry.duplicate_value(AttrType::STRING, &original)?;
        assert_eq!(copy, original);
        // The copy owns its payload; dropping the original must not disturb it.
        drop(original);
        assert_eq!(copy.as_text()?, "Los Angeles");
        Ok(())
    }
}
