// In: src/attribute/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Attribute Layer
// ====================================================================================
//
// The attribute layer is the indirection that lets schemas reference rich,
// domain-specific logical types (dates, currencies, geo-enums) while the
// encode/decode machinery only ever manipulates the four physical base types.
//
//   1. [AttrValueCreator]  -> per-logical-type factory/reader capabilities
//         |
//         `-> constructs/extracts `AttrValue`s, applying the logical type's
//             own validation and parsing rules
//
//   2. [TypeRegistry]      -> AttrType -> (creator, BaseType)
//         |
//         `-> populated once at startup, then shared read-only (`Arc`) by any
//             number of concurrently running engines
//
// New logical types require no change to the engines: register a creator that
// delegates storage to one of the base variants and adds its own rules.
// ====================================================================================

pub(crate) mod creators;
pub(crate) mod registry;

pub use creators::{
    AttrValueCreator, DoubleAttrValueCreator, EnumAttrValueCreator, IntegerAttrValueCreator,
    StringAttrValueCreator,
};
pub use registry::TypeRegistry;
