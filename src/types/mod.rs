//! This module defines the core, strongly-typed data representations used
//! throughout the rowpack pipeline.
//!
//! It includes the closed `BaseType` enum of physical storage kinds, the open
//! `AttrType` identifier for logical attribute categories, and the `AttrValue`
//! container holding one decoded scalar.

pub mod attr_type;
pub mod attr_value;

// Re-export the main types for easier access.
pub use attr_type::{AttrType, BaseType};
pub use attr_value::AttrValue;
