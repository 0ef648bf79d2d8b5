// In: src/error.rs

//! This module defines the single, unified error type for the entire rowpack library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

use crate::types::{AttrType, BaseType};

#[derive(Error, Debug)]
pub enum RowpackError {
    // =========================================================================
    // === Type Errors (programming/configuration bugs, surfaced loudly)
    // =========================================================================
    /// An accessor asked an `AttrValue` for a physical kind it does not hold.
    #[error("Attribute value type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: BaseType, found: BaseType },

    /// A creator was asked for a construction/extraction capability it does
    /// not implement. Callers can always distinguish this from a successful
    /// zero/empty result.
    #[error("Creator for attribute type {attr_type} does not support {capability}")]
    UnsupportedCapability {
        attr_type: AttrType,
        capability: &'static str,
    },

    /// A schema referenced an attribute type nobody registered.
    #[error("Attribute type {0} is not registered")]
    UnknownAttrType(AttrType),

    /// `register` was called twice for the same attribute type. Registration
    /// never overwrites; the second call fails.
    #[error("Attribute type {0} is already registered")]
    DuplicateAttrType(AttrType),

    /// A value failed a logical type's own validation rules (e.g. an enum
    /// label with no index, or a non-numeric string fed to an integer type).
    #[error("Value rejected by attribute type {attr_type}: {reason}")]
    InvalidValue { attr_type: AttrType, reason: String },

    // =========================================================================
    // === Corrupt-Stream Errors (fatal for the current stream)
    // =========================================================================
    /// The bit source ended before a model finished decoding a value.
    #[error("Compressed stream ended unexpectedly: {0}")]
    TruncatedStream(String),

    /// The stream decoded to a value outside the attribute's valid domain,
    /// or the container preamble is malformed.
    #[error("Corrupt compressed stream: {0}")]
    CorruptStream(String),

    #[error("LEB128 decoding error: {0}")]
    Leb128DecodeError(String),

    /// A model was driven outside its contract (asked to encode a value it
    /// cannot represent, or reached for context it was not given).
    #[error("Model encoding/decoding failed: {0}")]
    ModelError(String),

    // =========================================================================
    // === Configuration Errors (detected eagerly, never mid-stream)
    // =========================================================================
    /// Schema length, model-array length, and attribute-order length/validity
    /// must all agree before any tuple is processed.
    #[error("Engine configuration error: {0}")]
    ConfigMismatch(String),

    /// A tuple does not conform to the schema it is being used with.
    #[error("Tuple/schema length mismatch: schema has {expected} columns, tuple has {actual}")]
    TupleLengthMismatch { expected: usize, actual: usize },

    // =========================================================================
    // === Engine Lifecycle Errors
    // =========================================================================
    /// `read_next_tuple` was called while the engine cannot produce one
    /// (before `init`, after exhaustion, or after a prior decode failure).
    #[error("Decode engine is not in a readable state: {0}")]
    EngineState(&'static str),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem (e.g., file not found).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically during header serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
