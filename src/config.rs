// In: src/config.rs

//! The single source of truth for rowpack codec configuration.
//!
//! `CodecConfig` is designed to be created once at the application boundary
//! (e.g. from a config file) and handed to each engine. Every field has a
//! serde default, so partial configuration files stay forward-compatible.

use serde::{Deserialize, Serialize};

/// Engine-level knobs shared by the compressor and the decompressor.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct CodecConfig {
    /// If true, the decoder requires the schema recorded in the stream header
    /// to equal the schema supplied by the caller, and rejects the stream at
    /// `init()` otherwise. Disable only when re-reading streams written by a
    /// catalog that renumbers logical types between releases.
    #[serde(default = "default_true")]
    pub strict_schema: bool,

    /// If true, the compressor checks every appended tuple against the schema
    /// (column count and physical base types) before encoding it. Disabling
    /// this trades safety for a small per-tuple saving when the producer is
    /// already trusted to conform.
    #[serde(default = "default_true")]
    pub validate_tuples: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_schema: true,
            validate_tuples: true,
        }
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_document_takes_defaults() {
        let config: CodecConfig = serde_json::from_str("{}").unwrap();
        assert!(config.strict_schema);
        assert!(config.validate_tuples);
    }

    #[test]
    fn test_partial_config_document_overrides_one_field() {
        let config: CodecConfig = serde_json::from_str(r#"{"strict_schema": false}"#).unwrap();
        assert!(!config.strict_schema);
        assert!(config.validate_tuples);
    }
}
