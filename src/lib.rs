//! This file is the root of the `rowpack` Rust crate.
//!
//! rowpack is a schema-driven, model-based compressor/decompressor for
//! relational tuples. Each tuple is encoded into a compact bitstream by
//! exploiting per-attribute value distributions and inter-attribute
//! statistical dependencies, and reconstructed losslessly on read-back.
//!
//! The layers, leaf-first:
//! 1. `types`     — `AttrValue`, `BaseType`, `AttrType`
//! 2. `attribute` — per-logical-type creators and the `TypeRegistry`
//! 3. `schema`    — `Schema`, `Tuple`, and the explicit deep-copy helper
//! 4. `stream`    — the bit-level transport (`ByteReader` / `ByteWriter`)
//! 5. `kernels`   — stateless codec primitives (LEB128, ZigZag)
//! 6. `model`     — the per-attribute `Model` seam plus reference models
//! 7. `engine`    — the stateful `Compressor` / `Decompressor` facades

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod attribute;
pub mod config;
pub mod engine;
pub mod error;
pub mod kernels;
pub mod model;
pub mod schema;
pub mod stream;
pub mod types;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use attribute::{AttrValueCreator, TypeRegistry};
pub use config::CodecConfig;
pub use engine::{Compressor, Decompressor};
pub use error::RowpackError;
pub use model::Model;
pub use schema::{copy_tuple, Schema, Tuple};
pub use stream::{ByteReader, ByteWriter};
pub use types::{AttrType, AttrValue, BaseType};
