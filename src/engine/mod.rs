// In: src/engine/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Engine Layer
// ====================================================================================
//
// The engines orchestrate everything below them. They own no coding logic of
// their own; their job is the protocol.
//
// Data Flow (Compression):
//
//   1. [Compressor::append_tuple]  -> Receives a schema-conformant `Tuple`
//         |
//         `-> for each column, in attribute order ->
//
//   2. [Model::encode_value]       -> Receives the value + the restricted
//         |                           context of earlier-materialized columns
//         `-> emits a self-delimited bit span into the `ByteWriter`
//
//   3. [Compressor::finish]        -> Writes preamble (magic, version,
//                                     `StreamHeader`) then the payload bits
//
// Data Flow (Decompression):
//
//   1. [Decompressor::init]        -> Reads/validates the preamble, fixes the
//         |                           attribute order, primes exhaustion
//         |
//   2. [Decompressor::read_next_tuple] -> for each column, in attribute order,
//         |                           [Model::decode_value] pulls exactly the
//         |                           encoder's bit span from the `ByteReader`
//         `-> assembled `Tuple` to the caller
//
// The ordering guarantee is the engines' one correctness-critical invariant:
// within a tuple, columns are processed strictly in attribute order, and a
// model observes only columns that precede its own in that order. Bit
// consumption from the shared stream follows the same sequence, so any
// reordering would silently corrupt every later column.
// ====================================================================================

pub(crate) mod compressor;
pub(crate) mod decompressor;
pub(crate) mod format;

// --- High-Level Stateful API ---
pub use compressor::Compressor;
pub use decompressor::Decompressor;

// --- Format Constants and Structs ---
pub use format::{StreamHeader, MAX_HEADER_BYTES, STREAM_FORMAT_VERSION, STREAM_MAGIC};
