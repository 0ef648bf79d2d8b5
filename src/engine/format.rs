// In: src/engine/format.rs

//! Defines the on-disk structure and constants of the rowpack stream format.
//! This is the single source of truth for the container layout: what the
//! compressor writes ahead of the payload bits and how the decompressor
//! recognizes, versions, and bounds it.
//!
//! Layout: 4-byte magic, little-endian u16 format version, little-endian u32
//! header length, the JSON-serialized [`StreamHeader`], then the
//! model-encoded tuple payload. The payload's final byte is zero-padded; the
//! header's tuple count makes that padding unambiguous.

use serde::{Deserialize, Serialize};

use crate::error::RowpackError;
use crate::schema::Schema;
use crate::stream::ByteReader;

/// The magic number identifying the start of a rowpack stream.
pub const STREAM_MAGIC: &[u8; 4] = b"RPKS";
/// The current version of the stream format.
pub const STREAM_FORMAT_VERSION: u16 = 1;
/// Upper bound on the serialized header. A corrupted length field must not
/// translate into an unbounded allocation.
pub const MAX_HEADER_BYTES: u32 = 1 << 24;

/// The stream-level metadata block written ahead of the payload bits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// The schema the stream was encoded against.
    pub schema: Schema,
    /// The attribute order chosen at compression time. The decoder must
    /// materialize columns in exactly this sequence.
    pub attr_order: Vec<usize>,
    /// Number of tuples in the payload.
    pub num_tuples: u64,
    /// Version of the library that wrote the stream.
    pub writer_version: String,
}

impl StreamHeader {
    /// Serializes the full preamble: magic, version, length, header JSON.
    pub fn to_bytes(&self) -> Result<Vec<u8>, RowpackError> {
        let header_json = serde_json::to_vec(self)?;
        if header_json.len() as u64 > MAX_HEADER_BYTES as u64 {
            return Err(RowpackError::InternalError(format!(
                "serialized header of {} bytes exceeds the format bound",
                header_json.len()
            )));
        }
        let mut bytes = Vec::with_capacity(10 + header_json.len());
        bytes.extend_from_slice(STREAM_MAGIC);
        bytes.extend_from_slice(&STREAM_FORMAT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&(header_json.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&header_json);
        Ok(bytes)
    }

    /// Reads and validates the preamble from the head of a bit source.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, RowpackError> {
        let magic = reader.read_aligned_bytes(4)?;
        if magic != STREAM_MAGIC {
            return Err(RowpackError::CorruptStream(
                "bad magic number at stream start".to_string(),
            ));
        }

        let version_bytes = reader.read_aligned_bytes(2)?;
        let version = u16::from_le_bytes([version_bytes[0], version_bytes[1]]);
        if version != STREAM_FORMAT_VERSION {
            return Err(RowpackError::CorruptStream(format!(
                "unsupported stream format version {} (expected {})",
                version, STREAM_FORMAT_VERSION
            )));
        }

        let len_bytes = reader.read_aligned_bytes(4)?;
        let header_len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]);
        if header_len > MAX_HEADER_BYTES {
            return Err(RowpackError::CorruptStream(format!(
                "header length {} exceeds the {}-byte bound",
                header_len, MAX_HEADER_BYTES
            )));
        }

        let header_json = reader.read_aligned_bytes(header_len as usize)?;
        let header: StreamHeader = serde_json::from_slice(&header_json)?;
        Ok(header)
    }
}
