// In: src/model/plain.rs

//! Unconditioned reference models, one per physical base type.
//!
//! These are the "standard column" codes: no inter-attribute conditioning,
//! just a compact self-delimited representation of each value. They double as
//! the fallback a planner reaches for when no usable dependency exists for a
//! column.

use crate::error::RowpackError;
use crate::kernels::{leb128, zigzag};
use crate::model::{ColumnContext, Model};
use crate::stream::{ByteReader, ByteWriter};
use crate::types::AttrValue;

//==================================================================================
// 1. Integer
//==================================================================================

/// Integer column code: ZigZag fold, then LEB128 groups.
pub struct PlainIntegerModel;

impl PlainIntegerModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainIntegerModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for PlainIntegerModel {
    fn encode_value(
        &self,
        value: &AttrValue,
        _ctx: &ColumnContext<'_>,
        writer: &mut ByteWriter,
    ) -> Result<(), RowpackError> {
        leb128::encode_one(zigzag::encode(value.as_integer()?), writer)
    }

    fn decode_value(
        &self,
        _ctx: &ColumnContext<'_>,
        reader: &mut ByteReader,
    ) -> Result<AttrValue, RowpackError> {
        let image = leb128::decode_one::<u64>(reader)?;
        Ok(AttrValue::Integer(zigzag::decode(image)))
    }
}

//==================================================================================
// 2. Double
//==================================================================================

/// Double column code: the raw 64-bit IEEE-754 image.
pub struct PlainDoubleModel;

impl PlainDoubleModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainDoubleModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for PlainDoubleModel {
    fn encode_value(
        &self,
        value: &AttrValue,
        _ctx: &ColumnContext<'_>,
        writer: &mut ByteWriter,
    ) -> Result<(), RowpackError> {
        writer.write_bits(value.as_double()?.to_bits(), 64)
    }

    fn decode_value(
        &self,
        _ctx: &ColumnContext<'_>,
        reader: &mut ByteReader,
    ) -> Result<AttrValue, RowpackError> {
        Ok(AttrValue::Double(f64::from_bits(reader.read_bits(64)?)))
    }
}

//==================================================================================
// 3. String
//==================================================================================

/// Default cap on a decoded string payload. A corrupted length prefix must
/// not translate into an unbounded allocation.
pub const DEFAULT_MAX_STRING_BYTES: usize = 1 << 20;

/// String column code: LEB128 byte length, then the UTF-8 bytes.
pub struct PlainStringModel {
    max_bytes: usize,
}

impl PlainStringModel {
    pub fn new() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_STRING_BYTES,
        }
    }

    /// Overrides the decode-side payload cap.
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl Default for PlainStringModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for PlainStringModel {
    fn encode_value(
        &self,
        value: &AttrValue,
        _ctx: &ColumnContext<'_>,
        writer: &mut ByteWriter,
    ) -> Result<(), RowpackError> {
        let bytes = value.as_text()?.as_bytes();
        leb128::encode_one(bytes.len() as u64, writer)?;
        for &byte in bytes {
            writer.write_bits(byte as u64, 8)?;
        }
        Ok(())
    }

    fn decode_value(
        &self,
        _ctx: &ColumnContext<'_>,
        reader: &mut ByteReader,
    ) -> Result<AttrValue, RowpackError> {
        let len = leb128::decode_one::<u64>(reader)? as usize;
        if len > self.max_bytes {
            return Err(RowpackError::CorruptStream(format!(
                "string length {} exceeds the {}-byte cap",
                len, self.max_bytes
            )));
        }
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push(reader.read_bits(8)? as u8);
        }
        let text = String::from_utf8(bytes).map_err(|e| {
            RowpackError::CorruptStream(format!("string payload is not valid UTF-8: {}", e))
        })?;
        Ok(AttrValue::String(text))
    }
}

//==================================================================================
// 4. Enum
//==================================================================================

/// Enum column code: a fixed-width index, width = ceil(log2(domain)).
///
/// A domain of one needs zero bits; the single member is implicit.
pub struct PlainEnumModel {
    domain_size: usize,
    bit_width: u32,
}

impl PlainEnumModel {
    /// `domain_size` must be at least 1.
    pub fn new(domain_size: usize) -> Result<Self, RowpackError> {
        if domain_size == 0 {
            return Err(RowpackError::ConfigMismatch(
                "enum model requires a non-empty domain".to_string(),
            ));
        }
        let bit_width = usize::BITS - (domain_size - 1).leading_zeros();
        Ok(Self {
            domain_size,
            bit_width,
        })
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }
}

impl Model for PlainEnumModel {
    fn encode_value(
        &self,
        value: &AttrValue,
        _ctx: &ColumnContext<'_>,
        writer: &mut ByteWriter,
    ) -> Result<(), RowpackError> {
        let index = value.as_index()?;
        if index >= self.domain_size {
            return Err(RowpackError::ModelError(format!(
                "enum index {} outside domain of size {}",
                index, self.domain_size
            )));
        }
        writer.write_bits(index as u64, self.bit_width)
    }

    fn decode_value(
        &self,
        _ctx: &ColumnContext<'_>,
        reader: &mut ByteReader,
    ) -> Result<AttrValue, RowpackError> {
        let index = reader.read_bits(self.bit_width)? as usize;
        if index >= self.domain_size {
            return Err(RowpackError::CorruptStream(format!(
                "enum index {} outside domain of size {}",
                index, self.domain_size
            )));
        }
        Ok(AttrValue::Enum(index))
    }
}
