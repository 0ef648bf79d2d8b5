//! This module contains the pure, stateless kernels for LEB128
//! (Little-Endian Base 128) variable-length integer encoding and decoding
//! over the bit transport.
//!
//! LEB128 groups are byte-shaped (7 payload bits plus a continuation bit),
//! so each group occupies exactly eight bits of the stream regardless of the
//! cursor's alignment. Ideal for unsigned values where most are small. Fully
//! panic-free.

use num_traits::{PrimInt, Unsigned};

use crate::error::RowpackError;
use crate::stream::{ByteReader, ByteWriter};

/// Encodes a single unsigned integer as a LEB128 group sequence on the bit stream.
pub fn encode_one<T>(value: T, writer: &mut ByteWriter) -> Result<(), RowpackError>
where
    T: PrimInt + Unsigned,
{
    let zero = T::zero();
    let seven_bit_mask = T::from(0x7F).ok_or_else(|| {
        RowpackError::InternalError("failed to create 7-bit mask for type".to_string())
    })?;

    let mut current_value = value;
    loop {
        let payload = current_value & seven_bit_mask;
        current_value = current_value >> 7;

        let mut byte = payload.to_u8().ok_or_else(|| {
            RowpackError::InternalError("failed to narrow LEB128 payload to u8".to_string())
        })?;
        if current_value != zero {
            byte |= 0x80;
        }
        writer.write_bits(byte as u64, 8)?;

        if current_value == zero {
            return Ok(());
        }
    }
}

/// Decodes a single unsigned integer from a LEB128 group sequence on the bit stream.
pub fn decode_one<T>(reader: &mut ByteReader) -> Result<T, RowpackError>
where
    T: PrimInt + Unsigned,
{
    let mut result = T::zero();
    let mut shift = 0usize;
    let total_bits = std::mem::size_of::<T>() * 8;

    loop {
        let byte = reader.read_bits(8)? as u8;

        let seven_bit_payload = T::from(byte & 0x7F).ok_or_else(|| {
            RowpackError::InternalError("failed to widen LEB128 payload".to_string())
        })?;

        // Adding these 7 bits must not overflow the type's capacity.
        if shift >= total_bits {
            return Err(RowpackError::Leb128DecodeError(
                "integer overflow during decoding".to_string(),
            ));
        }

        result = result | (seven_bit_payload << shift);

        if byte & 0x80 == 0 {
            // Final group: bits set beyond the type's width are an overflow.
            // This happens when the type's width is not a multiple of 7.
            if shift + 7 > total_bits && (byte >> (total_bits - shift)) > 0 {
                return Err(RowpackError::Leb128DecodeError(
                    "integer overflow during decoding".to_string(),
                ));
            }
            return Ok(result);
        }

        shift += 7;
    }
}
