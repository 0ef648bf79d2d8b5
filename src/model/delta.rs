// In: src/model/delta.rs

//! A conditioned reference model: an integer column coded as the difference
//! against another integer column of the same tuple.
//!
//! This is the smallest useful exploitation of an inter-attribute dependency
//! (think `end_time` against `start_time`, or a price against a reference
//! price). It also exercises the whole conditioning protocol: a declared
//! dependency, order validation at configuration time, and context access at
//! decode time.

use crate::error::RowpackError;
use crate::kernels::{leb128, zigzag};
use crate::model::{ColumnContext, Model};
use crate::stream::{ByteReader, ByteWriter};
use crate::types::AttrValue;

/// Integer column code: ZigZag+LEB128 of `value - base_column`.
///
/// Differences wrap modulo 2^64, so the code is lossless across the whole
/// `i64` range.
pub struct DeltaIntegerModel {
    deps: [usize; 1],
}

impl DeltaIntegerModel {
    /// `base_column` is the schema index of the integer column this model
    /// conditions on.
    pub fn new(base_column: usize) -> Self {
        Self {
            deps: [base_column],
        }
    }

    fn base_column(&self) -> usize {
        self.deps[0]
    }

    fn base_value(&self, ctx: &ColumnContext<'_>) -> Result<i64, RowpackError> {
        ctx.value(self.base_column())?.as_integer()
    }
}

impl Model for DeltaIntegerModel {
    fn dependencies(&self) -> &[usize] {
        &self.deps
    }

    fn encode_value(
        &self,
        value: &AttrValue,
        ctx: &ColumnContext<'_>,
        writer: &mut ByteWriter,
    ) -> Result<(), RowpackError> {
        let delta = value.as_integer()?.wrapping_sub(self.base_value(ctx)?);
        leb128::encode_one(zigzag::encode(delta), writer)
    }

    fn decode_value(
        &self,
        ctx: &ColumnContext<'_>,
        reader: &mut ByteReader,
    ) -> Result<AttrValue, RowpackError> {
        let delta = zigzag::decode(leb128::decode_one::<u64>(reader)?);
        Ok(AttrValue::Integer(self.base_value(ctx)?.wrapping_add(delta)))
    }
}
