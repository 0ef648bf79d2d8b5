// In: src/engine/compressor.rs

//! A high-level, stateful object that encodes schema-conformant tuples into a
//! rowpack stream.
//!
//! The compressor validates its whole plan (schema registration, model-array
//! shape, attribute-order validity) at construction, encodes each appended
//! tuple column-by-column in attribute order, and writes the container
//! preamble plus the accumulated payload on `finish`. Columns are encoded
//! with exactly the restricted context the decoder will be able to
//! reconstruct, so encode and decode stay bit-symmetric by construction.

use std::io::Write;
use std::sync::Arc;

use crate::attribute::TypeRegistry;
use crate::config::CodecConfig;
use crate::engine::format::StreamHeader;
use crate::error::RowpackError;
use crate::model::{validate_plan, ColumnContext, Model};
use crate::schema::{Schema, Tuple};
use crate::stream::ByteWriter;
use crate::types::AttrValue;

/// Stateful encode engine. One instance per output stream.
pub struct Compressor<W: Write> {
    sink: W,
    schema: Schema,
    models: Vec<Box<dyn Model>>,
    attr_order: Vec<usize>,
    registry: Arc<TypeRegistry>,
    config: CodecConfig,
    /// Columns some model conditions on; only these are materialized into
    /// the encode-side context.
    context_columns: Vec<bool>,
    payload: ByteWriter,
    num_tuples: u64,
}

impl<W: Write> Compressor<W> {
    /// Builds an engine over `sink`. The attribute order is the sequence the
    /// upstream dependency analysis chose; it is validated here (length,
    /// permutation validity, declared-dependency ordering) and recorded in
    /// the stream header verbatim.
    pub fn new(
        sink: W,
        schema: Schema,
        models: Vec<Box<dyn Model>>,
        attr_order: Vec<usize>,
        registry: Arc<TypeRegistry>,
        config: CodecConfig,
    ) -> Result<Self, RowpackError> {
        schema.check_registered(&registry)?;
        validate_plan(&schema, &models, &attr_order)?;

        let mut context_columns = vec![false; schema.len()];
        for model in &models {
            for &dep in model.dependencies() {
                context_columns[dep] = true;
            }
        }

        Ok(Self {
            sink,
            schema,
            models,
            attr_order,
            registry,
            config,
            context_columns,
            payload: ByteWriter::new(),
            num_tuples: 0,
        })
    }

    /// Encodes one tuple onto the payload, column by column in attribute
    /// order. Each model sees only the columns materialized earlier in that
    /// order, mirroring what the decoder will see.
    pub fn append_tuple(&mut self, tuple: &Tuple) -> Result<(), RowpackError> {
        if self.config.validate_tuples {
            self.schema.check_tuple(tuple, &self.registry)?;
        }

        let mut slots: Vec<Option<AttrValue>> = (0..self.schema.len()).map(|_| None).collect();
        for &column in &self.attr_order {
            let ctx = ColumnContext::new(&slots);
            self.models[column].encode_value(tuple.value(column)?, &ctx, &mut self.payload)?;

            if self.context_columns[column] {
                // Context slots are rebuilt through the registry, the same
                // sanctioned copy path the tuple helpers use.
                let attr_type = self.schema.attr_type(column).ok_or_else(|| {
                    RowpackError::InternalError(format!("column {} missing from schema", column))
                })?;
                slots[column] =
                    Some(self.registry.duplicate_value(attr_type, tuple.value(column)?)?);
            }
        }

        self.num_tuples += 1;
        Ok(())
    }

    /// Number of tuples appended so far.
    pub fn num_tuples(&self) -> u64 {
        self.num_tuples
    }

    /// Writes the container preamble and the payload, flushes, and returns
    /// the sink.
    pub fn finish(mut self) -> Result<W, RowpackError> {
        let header = StreamHeader {
            schema: self.schema,
            attr_order: self.attr_order,
            num_tuples: self.num_tuples,
            writer_version: crate::VERSION.to_string(),
        };
        let preamble = header.to_bytes()?;
        let payload = self.payload.into_bytes();

        log::info!(
            "finishing stream: {} tuples, {} preamble bytes, {} payload bytes",
            header.num_tuples,
            preamble.len(),
            payload.len()
        );

        self.sink.write_all(&preamble)?;
        self.sink.write_all(&payload)?;
        self.sink.flush()?;
        Ok(self.sink)
    }
}
