// In: src/engine/decompressor.rs

//! A high-level, stateful object that reconstructs tuples from a rowpack
//! stream.
//!
//! Lifecycle: construct over a bit source, `init()` once (reads and
//! validates the container preamble, fixes the attribute order), then drain
//! with `has_next()` / `read_next_tuple()`. Configuration problems surface at
//! `init()`; stream corruption surfaces on the failing read and poisons the
//! engine — there is no partial-tuple recovery against a deterministic byte
//! stream, a caller that wants to retry builds a fresh engine.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::attribute::TypeRegistry;
use crate::config::CodecConfig;
use crate::engine::format::StreamHeader;
use crate::error::RowpackError;
use crate::model::{validate_plan, ColumnContext, Model};
use crate::schema::{Schema, Tuple};
use crate::stream::ByteReader;
use crate::types::AttrValue;

/// Decode engine state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    /// Constructed; `init()` has not run.
    Created,
    /// At least one more tuple is decodable.
    Ready,
    /// Every tuple promised by the header has been produced.
    Exhausted,
    /// A decode failed; further reading is refused.
    Poisoned,
}

/// Stateful decode engine. One instance per input stream; not shareable
/// across threads mid-stream (every read mutates the cursor).
pub struct Decompressor {
    reader: ByteReader,
    schema: Schema,
    models: Vec<Box<dyn Model>>,
    registry: Arc<TypeRegistry>,
    config: CodecConfig,
    /// Read from the stream header at `init()`.
    attr_order: Vec<usize>,
    remaining: u64,
    state: EngineState,
}

impl Decompressor {
    /// Builds an engine over an already-open bit source. The model array is
    /// index-aligned with the schema; the attribute order travels in the
    /// stream itself.
    pub fn new(
        reader: ByteReader,
        schema: Schema,
        models: Vec<Box<dyn Model>>,
        registry: Arc<TypeRegistry>,
        config: CodecConfig,
    ) -> Result<Self, RowpackError> {
        schema.check_registered(&registry)?;
        if models.len() != schema.len() {
            return Err(RowpackError::ConfigMismatch(format!(
                "schema has {} columns but {} models were supplied",
                schema.len(),
                models.len()
            )));
        }
        Ok(Self {
            reader,
            schema,
            models,
            registry,
            config,
            attr_order: Vec::new(),
            remaining: 0,
            state: EngineState::Created,
        })
    }

    /// Opens a compressed file and builds an engine over it.
    pub fn from_path(
        path: impl AsRef<Path>,
        schema: Schema,
        models: Vec<Box<dyn Model>>,
        registry: Arc<TypeRegistry>,
        config: CodecConfig,
    ) -> Result<Self, RowpackError> {
        Self::new(ByteReader::from_path(path)?, schema, models, registry, config)
    }

    /// Convenience constructor over any byte source.
    pub fn from_reader(
        src: impl Read + 'static,
        schema: Schema,
        models: Vec<Box<dyn Model>>,
        registry: Arc<TypeRegistry>,
        config: CodecConfig,
    ) -> Result<Self, RowpackError> {
        Self::new(ByteReader::from_reader(src)?, schema, models, registry, config)
    }

    /// Reads and validates the container preamble, fixes the attribute
    /// order, and primes end-of-stream detection. Must run exactly once,
    /// before any read.
    pub fn init(&mut self) -> Result<(), RowpackError> {
        if self.state != EngineState::Created {
            return Err(RowpackError::EngineState("init() already ran"));
        }

        let header = StreamHeader::read_from(&mut self.reader)?;
        if self.config.strict_schema && header.schema != self.schema {
            return Err(RowpackError::ConfigMismatch(format!(
                "stream was written against a different schema ({} columns vs {})",
                header.schema.len(),
                self.schema.len()
            )));
        }
        validate_plan(&self.schema, &self.models, &header.attr_order)?;

        log::debug!(
            "stream initialized: {} tuples, attribute order {:?}, writer {}",
            header.num_tuples,
            header.attr_order,
            header.writer_version
        );

        self.attr_order = header.attr_order;
        self.remaining = header.num_tuples;
        self.state = if self.remaining == 0 {
            EngineState::Exhausted
        } else {
            EngineState::Ready
        };
        Ok(())
    }

    /// True while at least one more tuple can be decoded.
    pub fn has_next(&self) -> bool {
        self.state == EngineState::Ready
    }

    /// Decodes the next tuple. Calling this before `init()`, after
    /// exhaustion, or after a decode failure is a contract violation and
    /// fails loudly instead of producing a garbage tuple.
    pub fn read_next_tuple(&mut self) -> Result<Tuple, RowpackError> {
        match self.state {
            EngineState::Ready => {}
            EngineState::Created => {
                return Err(RowpackError::EngineState("init() has not run"));
            }
            EngineState::Exhausted => {
                return Err(RowpackError::EngineState("stream is exhausted"));
            }
            EngineState::Poisoned => {
                return Err(RowpackError::EngineState(
                    "a prior decode failure poisoned this engine",
                ));
            }
        }

        match self.decode_one() {
            Ok(tuple) => {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.state = EngineState::Exhausted;
                }
                Ok(tuple)
            }
            Err(e) => {
                log::warn!("tuple decode failed with {} tuples remaining: {}", self.remaining, e);
                self.state = EngineState::Poisoned;
                Err(e)
            }
        }
    }

    /// Decodes one tuple's columns strictly in attribute order. Each model
    /// observes, through the context, only columns materialized earlier in
    /// that order; bit consumption from the shared source follows the same
    /// sequence exactly.
    fn decode_one(&mut self) -> Result<Tuple, RowpackError> {
        let mut slots: Vec<Option<AttrValue>> = (0..self.schema.len()).map(|_| None).collect();

        for &column in &self.attr_order {
            let value = {
                let ctx = ColumnContext::new(&slots);
                self.models[column].decode_value(&ctx, &mut self.reader)?
            };

            // A model that hands back the wrong physical kind is
            // misconfigured; catch it before the value reaches a tuple slot.
            let attr_type = self.schema.attr_type(column).ok_or_else(|| {
                RowpackError::InternalError(format!("column {} missing from schema", column))
            })?;
            let expected = self.registry.base_type_of(attr_type)?;
            if value.base_type() != expected {
                return Err(RowpackError::ModelError(format!(
                    "model for column {} produced a {} value where the schema requires {}",
                    column,
                    value.base_type(),
                    expected
                )));
            }

            slots[column] = Some(value);
        }

        let mut values = Vec::with_capacity(slots.len());
        for (column, slot) in slots.into_iter().enumerate() {
            values.push(slot.ok_or_else(|| {
                RowpackError::InternalError(format!(
                    "column {} was never materialized by the attribute order",
                    column
                ))
            })?);
        }
        Ok(Tuple::new(values))
    }
}
