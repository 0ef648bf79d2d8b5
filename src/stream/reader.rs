// In: src/stream/reader.rs

//! This module contains `ByteReader`, the sequential, forward-only bit reader
//! the decode engine and the models pull from.
//!
//! The reader maintains a one-byte lookahead so that [`has_more`](ByteReader::has_more)
//! can answer "is there at least one unconsumed bit?" without consuming
//! anything. Premature end-of-source surfaces as a `TruncatedStream` error,
//! never a silent zero bit.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::RowpackError;

/// A forward-only bit cursor over an underlying byte source.
///
/// Invariant: whenever unconsumed bits remain, `current` is `Some` and
/// `bit_pos < 8`; the cursor advances to the lookahead byte eagerly as each
/// byte drains.
pub struct ByteReader {
    src: Box<dyn Read>,
    current: Option<u8>,
    /// Bits already consumed from `current` (0..8).
    bit_pos: u8,
    lookahead: Option<u8>,
}

impl ByteReader {
    /// Wraps any byte source.
    pub fn from_reader(src: impl Read + 'static) -> Result<Self, RowpackError> {
        let mut src: Box<dyn Read> = Box::new(src);
        let current = Self::fetch(&mut src)?;
        let lookahead = Self::fetch(&mut src)?;
        Ok(Self {
            src,
            current,
            bit_pos: 0,
            lookahead,
        })
    }

    /// Opens a compressed file and buffers it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RowpackError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Reads one byte from the source; `None` on clean end-of-source.
    fn fetch(src: &mut Box<dyn Read>) -> Result<Option<u8>, RowpackError> {
        let mut buf = [0u8; 1];
        loop {
            match src.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(RowpackError::Io(e)),
            }
        }
    }

    /// True while at least one unconsumed bit remains. Never consumes.
    pub fn has_more(&self) -> bool {
        self.current.is_some()
    }

    /// Consumes and returns the next bit.
    pub fn read_bit(&mut self) -> Result<bool, RowpackError> {
        let byte = self.current.ok_or_else(|| {
            RowpackError::TruncatedStream("bit source exhausted".to_string())
        })?;
        let bit = (byte >> (7 - self.bit_pos)) & 1 == 1;
        self.bit_pos += 1;
        if self.bit_pos == 8 {
            self.advance()?;
        }
        Ok(bit)
    }

    /// Consumes `width` bits (up to 64) and returns them right-aligned,
    /// most significant bit first.
    pub fn read_bits(&mut self, width: u32) -> Result<u64, RowpackError> {
        if width > 64 {
            return Err(RowpackError::InternalError(format!(
                "bit width {} exceeds 64",
                width
            )));
        }
        let mut value = 0u64;
        for _ in 0..width {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    /// Consumes `count` whole bytes from a byte-aligned cursor. Used for the
    /// container preamble, which is byte-granular by construction.
    pub fn read_aligned_bytes(&mut self, count: usize) -> Result<Vec<u8>, RowpackError> {
        if self.bit_pos != 0 {
            return Err(RowpackError::InternalError(
                "aligned read requested mid-byte".to_string(),
            ));
        }
        let mut bytes = Vec::with_capacity(count);
        for _ in 0..count {
            let byte = self.current.ok_or_else(|| {
                RowpackError::TruncatedStream(format!(
                    "source ended after {} of {} preamble bytes",
                    bytes.len(),
                    count
                ))
            })?;
            bytes.push(byte);
            self.advance()?;
        }
        Ok(bytes)
    }

    /// Drops the drained byte and shifts the lookahead in.
    fn advance(&mut self) -> Result<(), RowpackError> {
        self.current = self.lookahead.take();
        self.lookahead = Self::fetch(&mut self.src)?;
        self.bit_pos = 0;
        Ok(())
    }
}
