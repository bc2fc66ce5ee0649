//! Bit-granular reading and writing over byte streams.
//!
//! Bytes are filled least-significant-bit first: the first bit written to a
//! [`BitWriter`] lands in bit 0 of the current byte, and a [`BitReader`]
//! hands bits back in the same order. Multi-bit fields go through
//! [`BitWriter::write_bits`] / [`BitReader::next_bits`], which move the
//! value's most significant bit first so that fields round-trip no matter
//! how they straddle byte boundaries.

use std::io::{self, Read, Write};

use crate::error::Error;

/// Widest field `next_bits` / `write_bits` will move in one call.
pub const MAX_FIELD_WIDTH: u32 = 16;

/// Reads an underlying byte source one bit at a time.
pub struct BitReader<R: Read> {
    source: R,
    buffer: u8,
    remaining: u8,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            buffer: 0,
            remaining: 0,
        }
    }

    /// Returns the next bit, or `None` once the source is exhausted and no
    /// buffered bits remain.
    pub fn next_bit(&mut self) -> Result<Option<u8>, Error> {
        if self.remaining == 0 {
            let mut byte = [0u8];
            match self.source.read_exact(&mut byte) {
                Ok(()) => {
                    self.buffer = byte[0];
                    self.remaining = 8;
                }
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
        let bit = self.buffer & 1;
        self.buffer >>= 1;
        self.remaining -= 1;
        Ok(Some(bit))
    }

    /// Reads `width` bits (at most [`MAX_FIELD_WIDTH`]) and assembles them
    /// most-significant-bit first. Running out of bits mid-field is reported
    /// as a truncated stream.
    pub fn next_bits(&mut self, width: u32) -> Result<u16, Error> {
        if width > MAX_FIELD_WIDTH {
            return Err(Error::UnsupportedBitWidth(width));
        }
        let mut value = 0u16;
        for _ in 0..width {
            let bit = self.next_bit()?.ok_or(Error::TruncatedStream)?;
            value = (value << 1) | u16::from(bit);
        }
        Ok(value)
    }

    /// Releases the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

/// Writes an underlying byte sink one bit at a time, emitting a byte every
/// time eight bits have accumulated.
pub struct BitWriter<W: Write> {
    sink: W,
    buffer: u8,
    filled: u8,
}

impl<W: Write> BitWriter<W> {
    pub fn new(sink: W) -> Self {
        BitWriter {
            sink,
            buffer: 0,
            filled: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<(), Error> {
        if bit {
            self.buffer |= 1 << self.filled;
        }
        self.filled += 1;
        if self.filled == 8 {
            self.flush_byte()?;
        }
        Ok(())
    }

    /// Writes the low `width` bits of `value` (at most [`MAX_FIELD_WIDTH`]),
    /// most significant first, mirroring [`BitReader::next_bits`].
    pub fn write_bits(&mut self, value: u16, width: u32) -> Result<(), Error> {
        if width > MAX_FIELD_WIDTH {
            return Err(Error::UnsupportedBitWidth(width));
        }
        for shift in (0..width).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    fn flush_byte(&mut self) -> Result<(), Error> {
        self.sink.write_all(&[self.buffer])?;
        self.buffer = 0;
        self.filled = 0;
        Ok(())
    }

    /// Flushes a zero-padded partial byte if any bits are pending, flushes
    /// the sink, and releases it.
    pub fn finish(mut self) -> Result<W, Error> {
        if self.filled > 0 {
            self.flush_byte()?;
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}
