//! Bit writer for the entropy-coded segment.
//!
//! Bits are accumulated MSB first and every completed byte is emitted
//! immediately. A literal 0xFF is followed by a stuffed 0x00 so decoders
//! never mistake payload data for a marker.

use alloc::vec::Vec;

use crate::error::{EncoderResult, EncodingError, Resource};

/// # Entropy-coded output buffer
pub struct BitStream {
    bytes: Vec<u8>,
    accumulator: u32,
    bit_count: u8,
    capacity: Option<usize>,
}

impl BitStream {
    /// Create an empty stream, optionally limited to `capacity` output bytes
    pub fn new(capacity: Option<usize>) -> BitStream {
        BitStream {
            bytes: Vec::new(),
            accumulator: 0,
            bit_count: 0,
            capacity,
        }
    }

    /// Append the low `size` bits of `code`, most significant bit first
    #[inline]
    pub fn put_bits(&mut self, code: u16, size: u8) -> EncoderResult<()> {
        debug_assert!(size <= 16, "Size must be <= 16 bits");

        if size == 0 {
            return Ok(());
        }

        let mask = (1u32 << size) - 1;
        self.accumulator = (self.accumulator << size) | (u32::from(code) & mask);
        self.bit_count += size;

        while self.bit_count >= 8 {
            self.bit_count -= 8;
            let byte = (self.accumulator >> self.bit_count) as u8;
            self.emit_byte(byte)?;
        }

        self.accumulator &= (1u32 << self.bit_count) - 1;

        Ok(())
    }

    fn emit_byte(&mut self, byte: u8) -> EncoderResult<()> {
        let needed = if byte == 0xFF { 2 } else { 1 };

        if let Some(capacity) = self.capacity {
            if self.bytes.len() + needed > capacity {
                return Err(EncodingError::CapacityExceeded {
                    resource: Resource::OutputBytes,
                    capacity,
                });
            }
        }

        self.bytes.push(byte);
        if byte == 0xFF {
            self.bytes.push(0x00);
        }

        Ok(())
    }

    /// Bytes emitted so far, stuffing included
    pub fn bytes_written(&self) -> usize {
        self.bytes.len()
    }

    /// Bits waiting for a complete byte
    pub fn pending_bits(&self) -> u8 {
        self.bit_count
    }

    /// Pad the last partial byte with 1-bits and return the output
    pub fn finish(mut self) -> EncoderResult<Vec<u8>> {
        if self.bit_count > 0 {
            let padding = 8 - self.bit_count;
            let byte = ((self.accumulator << padding) | ((1u32 << padding) - 1)) as u8;
            self.bit_count = 0;
            self.accumulator = 0;
            self.emit_byte(byte)?;
        }

        Ok(self.bytes)
    }
}
