//! Bit-level I/O over byte slices.
//!
//! LZSS streams interleave one control bit per token with 8-bit literals and
//! packed back-reference fields, so every token straddles byte boundaries.
//! `BitReader` and `BitWriter` handle that packing for both bit orders.
//!
//! # Bit Ordering
//!
//! - [`BitOrder::MsbFirst`]: the first bit of the stream is the most
//!   significant bit of the first byte, and multi-bit values are stored with
//!   their most significant bit first. NScripter archives use this order.
//! - [`BitOrder::LsbFirst`]: bits are packed starting from the least
//!   significant bit of each byte, values least significant bit first.
//!
//! # Example
//!
//! ```
//! use vnarc_core::bitstream::{BitOrder, BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new(BitOrder::MsbFirst);
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let data = writer.finish();
//!
//! let mut reader = BitReader::new(&data, BitOrder::MsbFirst);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::{Result, VnArcError};

/// Order in which bits are packed into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {
    /// Most significant bit first.
    #[default]
    MsbFirst,
    /// Least significant bit first.
    LsbFirst,
}

/// A bit-level reader over a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Bit order of the stream.
    order: BitOrder,
    /// Next byte to load.
    byte_pos: usize,
    /// Bit buffer.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
}

impl<'a> BitReader<'a> {
    /// Create a new reader over `data`.
    pub fn new(data: &'a [u8], order: BitOrder) -> Self {
        Self {
            data,
            order,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Number of bits that can still be read.
    pub fn bits_remaining(&self) -> u64 {
        (self.data.len() - self.byte_pos) as u64 * 8 + self.bits_in_buffer as u64
    }

    /// Check whether at least `count` more bits are available.
    pub fn has_bits(&self, count: u8) -> bool {
        self.bits_remaining() >= count as u64
    }

    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count && self.byte_pos < self.data.len() {
            let byte = self.data[self.byte_pos] as u64;
            self.byte_pos += 1;

            match self.order {
                BitOrder::MsbFirst => self.buffer = (self.buffer << 8) | byte,
                BitOrder::LsbFirst => self.buffer |= byte << self.bits_in_buffer,
            }
            self.bits_in_buffer += 8;
        }

        if self.bits_in_buffer < count {
            let missing = (count - self.bits_in_buffer) as usize;
            return Err(VnArcError::unexpected_eof(missing.div_ceil(8)));
        }

        Ok(())
    }

    /// Read up to 32 bits from the stream.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let mask = (1u64 << count) - 1;
        let value = match self.order {
            BitOrder::MsbFirst => {
                let shift = self.bits_in_buffer - count;
                let value = (self.buffer >> shift) & mask;
                self.buffer &= (1u64 << shift).wrapping_sub(1);
                value
            }
            BitOrder::LsbFirst => {
                let value = self.buffer & mask;
                self.buffer >>= count;
                value
            }
        };

        self.bits_in_buffer -= count;

        Ok(value as u32)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }
}

/// A bit-level writer producing a byte vector.
#[derive(Debug)]
pub struct BitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit order of the stream.
    order: BitOrder,
    /// Bit buffer.
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
}

impl BitWriter {
    /// Create a new writer.
    pub fn new(order: BitOrder) -> Self {
        Self {
            output: Vec::new(),
            order,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Write the low `count` bits of `value` (up to 32).
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        if count > 32 {
            return Err(VnArcError::invalid_config(format!(
                "cannot write {} bits at once",
                count
            )));
        }
        if count == 0 {
            return Ok(());
        }

        let value = value as u64 & ((1u64 << count) - 1);
        match self.order {
            BitOrder::MsbFirst => {
                self.buffer = (self.buffer << count) | value;
                self.bits_in_buffer += count;
                while self.bits_in_buffer >= 8 {
                    let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
                    self.output.push(byte);
                    self.bits_in_buffer -= 8;
                }
                self.buffer &= (1u64 << self.bits_in_buffer) - 1;
            }
            BitOrder::LsbFirst => {
                self.buffer |= value << self.bits_in_buffer;
                self.bits_in_buffer += count;
                while self.bits_in_buffer >= 8 {
                    self.output.push(self.buffer as u8);
                    self.buffer >>= 8;
                    self.bits_in_buffer -= 8;
                }
            }
        }

        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad the last partial byte with zero bits and return the output.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let byte = match self.order {
                BitOrder::MsbFirst => (self.buffer << (8 - self.bits_in_buffer)) as u8,
                BitOrder::LsbFirst => self.buffer as u8,
            };
            self.output.push(byte);
        }
        self.output
    }
}
