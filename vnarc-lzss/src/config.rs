//! LZSS configuration for different engines.
//!
//! The token layout, window geometry and window initialization all vary
//! between engines, so none of them is hard-coded in the coder. A
//! configuration is a plain `Copy` value passed to every encode/decode call.

use vnarc_core::bitstream::BitOrder;
use vnarc_core::error::{Result, VnArcError};

/// LZSS configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzssConfig {
    /// Width of the window-position field; the window holds
    /// `1 << window_bits` bytes.
    pub window_bits: u8,
    /// Width of the match-length field.
    pub length_bits: u8,
    /// Shortest match that is encoded as a reference. Stored lengths are
    /// biased by this value.
    pub min_match: usize,
    /// Window slot that receives the first output byte.
    pub initial_position: usize,
    /// Whether bytes produced by back-references are written back into the
    /// window.
    ///
    /// NScripter's coder does this, so a match may point into output that was
    /// itself produced by earlier matches. With `false` only literals enter
    /// the window. Both sides of a stream must agree; streams are not
    /// interchangeable between the two settings.
    pub reuse_compressed: bool,
    /// Value of the control bit that announces a literal.
    pub literal_flag: bool,
    /// Bit packing order of the stream.
    pub bit_order: BitOrder,
    /// `Some(byte)` fills the initial window with `byte`; `None` leaves the
    /// window empty, and references to unwritten slots are errors.
    pub fill_byte: Option<u8>,
}

impl LzssConfig {
    /// NScripter NSA configuration.
    ///
    /// - 256-byte window, 8-bit positions, 4-bit lengths, matches of 2..=17
    /// - Writing starts at slot 239 of a zero-filled window
    /// - Control bit 1 announces a literal, MSB-first packing
    /// - Matched bytes are written back into the window
    pub const NSA: Self = Self {
        window_bits: 8,
        length_bits: 4,
        min_match: 2,
        initial_position: 239,
        reuse_compressed: true,
        literal_flag: true,
        bit_order: BitOrder::MsbFirst,
        fill_byte: Some(0),
    };

    /// Create a configuration with the given token geometry.
    ///
    /// The remaining parameters start at: initial position 0, matched bytes
    /// written back, control bit 1 for literals, MSB-first, zero-filled window.
    pub fn new(window_bits: u8, length_bits: u8, min_match: usize) -> Self {
        Self {
            window_bits,
            length_bits,
            min_match,
            initial_position: 0,
            reuse_compressed: true,
            literal_flag: true,
            bit_order: BitOrder::MsbFirst,
            fill_byte: Some(0),
        }
    }

    /// Builder method to set the initial window position.
    pub fn with_initial_position(mut self, position: usize) -> Self {
        self.initial_position = position;
        self
    }

    /// Builder method to set whether matched bytes re-enter the window.
    pub fn with_reuse_compressed(mut self, reuse: bool) -> Self {
        self.reuse_compressed = reuse;
        self
    }

    /// Builder method to set the literal control bit.
    pub fn with_literal_flag(mut self, flag: bool) -> Self {
        self.literal_flag = flag;
        self
    }

    /// Builder method to set the bit order.
    pub fn with_bit_order(mut self, order: BitOrder) -> Self {
        self.bit_order = order;
        self
    }

    /// Builder method to set the initial window fill.
    pub fn with_fill_byte(mut self, fill: Option<u8>) -> Self {
        self.fill_byte = fill;
        self
    }

    /// Window size in bytes.
    pub fn window_size(&self) -> usize {
        1 << self.window_bits
    }

    /// Longest encodable match.
    pub fn max_match(&self) -> usize {
        self.min_match + (1 << self.length_bits) - 1
    }

    /// Bits occupied by a reference token after its control bit.
    pub fn reference_bits(&self) -> u8 {
        self.window_bits + self.length_bits
    }

    /// Check that the parameters describe a usable coder.
    pub fn validate(&self) -> Result<()> {
        if !(1..=16).contains(&self.window_bits) {
            return Err(VnArcError::invalid_config(format!(
                "window_bits must be 1..=16, got {}",
                self.window_bits
            )));
        }
        if !(1..=8).contains(&self.length_bits) {
            return Err(VnArcError::invalid_config(format!(
                "length_bits must be 1..=8, got {}",
                self.length_bits
            )));
        }
        // A reference shorter than a byte could be read out of the zero
        // padding that ends every stream.
        if self.reference_bits() < 7 {
            return Err(VnArcError::invalid_config(format!(
                "reference tokens need at least 7 bits after the flag, got {}",
                self.reference_bits()
            )));
        }
        if self.min_match == 0 {
            return Err(VnArcError::invalid_config("min_match must be at least 1"));
        }
        if self.max_match() >= self.window_size() {
            return Err(VnArcError::invalid_config(format!(
                "matches of up to {} bytes do not fit a {}-byte window",
                self.max_match(),
                self.window_size()
            )));
        }
        if self.initial_position >= self.window_size() {
            return Err(VnArcError::invalid_config(format!(
                "initial position {} outside a {}-byte window",
                self.initial_position,
                self.window_size()
            )));
        }
        Ok(())
    }
}

impl Default for LzssConfig {
    fn default() -> Self {
        Self::NSA
    }
}
