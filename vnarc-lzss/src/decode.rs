//! LZSS decompression.
//!
//! The stream is a sequence of tokens, each introduced by one control bit:
//!
//! ```text
//! literal:    [flag = literal_flag] [byte: 8 bits]
//! reference:  [flag = !literal_flag] [position: window_bits] [length - min_match: length_bits]
//! ```
//!
//! Decoding stops when the remaining bits cannot hold a complete token, which
//! is how the zero padding of the final byte is skipped, or once an optional
//! output limit is reached. Archive tables record the original size of each
//! payload, and bytes after that many outputs are ignored.

use crate::config::LzssConfig;
use vnarc_core::bitstream::BitReader;
use vnarc_core::error::{Result, VnArcError};
use vnarc_core::window::SlidingWindow;

/// LZSS decoder state for one stream.
#[derive(Debug)]
pub struct LzssDecoder {
    /// Coder parameters.
    config: LzssConfig,
    /// Window addressed by references.
    window: SlidingWindow,
    /// Output buffer.
    output: Vec<u8>,
    /// Stop after this many output bytes.
    limit: Option<usize>,
}

impl LzssDecoder {
    /// Create a decoder with a fresh window.
    pub fn new(config: LzssConfig) -> Result<Self> {
        config.validate()?;
        let window = SlidingWindow::new(
            config.window_size(),
            config.initial_position,
            config.fill_byte,
        )?;
        Ok(Self {
            config,
            window,
            output: Vec::new(),
            limit: None,
        })
    }

    /// Builder method to stop decoding after `limit` output bytes.
    pub fn with_output_limit(mut self, limit: usize) -> Self {
        self.output.reserve(limit.min(1 << 20));
        self.limit = Some(limit);
        self
    }

    fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.output.len() >= limit)
    }

    /// Decode a literal byte.
    pub fn decode_literal(&mut self, byte: u8) {
        self.window.write_byte(byte);
        self.output.push(byte);
    }

    /// Decode a reference copying `length` bytes starting at window slot
    /// `position`.
    ///
    /// The copy is cut short at the output limit.
    pub fn decode_match(&mut self, position: usize, length: usize) -> Result<()> {
        for k in 0..length {
            if self.is_full() {
                break;
            }
            let slot = self.window.wrap(position + k);
            let byte = self
                .window
                .get(slot)
                .ok_or_else(|| VnArcError::invalid_reference(slot, self.output.len()))?;
            if self.config.reuse_compressed {
                self.window.write_byte(byte);
            }
            self.output.push(byte);
        }
        Ok(())
    }

    /// Decode a complete stream, appending to the output.
    pub fn decode(&mut self, data: &[u8]) -> Result<()> {
        let mut reader = BitReader::new(data, self.config.bit_order);
        let reference_bits = self.config.reference_bits();

        while reader.has_bits(1) && !self.is_full() {
            let flag = reader.read_bit()?;
            if flag == self.config.literal_flag {
                if !reader.has_bits(8) {
                    break;
                }
                let byte = reader.read_bits(8)? as u8;
                self.decode_literal(byte);
            } else {
                if !reader.has_bits(reference_bits) {
                    break;
                }
                let position = reader.read_bits(self.config.window_bits)? as usize;
                let length = reader.read_bits(self.config.length_bits)? as usize;
                self.decode_match(position, length + self.config.min_match)?;
            }
        }

        Ok(())
    }

    /// Get the decoded output.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Take the decoded output.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

}

/// Decompress an LZSS stream.
///
/// # Example
///
/// ```rust
/// use vnarc_lzss::{LzssConfig, decode};
///
/// let data = decode(&[0xA0, 0xD0, 0x9D, 0xE4], &LzssConfig::NSA).unwrap();
/// assert_eq!(data, b"ABABAB");
/// ```
pub fn decode(data: &[u8], config: &LzssConfig) -> Result<Vec<u8>> {
    let mut decoder = LzssDecoder::new(*config)?;
    decoder.decode(data)?;
    Ok(decoder.take_output())
}

/// Decompress an LZSS stream into at most `limit` bytes.
///
/// Tokens after the limit are not decoded, so spare bytes after the end of
/// the data are harmless.
pub fn decode_bounded(data: &[u8], config: &LzssConfig, limit: usize) -> Result<Vec<u8>> {
    let mut decoder = LzssDecoder::new(*config)?.with_output_limit(limit);
    decoder.decode(data)?;
    Ok(decoder.take_output())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty() {
        assert!(decode(&[], &LzssConfig::NSA).unwrap().is_empty());
    }

    #[test]
    fn test_decode_literal() {
        // 1 01000001, padded
        assert_eq!(decode(&[0xA0, 0x80], &LzssConfig::NSA).unwrap(), b"A");
    }

    #[test]
    fn test_decode_match_from_prefill() {
        let mut decoder = LzssDecoder::new(LzssConfig::NSA).unwrap();
        decoder.decode_match(0, 5).unwrap();
        assert_eq!(decoder.output(), &[0u8; 5]);
    }

    #[test]
    fn test_decode_overlapping_match() {
        let mut decoder = LzssDecoder::new(LzssConfig::NSA).unwrap();
        decoder.decode_literal(b'x');
        decoder.decode_literal(b'y');
        // Slot 239 holds 'x'; the copy runs into bytes it writes itself
        decoder.decode_match(239, 6).unwrap();
        assert_eq!(decoder.output(), b"xyxyxyxy");
    }

    #[test]
    fn test_decode_without_reuse() {
        let config = LzssConfig::NSA.with_reuse_compressed(false);
        let mut decoder = LzssDecoder::new(config).unwrap();
        decoder.decode_literal(b'x');
        decoder.decode_literal(b'y');
        // Copied bytes do not enter the window, so slot 241 still holds 0
        decoder.decode_match(239, 4).unwrap();
        assert_eq!(decoder.output(), b"xyxy\0\0");
        decoder.decode_literal(b'z');
        assert_eq!(decoder.window.get(241), Some(b'z'));
    }

    #[test]
    fn test_decode_unwritten_slot() {
        let config = LzssConfig::NSA.with_fill_byte(None);
        let mut decoder = LzssDecoder::new(config).unwrap();
        decoder.decode_literal(b'a');

        decoder.decode_match(239, 3).unwrap();
        assert_eq!(decoder.output(), b"aaaa");

        let err = decoder.decode_match(0, 3).unwrap_err();
        assert!(matches!(
            err,
            VnArcError::InvalidReference {
                position: 0,
                output_len: 4
            }
        ));
    }

    #[test]
    fn test_decode_bounded() {
        let stream = [0xA0, 0xD0, 0x9D, 0xE4];
        assert_eq!(decode_bounded(&stream, &LzssConfig::NSA, 3).unwrap(), b"ABA");
        assert_eq!(decode_bounded(&stream, &LzssConfig::NSA, 100).unwrap(), b"ABABAB");
        assert!(decode_bounded(&stream, &LzssConfig::NSA, 0).unwrap().is_empty());
    }

    #[test]
    fn test_decode_ignores_spare_bytes_after_limit() {
        // 'A', then a spare 0xFF that reads as a 17-byte match from slot 3
        let stream = [0xA0, 0x80, 0xFF];
        assert_eq!(decode(&stream, &LzssConfig::NSA).unwrap().len(), 18);
        assert_eq!(decode_bounded(&stream, &LzssConfig::NSA, 1).unwrap(), b"A");
    }

    #[test]
    fn test_decode_rejects_bad_config() {
        let config = LzssConfig::new(8, 4, 0);
        assert!(matches!(
            decode(&[0xFF], &config),
            Err(VnArcError::InvalidConfig { .. })
        ));
    }
}
