//! LZSS compression.
//!
//! The encoder is greedy: at every position it emits the longest match the
//! window offers, or a literal when no match reaches `min_match`. Match search
//! runs against a replica of the decoder's window, so a reference is only
//! emitted if the decoder will reproduce exactly those bytes.

use crate::config::LzssConfig;
use vnarc_core::bitstream::BitWriter;
use vnarc_core::error::Result;
use vnarc_core::window::SlidingWindow;

/// LZSS token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssToken {
    /// A literal byte.
    Literal(u8),
    /// A copy from the window.
    Match {
        /// Absolute window slot where the copy starts.
        position: usize,
        /// Number of bytes to copy.
        length: usize,
    },
}

/// LZSS encoder state for one stream.
#[derive(Debug)]
pub struct LzssEncoder {
    /// Coder parameters.
    config: LzssConfig,
    /// Replica of the decoder's window.
    window: SlidingWindow,
}

impl LzssEncoder {
    /// Create an encoder with a fresh window.
    pub fn new(config: LzssConfig) -> Result<Self> {
        config.validate()?;
        let window = SlidingWindow::new(
            config.window_size(),
            config.initial_position,
            config.fill_byte,
        )?;
        Ok(Self { config, window })
    }

    /// Number of bytes a copy starting at `start` would reproduce.
    ///
    /// With `reuse_compressed`, byte `k` of a copy lands in the window before
    /// byte `k + 1` is read, so slots ahead of the write position that the
    /// copy itself has already filled hold lookahead bytes.
    fn match_length(&self, start: usize, lookahead: &[u8], max_len: usize) -> usize {
        let size = self.window.capacity();
        let pos = self.window.position();

        let mut len = 0;
        while len < max_len {
            let slot = self.window.wrap(start + len);
            let written_ahead = self.window.wrap(slot + size - pos);
            let byte = if self.config.reuse_compressed && written_ahead < len {
                Some(lookahead[written_ahead])
            } else {
                self.window.get(slot)
            };

            if byte != Some(lookahead[len]) {
                break;
            }
            len += 1;
        }
        len
    }

    /// Find the longest match for `lookahead` at the current position.
    ///
    /// Candidates are tried from the most recently written slot backwards, and
    /// only a strictly longer match replaces the current best.
    fn find_match(&self, lookahead: &[u8]) -> Option<(usize, usize)> {
        let max_len = lookahead.len().min(self.config.max_match());
        if max_len < self.config.min_match {
            return None;
        }

        let size = self.window.capacity();
        let pos = self.window.position();
        let mut best_len = self.config.min_match - 1;
        let mut best_pos = None;

        for distance in 1..=size {
            let start = self.window.wrap(pos + size - distance);
            let len = self.match_length(start, lookahead, max_len);
            if len > best_len {
                best_len = len;
                best_pos = Some(start);
                if len == max_len {
                    break;
                }
            }
        }

        best_pos.map(|position| (position, best_len))
    }

    /// Split `data` into tokens, advancing the window as the decoder would.
    pub fn tokenize(&mut self, data: &[u8]) -> Vec<LzssToken> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < data.len() {
            let lookahead = &data[pos..];

            if let Some((position, length)) = self.find_match(lookahead) {
                tokens.push(LzssToken::Match { position, length });
                if self.config.reuse_compressed {
                    for &byte in &lookahead[..length] {
                        self.window.write_byte(byte);
                    }
                }
                pos += length;
            } else {
                tokens.push(LzssToken::Literal(data[pos]));
                self.window.write_byte(data[pos]);
                pos += 1;
            }
        }

        tokens
    }

    /// Compress `data` into a padded bit stream.
    pub fn compress_to_vec(&mut self, data: &[u8]) -> Result<Vec<u8>> {
        let tokens = self.tokenize(data);
        write_tokens(&tokens, &self.config)
    }
}

/// Pack tokens into a bit stream, zero-padding the final byte.
pub fn write_tokens(tokens: &[LzssToken], config: &LzssConfig) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new(config.bit_order);

    for token in tokens {
        match *token {
            LzssToken::Literal(byte) => {
                writer.write_bit(config.literal_flag)?;
                writer.write_bits(byte as u32, 8)?;
            }
            LzssToken::Match { position, length } => {
                writer.write_bit(!config.literal_flag)?;
                writer.write_bits(position as u32, config.window_bits)?;
                writer.write_bits((length - config.min_match) as u32, config.length_bits)?;
            }
        }
    }

    Ok(writer.finish())
}

/// Compress data with LZSS.
///
/// # Example
///
/// ```rust
/// use vnarc_lzss::{LzssConfig, encode};
///
/// let compressed = encode(b"ABABAB", &LzssConfig::NSA).unwrap();
/// assert_eq!(compressed, [0xA0, 0xD0, 0x9D, 0xE4]);
/// ```
pub fn encode(data: &[u8], config: &LzssConfig) -> Result<Vec<u8>> {
    LzssEncoder::new(*config)?.compress_to_vec(data)
}
