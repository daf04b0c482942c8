//! # vnarc LZSS
//!
//! Configurable LZSS compression as used by visual-novel archive formats.
//!
//! LZSS streams of these engines differ from the textbook coder in several
//! ways, all of which are captured by [`LzssConfig`]:
//!
//! - References name an **absolute window slot**, not a backward distance
//! - The window starts pre-filled (usually with zeros) and writing begins at
//!   a fixed initial position
//! - Bytes copied by a reference may or may not re-enter the window
//! - The control bit value for literals and the bit packing order vary
//!
//! [`LzssConfig::NSA`] reproduces the NScripter coder: 256-byte window,
//! 8-bit positions, 4-bit lengths (2..=17 bytes), first write at slot 239.
//!
//! ## Example
//!
//! ```rust
//! use vnarc_lzss::{LzssConfig, decode, encode};
//!
//! let config = LzssConfig::NSA;
//! let data = b"Hello Hello Hello World";
//!
//! let compressed = encode(data, &config).unwrap();
//! let decompressed = decode(&compressed, &config).unwrap();
//! assert_eq!(decompressed, data);
//! ```
//!
//! ## Token-level access
//!
//! ```rust
//! use vnarc_lzss::{LzssConfig, LzssEncoder, LzssToken};
//!
//! let mut encoder = LzssEncoder::new(LzssConfig::NSA).unwrap();
//! let tokens = encoder.tokenize(b"ABABAB");
//! assert_eq!(tokens[2], LzssToken::Match { position: 239, length: 4 });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decode;
pub mod encode;

// Re-exports
pub use config::LzssConfig;
pub use decode::{LzssDecoder, decode, decode_bounded};
pub use encode::{LzssEncoder, LzssToken, encode, write_tokens};
