//! # vnarc Core
//!
//! Core components for the vnarc archive library.
//!
//! This crate provides the fundamental building blocks shared by the codecs:
//!
//! - [`bitstream`]: MSB/LSB-first bit I/O for LZSS control and token bits
//! - [`window`]: Absolute-addressed sliding window for LZSS coding
//! - [`endian`]: Byte order of fixed-width table fields
//! - [`source`]: Sized reads and scoped seeks over archive sources
//! - [`name`]: Shift_JIS entry name transcoding with raw fallback
//! - [`entry`]: Archive, table entry and pack input model
//! - [`traits`]: `ArchiveCodec` and `OutputSink`
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     vnarc list / extract / create                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Container                                           │
//! │     NSA / SAR flat tables, PAK2 zlib tables             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     LZSS (vnarc-lzss), zlib                             │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Core (this crate)                                   │
//! │     BitReader/BitWriter, SlidingWindow, ArchiveSource   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use vnarc_core::bitstream::{BitOrder, BitReader};
//! use vnarc_core::name::EntryName;
//!
//! let data = [0xAB, 0xCD];
//! let mut reader = BitReader::new(&data, BitOrder::MsbFirst);
//! assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
//!
//! assert_eq!(EntryName::decode(b"arc.nsa"), "arc.nsa");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod endian;
pub mod entry;
pub mod error;
pub mod name;
pub mod source;
pub mod traits;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitOrder, BitReader, BitWriter};
pub use endian::Endian;
pub use entry::{Archive, ArchiveHeader, CompressionKind, PackEntry, PackOptions, TableEntry};
pub use error::{Result, VnArcError};
pub use name::{EntryName, encode_name};
pub use source::{ArchiveSource, PositionGuard};
pub use traits::{ArchiveCodec, MemorySink, OutputSink};
pub use window::SlidingWindow;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::entry::{Archive, CompressionKind, PackEntry, PackOptions, TableEntry};
    pub use crate::error::{Result, VnArcError};
    pub use crate::name::EntryName;
    pub use crate::source::ArchiveSource;
    pub use crate::traits::{ArchiveCodec, MemorySink, OutputSink};
}
