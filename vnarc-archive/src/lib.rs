//! # vnarc Archive
//!
//! Archive container support for vnarc.
//!
//! This crate provides unpacking and packing of visual-novel engine archives:
//!
//! - **NSA**: NScripter archives, big-endian flat table, stored or LZSS payloads
//! - **SAR**: The older NScripter variant, stored payloads only
//! - **PAK2**: Nitroplus archives with a zlib-compressed file table
//!
//! Both codecs implement [`vnarc_core::ArchiveCodec`], so callers pick a codec
//! and then use the same `read_archive` / `unpack` / `pack` calls.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use vnarc_archive::TableArchiveCodec;
//! use vnarc_core::prelude::*;
//!
//! let codec = TableArchiveCodec::pak2();
//! let entries = [PackEntry::new("short", b"whatever".to_vec())];
//!
//! let mut archive = Cursor::new(Vec::new());
//! codec.pack(&mut archive, &entries, &PackOptions::stored()).unwrap();
//!
//! let mut sink = MemorySink::new();
//! codec.unpack(&mut archive, &mut sink).unwrap();
//! assert_eq!(sink.files[0].0, "short");
//! assert_eq!(sink.files[0].1, b"whatever");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod flat;
pub mod table;
pub mod zlib;

// Re-exports
pub use flat::{FlatArchiveCodec, FlatLayout};
pub use table::{TableArchiveCodec, TableLayout};
