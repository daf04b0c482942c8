//! NScripter flat archive support (NSA, SAR).
//!
//! A flat archive is a big-endian header, an uncompressed table of
//! NUL-terminated names with fixed fields, and the payloads packed back to
//! back after the table. [`FlatLayout`] describes the field set; the codec
//! itself is shared by both variants.
//!
//! Names are stored with `\` separators and reported with `/`.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use vnarc_archive::flat::FlatArchiveCodec;
//! use vnarc_core::prelude::*;
//!
//! let codec = FlatArchiveCodec::nsa();
//! let entries = [PackEntry::new("script/0.txt", b"*start".to_vec())];
//! let options = PackOptions::stored().with_compression(CompressionKind::Lzss);
//!
//! let mut archive = Cursor::new(Vec::new());
//! codec.pack(&mut archive, &entries, &options).unwrap();
//!
//! let files = codec.unpack_to_vec(&mut archive).unwrap();
//! assert_eq!(files[0].0, "script/0.txt");
//! assert_eq!(files[0].1, b"*start");
//! ```

pub mod layout;

pub use layout::FlatLayout;

use layout::{HEADER_LEN, KIND_LZSS, KIND_SPB, KIND_STORED};
use log::debug;
use std::io::{Read, Seek, SeekFrom, Write};
use vnarc_core::entry::{Archive, ArchiveHeader, CompressionKind, PackEntry, PackOptions, TableEntry};
use vnarc_core::error::{Result, VnArcError};
use vnarc_core::name::{EntryName, encode_name};
use vnarc_core::source::ArchiveSource;
use vnarc_core::traits::ArchiveCodec;
use vnarc_lzss::LzssConfig;

/// Codec for flat NScripter archives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatArchiveCodec {
    layout: FlatLayout,
}

impl FlatArchiveCodec {
    /// Create a codec for the given layout.
    pub fn new(layout: FlatLayout) -> Self {
        Self { layout }
    }

    /// Codec for NSA archives.
    pub fn nsa() -> Self {
        Self::new(FlatLayout::NSA)
    }

    /// Codec for SAR archives.
    pub fn sar() -> Self {
        Self::new(FlatLayout::SAR)
    }

    /// Get the layout.
    pub fn layout(&self) -> &FlatLayout {
        &self.layout
    }

    fn kind_from_byte(byte: u8) -> CompressionKind {
        match byte {
            KIND_STORED => CompressionKind::Stored,
            KIND_SPB => CompressionKind::Spb,
            KIND_LZSS => CompressionKind::Lzss,
            other => CompressionKind::Unknown(other),
        }
    }

    /// Compression byte written for `kind`, if the layout can store it.
    fn kind_to_byte(&self, kind: CompressionKind) -> Result<u8> {
        match kind {
            CompressionKind::Stored => Ok(KIND_STORED),
            CompressionKind::Lzss if self.layout.has_compression => Ok(KIND_LZSS),
            other => Err(VnArcError::unsupported_compression(format!(
                "{} in {} archives",
                other, self.layout.name
            ))),
        }
    }

    /// Encode a `/`-separated name the way it is stored in the table.
    fn encode_entry_name(&self, name: &str) -> Result<Vec<u8>> {
        let separator = char::from(self.layout.separator).to_string();
        let bytes = encode_name(&name.replace('/', &separator))
            .map_err(|_| VnArcError::unencodable_name(name))?;

        if bytes.contains(&0) {
            return Err(VnArcError::invalid_header(format!(
                "entry name {:?} contains a NUL byte",
                name
            )));
        }
        if let Some(max) = self.layout.max_record_len {
            let length = self.layout.record_len(bytes.len());
            if length > max {
                return Err(VnArcError::name_too_long(name, length, max));
            }
        }
        Ok(bytes)
    }

    fn decompress(&self, index: usize, entry: &TableEntry, data: Vec<u8>) -> Result<Vec<u8>> {
        let name = entry.name.to_string();
        let output = match entry.compression {
            CompressionKind::Stored => data,
            CompressionKind::Lzss => {
                vnarc_lzss::decode_bounded(&data, &LzssConfig::NSA, entry.original_size as usize)?
            }
            CompressionKind::Unknown(byte) => {
                return Err(
                    VnArcError::unsupported_compression(format!("kind {}", byte)).in_entry(name),
                );
            }
            other => {
                return Err(VnArcError::unsupported_compression(other.to_string()).in_entry(name));
            }
        };

        if output.len() as u64 != entry.original_size {
            return Err(VnArcError::bad_file_size(
                index,
                name,
                entry.original_size,
                output.len() as u64,
            ));
        }
        Ok(output)
    }

    fn compress(kind: u8, data: &[u8]) -> Result<Vec<u8>> {
        match kind {
            KIND_LZSS => vnarc_lzss::encode(data, &LzssConfig::NSA),
            _ => Ok(data.to_vec()),
        }
    }
}

impl Default for FlatArchiveCodec {
    fn default() -> Self {
        Self::nsa()
    }
}

/// Convert a size to a `u32` table field.
fn table_u32(value: u64, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        VnArcError::invalid_header(format!("{} {} does not fit a 32-bit field", what, value))
    })
}

impl ArchiveCodec for FlatArchiveCodec {
    fn format_name(&self) -> &'static str {
        self.layout.name
    }

    fn read_archive<S: Read + Seek>(&self, source: &mut S) -> Result<Archive> {
        let order = self.layout.byte_order;
        let archive_size = source.size()?;
        source.seek_to(0)?;

        let file_count = source.read_u16(order)?;
        let data_offset = u64::from(source.read_u32(order)?);
        if data_offset > archive_size {
            return Err(VnArcError::bad_region_offset(data_offset, archive_size));
        }
        debug!(
            "{}: {} entries, data region at {}",
            self.layout.name, file_count, data_offset
        );

        let separator = char::from(self.layout.separator);
        let mut entries = Vec::with_capacity(usize::from(file_count));
        for index in 0..usize::from(file_count) {
            let raw_name = source.read_until_zero()?;
            let name = EntryName::decode(&raw_name).map_text(|t| t.replace(separator, "/"));

            let (compression, origin, compressed_size, original_size) =
                if self.layout.has_compression {
                    let kind = source.read_u8()?;
                    let origin = source.read_u32(order)?;
                    let compressed_size = source.read_u32(order)?;
                    let original_size = source.read_u32(order)?;
                    (
                        Self::kind_from_byte(kind),
                        origin,
                        compressed_size,
                        original_size,
                    )
                } else {
                    let origin = source.read_u32(order)?;
                    let size = source.read_u32(order)?;
                    (CompressionKind::Stored, origin, size, size)
                };

            let entry = TableEntry {
                name,
                compression,
                origin: data_offset + u64::from(origin),
                compressed_size: u64::from(compressed_size),
                original_size: u64::from(original_size),
                flags: 0,
            };

            match entry.end() {
                Some(end) if end <= archive_size => {}
                _ => {
                    return Err(VnArcError::bad_entry_offset(
                        index,
                        entry.name.to_string(),
                        entry.origin,
                        entry.compressed_size,
                        archive_size,
                    ));
                }
            }
            entries.push(entry);
        }

        let table_size = source.tell()? - HEADER_LEN as u64;
        Ok(Archive {
            header: ArchiveHeader {
                magic: Vec::new(),
                file_count: u32::from(file_count),
                table_size,
                compressed_table_size: None,
                data_offset,
            },
            entries,
        })
    }

    fn read_entry<S: Read + Seek>(
        &self,
        source: &mut S,
        index: usize,
        entry: &TableEntry,
    ) -> Result<Vec<u8>> {
        debug!(
            "extracting #{} {} ({}, {} bytes)",
            index, entry.name, entry.compression, entry.compressed_size
        );
        let data = source.peek(entry.origin, |s| s.read_vec(entry.compressed_size as usize))?;
        self.decompress(index, entry, data)
    }

    fn pack<W: Write + Seek>(
        &self,
        writer: &mut W,
        entries: &[PackEntry],
        options: &PackOptions,
    ) -> Result<()> {
        let order = self.layout.byte_order;
        let kind = self.kind_to_byte(options.compression)?;

        let file_count = u16::try_from(entries.len()).map_err(|_| {
            VnArcError::invalid_header(format!(
                "{} entries exceed the limit of {}",
                entries.len(),
                u16::MAX
            ))
        })?;

        // Every name is checked before the first byte is written.
        let names = entries
            .iter()
            .map(|entry| self.encode_entry_name(&entry.name))
            .collect::<Result<Vec<_>>>()?;

        let table_len: usize = names
            .iter()
            .map(|name| self.layout.record_len(name.len()))
            .sum();
        let data_offset = table_u32((HEADER_LEN + table_len) as u64, "data offset")?;
        debug!(
            "{}: packing {} entries, data region at {}",
            self.layout.name, file_count, data_offset
        );

        let base = writer.stream_position()?;
        writer.write_all(&order.u16_bytes(file_count))?;
        writer.write_all(&order.u32_bytes(data_offset))?;
        writer.write_all(&vec![0u8; table_len])?;

        let mut table = Vec::with_capacity(table_len);
        let mut origin = 0u64;
        for (entry, name) in entries.iter().zip(&names) {
            let payload = Self::compress(kind, &entry.data)?;
            writer.write_all(&payload)?;

            table.extend_from_slice(name);
            table.push(0);
            if self.layout.has_compression {
                table.push(kind);
            }
            table.extend_from_slice(&order.u32_bytes(table_u32(origin, "entry origin")?));
            table.extend_from_slice(&order.u32_bytes(table_u32(
                payload.len() as u64,
                "compressed size",
            )?));
            if self.layout.has_compression {
                table.extend_from_slice(&order.u32_bytes(table_u32(
                    entry.data.len() as u64,
                    "original size",
                )?));
            }

            origin += payload.len() as u64;
        }

        let end = writer.stream_position()?;
        writer.seek(SeekFrom::Start(base + HEADER_LEN as u64))?;
        writer.write_all(&table)?;
        writer.seek(SeekFrom::Start(end))?;
        Ok(())
    }
}
