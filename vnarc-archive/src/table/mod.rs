//! Nitroplus PAK2 archive support.
//!
//! A PAK2 archive starts with a small little-endian header, followed at a
//! fixed offset by a zlib-compressed file table. Payloads follow the
//! compressed table and are either stored or zlib-compressed one by one.
//!
//! ```text
//! 0     magic[4] = 02 00 00 00
//! 4     file_count:u32  table_size:u32  compressed_table_size:u32
//! 276   zlib(table)
//! ...   payloads, origins relative to the end of the compressed table
//!
//! table entry:
//!       name_len:u32  name[name_len]  origin:u32  original_size:u32
//!       reserved[4]  flags:u32  compressed_size:u32
//! ```

use crate::zlib;
use log::debug;
use std::io::{Cursor, Read, Seek, Write};
use vnarc_core::endian::Endian;
use vnarc_core::entry::{Archive, ArchiveHeader, CompressionKind, PackEntry, PackOptions, TableEntry};
use vnarc_core::error::{Result, VnArcError};
use vnarc_core::name::{EntryName, encode_name};
use vnarc_core::source::ArchiveSource;
use vnarc_core::traits::ArchiveCodec;

/// Byte-level description of a table archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Short format name.
    pub name: &'static str,
    /// Signature at offset 0.
    pub magic: [u8; 4],
    /// Absolute offset of the compressed table.
    pub table_origin: u64,
    /// Byte order of every integer field.
    pub byte_order: Endian,
}

impl TableLayout {
    /// Nitroplus PAK2.
    pub const PAK2: Self = Self {
        name: "PAK2",
        magic: [0x02, 0x00, 0x00, 0x00],
        table_origin: 276,
        byte_order: Endian::Little,
    };
}

/// Codec for archives with a zlib-compressed file table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableArchiveCodec {
    layout: TableLayout,
}

impl TableArchiveCodec {
    /// Create a codec for the given layout.
    pub fn new(layout: TableLayout) -> Self {
        Self { layout }
    }

    /// Codec for PAK2 archives.
    pub fn pak2() -> Self {
        Self::new(TableLayout::PAK2)
    }

    /// Get the layout.
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Parse one record of the decompressed table.
    fn read_record(
        &self,
        table: &mut Cursor<Vec<u8>>,
        data_offset: u64,
    ) -> Result<TableEntry> {
        let order = self.layout.byte_order;
        let name_len = table.read_u32(order)? as usize;
        let name = EntryName::decode(&table.read_vec(name_len)?);
        let origin = table.read_u32(order)?;
        let original_size = table.read_u32(order)?;
        table.read_array::<4>()?;
        let flags = table.read_u32(order)?;
        let compressed_size = table.read_u32(order)?;

        let (compression, stored_size) = if flags > 0 {
            (CompressionKind::Zlib, compressed_size)
        } else {
            (CompressionKind::Stored, original_size)
        };

        Ok(TableEntry {
            name,
            compression,
            origin: data_offset + u64::from(origin),
            compressed_size: u64::from(stored_size),
            original_size: u64::from(original_size),
            flags,
        })
    }

    /// Flags value written for `kind`.
    fn flags_for(&self, kind: CompressionKind) -> Result<u32> {
        match kind {
            CompressionKind::Stored => Ok(0),
            CompressionKind::Zlib => Ok(1),
            other => Err(VnArcError::unsupported_compression(format!(
                "{} in {} archives",
                other, self.layout.name
            ))),
        }
    }
}

impl Default for TableArchiveCodec {
    fn default() -> Self {
        Self::pak2()
    }
}

fn table_u32(value: usize, what: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        VnArcError::invalid_header(format!("{} {} does not fit a 32-bit field", what, value))
    })
}

impl ArchiveCodec for TableArchiveCodec {
    fn format_name(&self) -> &'static str {
        self.layout.name
    }

    fn read_archive<S: Read + Seek>(&self, source: &mut S) -> Result<Archive> {
        let order = self.layout.byte_order;
        let archive_size = source.size()?;
        source.seek_to(0)?;

        let magic = source.read_array::<4>()?;
        if magic != self.layout.magic {
            return Err(VnArcError::not_archive(self.layout.magic, magic));
        }

        let file_count = source.read_u32(order)?;
        let table_size = u64::from(source.read_u32(order)?);
        let compressed_table_size = u64::from(source.read_u32(order)?);

        let table_origin = self.layout.table_origin;
        let data_offset = table_origin + compressed_table_size;
        if data_offset > archive_size {
            return Err(VnArcError::BadOffset {
                index: None,
                name: Some("file table".to_string()),
                offset: table_origin,
                size: compressed_table_size,
                archive_size,
            });
        }

        source.seek_to(table_origin)?;
        let compressed = source.read_vec(compressed_table_size as usize)?;
        let table = zlib::decompress_table(&compressed, table_size)?;
        debug!(
            "{}: {} entries, table {} -> {} bytes, data region at {}",
            self.layout.name, file_count, compressed_table_size, table_size, data_offset
        );

        let mut table = Cursor::new(table);
        let mut entries = Vec::new();
        for index in 0..file_count as usize {
            let entry = self.read_record(&mut table, data_offset)?;
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

        Ok(Archive {
            header: ArchiveHeader {
                magic: magic.to_vec(),
                file_count,
                table_size,
                compressed_table_size: Some(compressed_table_size),
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
        let output = match entry.compression {
            CompressionKind::Zlib => zlib::decompress(&data, entry.original_size)?,
            _ => data,
        };

        if output.len() as u64 != entry.original_size {
            return Err(VnArcError::bad_file_size(
                index,
                entry.name.to_string(),
                entry.original_size,
                output.len() as u64,
            ));
        }
        Ok(output)
    }

    fn pack<W: Write + Seek>(
        &self,
        writer: &mut W,
        entries: &[PackEntry],
        options: &PackOptions,
    ) -> Result<()> {
        let order = self.layout.byte_order;
        let flags = self.flags_for(options.compression)?;
        let file_count = table_u32(entries.len(), "entry count")?;

        let names = entries
            .iter()
            .map(|entry| encode_name(&entry.name))
            .collect::<Result<Vec<_>>>()?;

        let mut table = Vec::new();
        let mut payloads = Vec::with_capacity(entries.len());
        let mut origin = 0usize;
        for (entry, name) in entries.iter().zip(&names) {
            let payload = if flags > 0 {
                zlib::compress(&entry.data)?
            } else {
                entry.data.clone()
            };

            table.extend_from_slice(&order.u32_bytes(table_u32(name.len(), "name length")?));
            table.extend_from_slice(name);
            table.extend_from_slice(&order.u32_bytes(table_u32(origin, "entry origin")?));
            table.extend_from_slice(&order.u32_bytes(table_u32(entry.data.len(), "original size")?));
            table.extend_from_slice(&[0u8; 4]);
            table.extend_from_slice(&order.u32_bytes(flags));
            table.extend_from_slice(&order.u32_bytes(table_u32(payload.len(), "compressed size")?));

            origin += payload.len();
            payloads.push(payload);
        }

        let compressed_table = zlib::compress(&table)?;
        debug!(
            "{}: packing {} entries, table {} -> {} bytes",
            self.layout.name,
            file_count,
            table.len(),
            compressed_table.len()
        );

        let mut header = Vec::with_capacity(self.layout.table_origin as usize);
        header.extend_from_slice(&self.layout.magic);
        header.extend_from_slice(&order.u32_bytes(file_count));
        header.extend_from_slice(&order.u32_bytes(table_u32(table.len(), "table size")?));
        header.extend_from_slice(&order.u32_bytes(table_u32(
            compressed_table.len(),
            "compressed table size",
        )?));
        header.resize(self.layout.table_origin as usize, 0);

        writer.write_all(&header)?;
        writer.write_all(&compressed_table)?;
        for payload in &payloads {
            writer.write_all(payload)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packed(entries: &[PackEntry], kind: CompressionKind) -> Vec<u8> {
        let mut archive = Cursor::new(Vec::new());
        TableArchiveCodec::pak2()
            .pack(
                &mut archive,
                entries,
                &PackOptions::stored().with_compression(kind),
            )
            .unwrap();
        archive.into_inner()
    }

    #[test]
    fn test_header_layout() {
        let bytes = packed(
            &[PackEntry::new("a.txt", b"hello".to_vec())],
            CompressionKind::Stored,
        );
        assert_eq!(&bytes[..4], &[2, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[1, 0, 0, 0]);
        // 4 + 5 + 4 * 5 bytes of table
        assert_eq!(&bytes[8..12], &[29, 0, 0, 0]);
        assert!(bytes[16..276].iter().all(|&b| b == 0));
        assert!(bytes.ends_with(b"hello"));
    }

    #[test]
    fn test_read_archive_records() {
        let bytes = packed(
            &[
                PackEntry::new("a.txt", b"hello".to_vec()),
                PackEntry::new("b.txt", b"world!".to_vec()),
            ],
            CompressionKind::Zlib,
        );
        let archive = TableArchiveCodec::pak2()
            .read_archive(&mut Cursor::new(bytes))
            .unwrap();

        assert_eq!(archive.header.file_count, 2);
        assert_eq!(archive.header.magic, [2, 0, 0, 0]);
        let compressed_table = archive.header.compressed_table_size.unwrap();
        assert_eq!(archive.header.data_offset, 276 + compressed_table);
        assert_eq!(archive.entries[0].origin, archive.header.data_offset);
        assert_eq!(archive.entries[0].compression, CompressionKind::Zlib);
        assert_eq!(archive.entries[0].flags, 1);
        assert_eq!(archive.entries[1].original_size, 6);
        assert_eq!(
            archive.entries[1].origin,
            archive.entries[0].origin + archive.entries[0].compressed_size
        );
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = packed(&[], CompressionKind::Stored);
        bytes[0] = 0x03;
        let err = TableArchiveCodec::pak2()
            .read_archive(&mut Cursor::new(bytes))
            .unwrap_err();
        assert!(matches!(err, VnArcError::NotArchive { .. }));
    }

    #[test]
    fn test_table_past_end() {
        let mut bytes = packed(&[], CompressionKind::Stored);
        bytes[12..16].copy_from_slice(&1000u32.to_le_bytes());
        let err = TableArchiveCodec::pak2()
            .read_archive(&mut Cursor::new(bytes))
            .unwrap_err();
        assert!(matches!(
            err,
            VnArcError::BadOffset {
                index: None,
                offset: 276,
                size: 1000,
                ..
            }
        ));
    }

    #[test]
    fn test_pack_rejects_lzss() {
        let mut archive = Cursor::new(Vec::new());
        let err = TableArchiveCodec::pak2()
            .pack(
                &mut archive,
                &[PackEntry::new("x", b"x".to_vec())],
                &PackOptions::stored().with_compression(CompressionKind::Lzss),
            )
            .unwrap_err();
        assert!(matches!(err, VnArcError::UnsupportedCompression { .. }));
        assert!(archive.get_ref().is_empty());
    }
}
