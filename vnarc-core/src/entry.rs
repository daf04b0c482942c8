//! Archive table model.
//!
//! [`TableEntry`] and [`Archive`] describe a parsed file table; they are
//! built during a single unpack or pack call and discarded afterwards.
//! [`PackEntry`] and [`PackOptions`] are the inputs of a pack call.

use crate::name::EntryName;

/// Compression applied to an entry payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionKind {
    /// No compression (stored).
    #[default]
    Stored,
    /// LZSS sliding-window compression.
    Lzss,
    /// zlib (DEFLATE with zlib framing).
    Zlib,
    /// NScripter SPB image compression. Recognized, not supported.
    Spb,
    /// A method identifier the format does not define.
    Unknown(u8),
}

impl CompressionKind {
    /// Get the kind name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stored => "Stored",
            Self::Lzss => "LZSS",
            Self::Zlib => "zlib",
            Self::Spb => "SPB",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl std::fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

/// One record of an archive file table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Transcoded entry name.
    pub name: EntryName,
    /// Compression of the stored payload.
    pub compression: CompressionKind,
    /// Absolute offset of the payload in the archive.
    pub origin: u64,
    /// Stored (compressed) payload size.
    pub compressed_size: u64,
    /// Original (decompressed) payload size.
    pub original_size: u64,
    /// Format-specific flags, 0 when the format has none.
    pub flags: u32,
}

impl TableEntry {
    /// Get the compression ratio (compressed/original).
    pub fn compression_ratio(&self) -> f64 {
        if self.original_size == 0 {
            1.0
        } else {
            self.compressed_size as f64 / self.original_size as f64
        }
    }

    /// Offset one past the last stored byte.
    pub fn end(&self) -> Option<u64> {
        self.origin.checked_add(self.compressed_size)
    }
}

impl std::fmt::Display for TableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>10} {:>10} {:>6} {}",
            self.original_size, self.compressed_size, self.compression, self.name
        )
    }
}

/// Parsed archive header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveHeader {
    /// Format signature, empty for formats without one.
    pub magic: Vec<u8>,
    /// Number of table entries.
    pub file_count: u32,
    /// Table size in bytes (decompressed).
    pub table_size: u64,
    /// Compressed table size, for formats that compress the table.
    pub compressed_table_size: Option<u64>,
    /// Absolute offset of the data region.
    pub data_offset: u64,
}

/// A parsed archive: header plus entries in table order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Archive {
    /// Archive header.
    pub header: ArchiveHeader,
    /// Table entries in emission order.
    pub entries: Vec<TableEntry>,
}

impl Archive {
    /// Sum of original sizes.
    pub fn total_original_size(&self) -> u64 {
        self.entries.iter().map(|e| e.original_size).sum()
    }
}

/// A file to be packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackEntry {
    /// Name inside the archive, `/`-separated.
    pub name: String,
    /// File contents.
    pub data: Vec<u8>,
}

impl PackEntry {
    /// Create a new pack entry.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Options for a pack call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackOptions {
    /// Compression applied to every payload.
    pub compression: CompressionKind,
}

impl PackOptions {
    /// Options that store payloads uncompressed.
    pub fn stored() -> Self {
        Self::default()
    }

    /// Builder method to set the compression kind.
    pub fn with_compression(mut self, compression: CompressionKind) -> Self {
        self.compression = compression;
        self
    }
}
