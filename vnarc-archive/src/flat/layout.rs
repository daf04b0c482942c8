//! Record layouts of flat NScripter archives.

use vnarc_core::endian::Endian;

/// Size of the archive header: entry count (u16) and data offset (u32).
pub const HEADER_LEN: usize = 6;

/// NSA compression byte for stored payloads.
pub const KIND_STORED: u8 = 0;
/// NSA compression byte for SPB images.
pub const KIND_SPB: u8 = 1;
/// NSA compression byte for LZSS payloads.
pub const KIND_LZSS: u8 = 2;

/// Byte-level description of a flat archive.
///
/// ```text
/// header:  count:u16  data_offset:u32
/// NSA:     name\0  kind:u8  origin:u32  compressed_size:u32  original_size:u32
/// SAR:     name\0  origin:u32  size:u32
/// ```
///
/// Origins are relative to the data offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatLayout {
    /// Short format name.
    pub name: &'static str,
    /// Byte order of every integer field.
    pub byte_order: Endian,
    /// Whether records carry a compression byte and an original size.
    pub has_compression: bool,
    /// Directory separator stored in names.
    pub separator: u8,
    /// Longest allowed record, name and terminator included.
    pub max_record_len: Option<usize>,
}

impl FlatLayout {
    /// NScripter NSA archives.
    pub const NSA: Self = Self {
        name: "NSA",
        byte_order: Endian::Big,
        has_compression: true,
        separator: b'\\',
        max_record_len: None,
    };

    /// NScripter SAR archives, the older stored-only variant.
    ///
    /// The engine reads names into a 256-byte buffer, so a record holds at
    /// most a 255-byte name, its terminator and the two size fields.
    pub const SAR: Self = Self {
        name: "SAR",
        byte_order: Endian::Big,
        has_compression: false,
        separator: b'\\',
        max_record_len: Some(255 + 1 + 8),
    };

    /// Length of the fixed fields after the name terminator.
    pub fn fixed_fields_len(&self) -> usize {
        if self.has_compression { 13 } else { 8 }
    }

    /// Length of a record whose encoded name is `name_len` bytes.
    pub fn record_len(&self, name_len: usize) -> usize {
        name_len + 1 + self.fixed_fields_len()
    }
}
