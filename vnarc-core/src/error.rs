//! Error types for vnarc operations.
//!
//! Every variant is fatal to the unpack or pack call that raised it. The one
//! recoverable condition in the library, a file name that does not decode as
//! Shift_JIS, is not an error at all: see [`crate::name::EntryName`].

use std::io;
use thiserror::Error;

/// The main error type for vnarc operations.
#[derive(Debug, Error)]
pub enum VnArcError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The archive signature does not match the selected format.
    #[error("Not an archive of this type: expected magic {expected:02x?}, found {found:02x?}")]
    NotArchive {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// The decompressed file table does not have the declared length.
    #[error("Bad file table size: header declares {expected} bytes, got {actual}")]
    BadTableSize {
        /// Declared table size.
        expected: u64,
        /// Length actually produced by decompression.
        actual: u64,
    },

    /// An offset or extent points outside the archive.
    #[error("Bad offset{}: {offset} + {size} exceeds archive size {archive_size}", describe_entry(.index, .name))]
    BadOffset {
        /// Index of the entry in the table, if the offset belongs to one.
        index: Option<usize>,
        /// Name of the entry, if known.
        name: Option<String>,
        /// Absolute offset of the region.
        offset: u64,
        /// Length of the region.
        size: u64,
        /// Total size of the archive.
        archive_size: u64,
    },

    /// A decompressed payload does not have the declared original size.
    #[error("Bad file size for entry #{index} ({name}): expected {expected} bytes, got {actual}")]
    BadFileSize {
        /// Index of the entry in the table.
        index: usize,
        /// Name of the entry.
        name: String,
        /// Declared original size.
        expected: u64,
        /// Length actually produced.
        actual: u64,
    },

    /// A compression kind is recognized but not implemented.
    #[error("Unsupported compression {method}{}", describe_name(.name))]
    UnsupportedCompression {
        /// Name of the compression kind.
        method: String,
        /// Entry that requested it, if any.
        name: Option<String>,
    },

    /// A name does not fit the fixed record length of a format.
    #[error("Name too long: {name:?} needs a {length}-byte record, limit is {max}")]
    NameTooLong {
        /// The offending name.
        name: String,
        /// Encoded record length.
        length: usize,
        /// Maximum record length allowed by the format.
        max: usize,
    },

    /// A name has no exact Shift_JIS representation.
    #[error("Name {name:?} cannot be stored as Shift_JIS")]
    UnencodableName {
        /// The offending name.
        name: String,
    },

    /// LZSS back-reference into a window slot that holds no output yet.
    #[error("Invalid back-reference to window position {position} after {output_len} output bytes")]
    InvalidReference {
        /// Window position that was referenced.
        position: usize,
        /// Number of bytes decoded so far.
        output_len: usize,
    },

    /// Rejected codec configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// Invalid header format or structural limit exceeded.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Unexpected end of file.
    #[error("Unexpected end of file: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },
}

fn describe_entry(index: &Option<usize>, name: &Option<String>) -> String {
    match (index, name) {
        (Some(index), Some(name)) => format!(" for entry #{} ({})", index, name),
        (Some(index), None) => format!(" for entry #{}", index),
        (None, Some(name)) => format!(" for {}", name),
        (None, None) => String::new(),
    }
}

fn describe_name(name: &Option<String>) -> String {
    name.as_ref()
        .map(|name| format!(" in entry {}", name))
        .unwrap_or_default()
}

/// Result type alias for vnarc operations.
pub type Result<T> = std::result::Result<T, VnArcError>;

impl VnArcError {
    /// Create a signature mismatch error.
    pub fn not_archive(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::NotArchive {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create a table size mismatch error.
    pub fn bad_table_size(expected: u64, actual: u64) -> Self {
        Self::BadTableSize { expected, actual }
    }

    /// Create an out-of-bounds error for the data region itself.
    pub fn bad_region_offset(offset: u64, archive_size: u64) -> Self {
        Self::BadOffset {
            index: None,
            name: Some("data region".to_string()),
            offset,
            size: 0,
            archive_size,
        }
    }

    /// Create an out-of-bounds error for a table entry.
    pub fn bad_entry_offset(
        index: usize,
        name: impl Into<String>,
        offset: u64,
        size: u64,
        archive_size: u64,
    ) -> Self {
        Self::BadOffset {
            index: Some(index),
            name: Some(name.into()),
            offset,
            size,
            archive_size,
        }
    }

    /// Create a payload size mismatch error.
    pub fn bad_file_size(index: usize, name: impl Into<String>, expected: u64, actual: u64) -> Self {
        Self::BadFileSize {
            index,
            name: name.into(),
            expected,
            actual,
        }
    }

    /// Create an unsupported compression error.
    pub fn unsupported_compression(method: impl Into<String>) -> Self {
        Self::UnsupportedCompression {
            method: method.into(),
            name: None,
        }
    }

    /// Attach the entry name to an unsupported compression error.
    pub fn in_entry(self, entry_name: impl Into<String>) -> Self {
        match self {
            Self::UnsupportedCompression { method, .. } => Self::UnsupportedCompression {
                method,
                name: Some(entry_name.into()),
            },
            other => other,
        }
    }

    /// Create a name-too-long error.
    pub fn name_too_long(name: impl Into<String>, length: usize, max: usize) -> Self {
        Self::NameTooLong {
            name: name.into(),
            length,
            max,
        }
    }

    /// Create an unencodable name error.
    pub fn unencodable_name(name: impl Into<String>) -> Self {
        Self::UnencodableName { name: name.into() }
    }

    /// Create an invalid back-reference error.
    pub fn invalid_reference(position: usize, output_len: usize) -> Self {
        Self::InvalidReference {
            position,
            output_len,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }
}
