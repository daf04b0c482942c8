//! Entry name transcoding.
//!
//! Archive tables store names as Shift_JIS byte strings. Decoding either
//! yields text or, for byte sequences that are not valid Shift_JIS, keeps the
//! original bytes. The fallback is reported through the [`EntryName`] variant
//! and never aborts an unpack.

use crate::error::{Result, VnArcError};
use encoding_rs::SHIFT_JIS;
use log::warn;
use std::borrow::Cow;
use std::fmt;

/// Name of an archive entry after transcoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryName {
    /// Successfully decoded text.
    Decoded(String),
    /// Raw bytes that could not be decoded.
    Raw(Vec<u8>),
}

impl EntryName {
    /// Decode a Shift_JIS name, falling back to the raw bytes.
    pub fn decode(bytes: &[u8]) -> Self {
        let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
        if had_errors {
            warn!(
                "entry name {:02x?} is not valid Shift_JIS, keeping raw bytes",
                bytes
            );
            Self::Raw(bytes.to_vec())
        } else {
            Self::Decoded(decoded.into_owned())
        }
    }

    /// Check whether transcoding fell back to the raw bytes.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Get the name as text, replacing undecodable sequences.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        match self {
            Self::Decoded(text) => Cow::Borrowed(text),
            Self::Raw(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    /// Apply a character mapping to decoded names; raw names are kept as is.
    pub fn map_text(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            Self::Decoded(text) => Self::Decoded(f(text)),
            raw => raw,
        }
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl From<&str> for EntryName {
    fn from(text: &str) -> Self {
        Self::Decoded(text.to_string())
    }
}

impl PartialEq<str> for EntryName {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Self::Decoded(text) if text == other)
    }
}

impl PartialEq<&str> for EntryName {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Encode a name for an archive table.
///
/// Names are stored as Shift_JIS. A name the encoding cannot represent, or
/// one that would read back as different text, is rejected with
/// [`VnArcError::UnencodableName`].
pub fn encode_name(name: &str) -> Result<Vec<u8>> {
    let (encoded, _, had_errors) = SHIFT_JIS.encode(name);
    if had_errors {
        return Err(VnArcError::unencodable_name(name));
    }

    let (decoded, _, decode_errors) = SHIFT_JIS.decode(&encoded);
    if decode_errors || decoded != name {
        return Err(VnArcError::unencodable_name(name));
    }
    Ok(encoded.into_owned())
}
