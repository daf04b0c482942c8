//! Command implementations for the vnarc CLI.

pub mod create;
pub mod extract;
pub mod list;

pub use create::cmd_create;
pub use extract::{ExtractOptions, cmd_extract};
pub use list::{ListOptions, cmd_list};

use clap::ValueEnum;
use vnarc_core::CompressionKind;

/// Archive format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArchiveFormat {
    /// NScripter NSA archive
    Nsa,
    /// NScripter SAR archive
    Sar,
    /// Nitroplus PAK2 archive
    Pak2,
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Nsa => "NSA",
            Self::Sar => "SAR",
            Self::Pak2 => "PAK2",
        };
        f.write_str(name)
    }
}

/// Payload compression selected for `create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    /// Store without compression
    Store,
    /// LZSS (NSA only)
    Lzss,
    /// zlib (PAK2 only)
    Zlib,
}

impl From<Method> for CompressionKind {
    fn from(method: Method) -> Self {
        match method {
            Method::Store => CompressionKind::Stored,
            Method::Lzss => CompressionKind::Lzss,
            Method::Zlib => CompressionKind::Zlib,
        }
    }
}

/// Run `$body` with `$codec` bound to the codec for `$format`.
///
/// `ArchiveCodec` has generic methods, so codecs are dispatched statically.
macro_rules! with_codec {
    ($format:expr, $codec:ident => $body:expr) => {
        match $format {
            $crate::commands::ArchiveFormat::Nsa => {
                let $codec = vnarc_archive::FlatArchiveCodec::nsa();
                $body
            }
            $crate::commands::ArchiveFormat::Sar => {
                let $codec = vnarc_archive::FlatArchiveCodec::sar();
                $body
            }
            $crate::commands::ArchiveFormat::Pak2 => {
                let $codec = vnarc_archive::TableArchiveCodec::pak2();
                $body
            }
        }
    };
}

pub(crate) use with_codec;
