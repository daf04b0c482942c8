//! List command implementation.

use super::{ArchiveFormat, with_codec};
use crate::utils::{filter_entries, print_entries};
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use vnarc_core::{Archive, ArchiveCodec, EntryName, TableEntry};

/// JSON serializable entry data for archive listings.
#[derive(Debug, Serialize)]
struct EntryJson {
    index: usize,
    name: String,
    size: u64,
    stored_size: u64,
    ratio: f64,
    method: String,
    offset: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_name: Option<Vec<u8>>,
}

impl EntryJson {
    fn from_entry(index: usize, entry: &TableEntry) -> Self {
        let raw_name = match &entry.name {
            EntryName::Raw(bytes) => Some(bytes.clone()),
            EntryName::Decoded(_) => None,
        };

        Self {
            index,
            name: entry.name.to_string(),
            size: entry.original_size,
            stored_size: entry.compressed_size,
            ratio: entry.compression_ratio(),
            method: entry.compression.name().to_string(),
            offset: entry.origin,
            raw_name,
        }
    }
}

/// JSON output for archive listing.
#[derive(Debug, Serialize)]
struct ArchiveListJson {
    archive: String,
    format: String,
    file_count: u32,
    data_offset: u64,
    total_size: u64,
    entries: Vec<EntryJson>,
}

/// Options for listing archive contents.
pub struct ListOptions<'a> {
    pub format: ArchiveFormat,
    pub verbose: bool,
    pub json: bool,
    pub include: &'a [String],
    pub exclude: &'a [String],
}

pub fn cmd_list(archive: &Path, options: &ListOptions) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(archive)?;
    let mut reader = BufReader::new(file);

    let parsed: Archive = with_codec!(options.format, codec => codec.read_archive(&mut reader)?);
    let filtered = filter_entries(&parsed.entries, options.include, options.exclude);

    if options.json {
        let listing = ArchiveListJson {
            archive: archive.display().to_string(),
            format: options.format.to_string(),
            file_count: parsed.header.file_count,
            data_offset: parsed.header.data_offset,
            total_size: parsed.total_original_size(),
            entries: filtered
                .iter()
                .map(|(index, entry)| EntryJson::from_entry(*index, entry))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Archive: {} ({})", archive.display(), options.format);
    println!();
    print_entries(&filtered, options.verbose);
    Ok(())
}
