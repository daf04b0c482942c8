//! Core traits for archive codecs and their output.
//!
//! An [`ArchiveCodec`] turns a random-access source into a stream of
//! `(name, bytes)` pairs handed to an [`OutputSink`], and packs a list of
//! [`PackEntry`] values back into an archive.

use crate::entry::{Archive, PackEntry, PackOptions, TableEntry};
use crate::error::Result;
use crate::name::EntryName;
use std::io::{Read, Seek, Write};

/// Receiver of unpacked entries.
///
/// The codec calls [`write_entry`](OutputSink::write_entry) once per table
/// entry, in table order. Names are not guaranteed to be unique; resolving
/// collisions is the sink's business.
pub trait OutputSink {
    /// Accept one unpacked entry.
    fn write_entry(&mut self, name: EntryName, data: Vec<u8>) -> Result<()>;
}

/// Sink that collects entries in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    /// Collected entries in emission order.
    pub files: Vec<(EntryName, Vec<u8>)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the sink and return the collected entries.
    pub fn into_files(self) -> Vec<(EntryName, Vec<u8>)> {
        self.files
    }
}

impl OutputSink for MemorySink {
    fn write_entry(&mut self, name: EntryName, data: Vec<u8>) -> Result<()> {
        self.files.push((name, data));
        Ok(())
    }
}

/// A container format that can be unpacked and packed.
pub trait ArchiveCodec {
    /// Short human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Parse the header and file table without reading any payload.
    ///
    /// Every entry is bounds-checked against the source size.
    fn read_archive<S: Read + Seek>(&self, source: &mut S) -> Result<Archive>;

    /// Read and decompress the payload of one parsed entry.
    ///
    /// The source position is left unchanged.
    fn read_entry<S: Read + Seek>(
        &self,
        source: &mut S,
        index: usize,
        entry: &TableEntry,
    ) -> Result<Vec<u8>>;

    /// Unpack every entry into `sink`, in table order.
    fn unpack<S: Read + Seek, O: OutputSink + ?Sized>(
        &self,
        source: &mut S,
        sink: &mut O,
    ) -> Result<()> {
        let archive = self.read_archive(source)?;
        for (index, entry) in archive.entries.iter().enumerate() {
            let data = self.read_entry(source, index, entry)?;
            sink.write_entry(entry.name.clone(), data)?;
        }
        Ok(())
    }

    /// Unpack every entry into memory.
    fn unpack_to_vec<S: Read + Seek>(&self, source: &mut S) -> Result<Vec<(EntryName, Vec<u8>)>> {
        let mut sink = MemorySink::new();
        self.unpack(source, &mut sink)?;
        Ok(sink.into_files())
    }

    /// Write a complete archive containing `entries` to `writer`.
    fn pack<W: Write + Seek>(
        &self,
        writer: &mut W,
        entries: &[PackEntry],
        options: &PackOptions,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order_and_duplicates() {
        let mut sink = MemorySink::new();
        sink.write_entry(EntryName::from("b"), b"2".to_vec()).unwrap();
        sink.write_entry(EntryName::from("a"), b"1".to_vec()).unwrap();
        sink.write_entry(EntryName::from("b"), b"3".to_vec()).unwrap();

        let files = sink.into_files();
        let names: Vec<String> = files.iter().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["b", "a", "b"]);
        assert_eq!(files[2].1, b"3");
    }
}
