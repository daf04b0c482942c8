//! Extract command implementation.

use super::{ArchiveFormat, with_codec};
use crate::utils::{DirectorySink, create_progress_bar, filter_entries};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use vnarc_core::{ArchiveCodec, OutputSink};

/// Options for extracting an archive.
pub struct ExtractOptions<'a> {
    pub format: ArchiveFormat,
    pub include: &'a [String],
    pub exclude: &'a [String],
    pub verbose: bool,
    pub progress: bool,
}

pub fn cmd_extract(
    archive: &Path,
    output: &Path,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(archive)?;
    let mut reader = BufReader::new(file);
    let mut sink = DirectorySink::new(output);

    with_codec!(options.format, codec => extract_with(&codec, &mut reader, &mut sink, options))?;

    if options.verbose {
        println!(
            "Extracted {} files to {}",
            sink.written().len(),
            output.display()
        );
    }
    Ok(())
}

fn extract_with<C: ArchiveCodec, S: Read + Seek>(
    codec: &C,
    reader: &mut S,
    sink: &mut DirectorySink,
    options: &ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let archive = codec.read_archive(reader)?;
    let selected = filter_entries(&archive.entries, options.include, options.exclude);

    let pb = create_progress_bar(selected.len() as u64, options.progress);
    pb.set_message("files");

    for (index, entry) in selected {
        let data = codec.read_entry(reader, index, entry)?;
        if options.verbose {
            let line = format!("  Extracted: {} ({} bytes)", entry.name, data.len());
            if pb.is_hidden() {
                println!("{}", line);
            } else {
                pb.println(line);
            }
        }
        sink.write_entry(entry.name.clone(), data)?;
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    Ok(())
}
