//! Create command implementation.

use super::{ArchiveFormat, Method, with_codec};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use vnarc_core::{ArchiveCodec, PackEntry, PackOptions};

pub fn cmd_create(
    archive: &Path,
    files: &[PathBuf],
    format: ArchiveFormat,
    method: Method,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if files.is_empty() {
        return Err("no input files given".into());
    }

    let mut entries = Vec::new();
    for path in files {
        let base = path.parent().unwrap_or(path).to_path_buf();
        collect_path(path, &base, &mut entries, verbose)?;
    }

    let options = PackOptions::stored().with_compression(method.into());
    let mut writer = BufWriter::new(File::create(archive)?);
    let packed: Result<(), Box<dyn std::error::Error>> =
        with_codec!(format, codec => codec.pack(&mut writer, &entries, &options))
            .map_err(Into::into)
            .and_then(|()| writer.flush().map_err(Into::into));

    if let Err(e) = packed {
        // Leave no partial archive behind.
        drop(writer);
        let _ = fs::remove_file(archive);
        return Err(e);
    }

    println!(
        "Created {} ({}, {} files)",
        archive.display(),
        format,
        entries.len()
    );
    Ok(())
}

/// Add a file, or every file below a directory, with a `/`-separated name
/// relative to `base`.
fn collect_path(
    path: &Path,
    base: &Path,
    entries: &mut Vec<PackEntry>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if path.is_dir() {
        let mut children = fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        children.sort();
        for child in children {
            collect_path(&child, base, entries, verbose)?;
        }
    } else {
        let name = entry_name(path, base);
        let data = fs::read(path)?;
        if verbose {
            println!("  Added: {} ({} bytes)", name, data.len());
        }
        entries.push(PackEntry::new(name, data));
    }
    Ok(())
}

/// Archive name of `path`: its normal components below `base`, joined with
/// `/`. `.`, `..` and root components are dropped.
fn entry_name(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_name_drops_current_dir() {
        // `vnarc create out.nsa .` lists children as `./a.txt`
        let dot = Path::new(".");
        let base = dot.parent().unwrap_or(dot);
        assert_eq!(entry_name(&dot.join("a.txt"), base), "a.txt");
        assert_eq!(entry_name(&dot.join("bg").join("x.bmp"), base), "bg/x.bmp");
    }

    #[test]
    fn test_entry_name_relative_to_parent() {
        let dir = Path::new("data").join("script");
        let base = dir.parent().unwrap();
        assert_eq!(entry_name(&dir.join("0.txt"), base), "script/0.txt");
        assert_eq!(entry_name(Path::new("a.txt"), Path::new("")), "a.txt");
    }
}
