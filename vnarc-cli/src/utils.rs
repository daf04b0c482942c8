//! Utility functions for the CLI.

use glob::Pattern;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use vnarc_core::{EntryName, OutputSink, Result, TableEntry};

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb
}

/// Check if a filename matches the filter patterns.
/// - If include patterns are specified, the name must match at least one
/// - If exclude patterns are specified, the name must not match any
pub fn matches_filters(name: &str, include: &[String], exclude: &[String]) -> bool {
    let matches = |pattern: &String| Pattern::new(pattern).is_ok_and(|p| p.matches(name));

    if exclude.iter().any(matches) {
        return false;
    }
    include.is_empty() || include.iter().any(matches)
}

/// Filter entries based on include/exclude patterns, keeping table indices.
pub fn filter_entries<'a>(
    entries: &'a [TableEntry],
    include: &[String],
    exclude: &[String],
) -> Vec<(usize, &'a TableEntry)> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| matches_filters(&e.name.to_str_lossy(), include, exclude))
        .collect()
}

/// Print entries in a formatted table.
pub fn print_entries(entries: &[(usize, &TableEntry)], verbose: bool) {
    if verbose {
        println!(
            "{:>10} {:>10} {:>6} {:>8}  Name",
            "Size", "Stored", "Ratio", "Method",
        );
        println!("{}", "-".repeat(60));

        let mut total_size = 0u64;
        let mut total_stored = 0u64;

        for (_, entry) in entries {
            let ratio = if entry.original_size > 0 {
                format!("{:.1}%", (1.0 - entry.compression_ratio()) * 100.0)
            } else {
                "-".to_string()
            };
            let marker = if entry.name.is_fallback() { "? " } else { "  " };

            println!(
                "{:>10} {:>10} {:>6} {:>8}  {}{}",
                entry.original_size,
                entry.compressed_size,
                ratio,
                entry.compression,
                marker,
                entry.name
            );

            total_size += entry.original_size;
            total_stored += entry.compressed_size;
        }

        println!("{}", "-".repeat(60));
        let total_ratio = if total_size > 0 {
            (1.0 - total_stored as f64 / total_size as f64) * 100.0
        } else {
            0.0
        };
        println!(
            "{:>10} {:>10} {:>5.1}%          {} files",
            total_size,
            total_stored,
            total_ratio,
            entries.len()
        );
    } else {
        for (_, entry) in entries {
            println!("{}", entry.name);
        }
    }
}

/// Turn an archive entry name into a relative path that stays inside the
/// output directory.
///
/// Both `/` and `\` separate components; empty, `.` and `..` components and
/// drive prefixes are dropped.
pub fn sanitize_name(name: &str) -> PathBuf {
    let mut path = PathBuf::new();
    for (i, part) in name.split(['/', '\\']).enumerate() {
        if i == 0 && part.len() == 2 && part.ends_with(':') {
            continue;
        }
        match part {
            "" | "." | ".." => {}
            _ => path.push(part),
        }
    }
    if path.as_os_str().is_empty() {
        path.push("unnamed");
    }
    path
}

/// Append ` (n)` to the file stem.
fn numbered(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} ({})", stem, n),
    };
    path.with_file_name(file_name)
}

/// Sink that writes entries below a directory.
///
/// Names are sanitized with [`sanitize_name`]. A name that was already
/// written during this extraction gets a ` (n)` suffix instead of
/// overwriting the earlier entry.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    used: HashSet<PathBuf>,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Create a sink writing below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            used: HashSet::new(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn unique_path(&mut self, relative: PathBuf) -> PathBuf {
        let mut candidate = relative.clone();
        let mut n = 1;
        while self.used.contains(&candidate) {
            candidate = numbered(&relative, n);
            n += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

impl OutputSink for DirectorySink {
    fn write_entry(&mut self, name: EntryName, data: Vec<u8>) -> Result<()> {
        let relative = self.unique_path(sanitize_name(&name.to_str_lossy()));
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        self.written.push(path);
        Ok(())
    }
}
