//! vnarc CLI - visual-novel archive tool
//!
//! Lists, extracts and creates NScripter NSA/SAR and Nitroplus PAK2 archives.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{ArchiveFormat, ExtractOptions, ListOptions, Method, cmd_create, cmd_extract, cmd_list};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vnarc")]
#[command(author, version, about = "Visual-novel archive utility")]
#[command(long_about = "
vnarc reads and writes archive formats of visual-novel engines.
Supported formats: NSA, SAR (NScripter), PAK2 (Nitroplus)

Examples:
  vnarc list arc.nsa --format nsa
  vnarc list data.pak --format pak2 --json
  vnarc extract arc.nsa --format nsa -o out -I '*.txt'
  vnarc create arc.nsa --format nsa -l lzss script/ bg/
  vnarc create data.pak --format pak2 -l zlib file1.txt file2.txt
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List contents of an archive
    #[command(alias = "l")]
    List {
        /// Archive file to list
        archive: PathBuf,

        /// Archive format
        #[arg(short, long, value_enum)]
        format: ArchiveFormat,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Include only files matching pattern (glob syntax: *.txt, bg/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude files matching pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,
    },

    /// Extract files from an archive
    #[command(alias = "x")]
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Archive format
        #[arg(short, long, value_enum)]
        format: ArchiveFormat,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Include only files matching pattern (glob syntax: *.txt, bg/*)
        #[arg(short = 'I', long)]
        include: Vec<String>,

        /// Exclude files matching pattern (glob syntax)
        #[arg(short = 'X', long)]
        exclude: Vec<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Create a new archive
    #[command(alias = "c")]
    Create {
        /// Output archive file
        archive: PathBuf,

        /// Files or directories to add to the archive
        files: Vec<PathBuf>,

        /// Archive format
        #[arg(short, long, value_enum)]
        format: ArchiveFormat,

        /// Payload compression
        #[arg(short = 'l', long, value_enum, default_value = "store")]
        compression: Method,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List {
            archive,
            format,
            verbose,
            json,
            include,
            exclude,
        } => cmd_list(
            &archive,
            &ListOptions {
                format,
                verbose,
                json,
                include: &include,
                exclude: &exclude,
            },
        ),
        Commands::Extract {
            archive,
            format,
            output,
            include,
            exclude,
            verbose,
            progress,
        } => cmd_extract(
            &archive,
            &output,
            &ExtractOptions {
                format,
                include: &include,
                exclude: &exclude,
                verbose,
                progress,
            },
        ),
        Commands::Create {
            archive,
            files,
            format,
            compression,
            verbose,
        } => cmd_create(&archive, &files, format, compression, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::parse_from([
            "vnarc", "c", "out.nsa", "a.txt", "dir", "--format", "nsa", "-l", "lzss",
        ]);
        match cli.command {
            Commands::Create {
                files,
                format,
                compression,
                ..
            } => {
                assert_eq!(files.len(), 2);
                assert_eq!(format, ArchiveFormat::Nsa);
                assert_eq!(compression, Method::Lzss);
            }
            _ => panic!("expected create"),
        }
    }

    #[test]
    fn test_format_is_required() {
        assert!(Cli::try_parse_from(["vnarc", "list", "arc.nsa"]).is_err());
    }
}
