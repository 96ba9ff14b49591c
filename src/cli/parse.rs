//! CLI parse: clap types for crcgen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// crcgen - batch file checksum generation
#[derive(Parser, Debug)]
#[command(name = "crcgen", version)]
#[command(about = "Batch generates file checksums for files in a directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory used to find `.crcgen.toml`
    #[arg(long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable logging at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off); enables logging
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate CRC-32 checksums for every file below a directory
    Crc32 {
        /// Root directory to scan
        root: PathBuf,

        /// Manifest file to write; the extension picks the format
        #[arg(long, short)]
        output: Option<String>,

        /// Checksum algorithm to compute (repeatable); CRC32 when omitted
        #[arg(long = "algorithm", short = 'a')]
        algorithms: Vec<String>,
    },
    /// Print the files recorded in a manifest
    Show {
        /// Manifest file to read
        #[arg(long, short)]
        output: Option<String>,
    },
    /// List the supported manifest extensions
    Formats,
}
