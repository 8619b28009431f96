use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ptav")]
#[command(author, version, about = "Extract H.264 streams from PTAV media files")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract and remux every PTAV file in a batch
    Convert {
        /// Files or directories to process (defaults to the current directory)
        paths: Vec<PathBuf>,

        /// Stop after extraction and keep the raw streams
        #[arg(long)]
        no_remux: bool,

        /// Search directories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Print the batch summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the header and stream markers of a PTAV file
    Inspect {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract the raw stream from a single PTAV file without remuxing
    Extract {
        /// File to extract from
        #[arg(required = true)]
        file: PathBuf,

        /// Start offset (defaults to the first marker found)
        #[arg(long)]
        offset: Option<u64>,

        /// Output path (defaults to <stem>_extracted.h264 next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
