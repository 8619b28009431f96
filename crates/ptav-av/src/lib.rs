//! # ptav-av
//!
//! Elementary stream extraction and remuxing for PTAV container files.
//!
//! This crate provides functionality for:
//! - Copying the stream tail of a PTAV file into a standalone artifact with
//!   bounded memory
//! - Deriving artifact names from the source path
//! - Remuxing an extracted stream into a standard container with ffmpeg
//! - Detecting the external tools the remux step needs
//!
//! ## Features
//!
//! - `tracing` - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use ptav_av::{ArtifactNaming, FfmpegRemuxer, Remuxer, StreamExtractor};
//! use std::path::Path;
//!
//! let paths = ArtifactNaming::default().derive(Path::new("clip.media"))?;
//! let extraction = StreamExtractor::new().extract(&paths.source, 20, &paths.extracted)?;
//! println!("Extracted {} bytes", extraction.extracted_length);
//!
//! let remuxer = FfmpegRemuxer::discover(None)?;
//! remuxer.remux(&paths.extracted, &paths.converted)?;
//! # Ok::<(), ptav_av::Error>(())
//! ```

mod error;
pub mod extract;
pub mod naming;
pub mod remux;
pub mod tools;

// Re-exports
pub use error::{Error, Result};
pub use extract::{copy_tail, extract, ExtractionResult, StreamExtractor, DEFAULT_CHUNK_SIZE};
pub use naming::{ArtifactNaming, ArtifactPaths};
pub use remux::{FfmpegRemuxer, Remuxer, DEFAULT_OUTPUT_FORMAT};
pub use tools::{check_tool_at, check_tools, get_tool_path, require_tool, ToolInfo};
