//! # ptav-format
//!
//! Pure Rust inspection of PTAV container files.
//!
//! This crate validates the fixed 16-byte PTAV header and locates
//! elementary stream start markers (`00 00 00 01`) inside a bounded window
//! at the start of the file. It performs no I/O beyond reading from the
//! readers it is handed, and it never interprets the video bitstream.
//!
//! ## Example
//!
//! ```no_run
//! use std::fs::File;
//! use ptav_format::{read_header, read_scan_window, MarkerScan, DEFAULT_SCAN_WINDOW};
//!
//! let mut file = File::open("clip.media")?;
//! let header = read_header(&mut file)?;
//! println!("PTAV version {}", header.version);
//!
//! let window = read_scan_window(&mut file, DEFAULT_SCAN_WINDOW)?;
//! let scan = MarkerScan::scan(&window);
//! if let Some(offset) = scan.first() {
//!     println!("stream starts at {offset}");
//! }
//! # Ok::<(), ptav_format::FormatError>(())
//! ```

pub mod error;
pub mod header;
pub mod marker;

pub use error::FormatError;
pub use header::{
    parse_header, read_header, ContainerHeader, HEADER_READ_LEN, HEADER_SIZE, MAGIC,
};
pub use marker::{
    find_markers, first_marker, read_scan_window, MarkerScan, DEFAULT_SCAN_WINDOW, START_MARKER,
};
