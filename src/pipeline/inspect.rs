//! Header and marker inspection of a single file.

use ptav_format::{read_header, read_scan_window, ContainerHeader, FormatError, MarkerScan};
use std::fs::File;
use std::path::Path;

/// What the first two pipeline stages learn about a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub header: ContainerHeader,
    pub file_size: u64,
    pub scan: MarkerScan,
}

/// Validate the header of `path` and scan its first `window_size` bytes.
///
/// # Errors
///
/// Returns a format error ([`FormatError::is_format`]) if the file is not a
/// PTAV container, or [`FormatError::Io`] if it cannot be read.
pub fn inspect(path: &Path, window_size: usize) -> Result<Inspection, FormatError> {
    let mut file = File::open(path)?;
    let file_size = file.metadata()?.len();

    let header = read_header(&mut file)?;
    let window = read_scan_window(&mut file, window_size)?;

    Ok(Inspection {
        header,
        file_size,
        scan: MarkerScan::scan(&window),
    })
}
