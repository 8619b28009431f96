//! Elementary stream start marker scanning
//!
//! Markers are searched only inside a fixed-size window at the start of the
//! file. A marker that begins beyond the window is never found.

use std::io::{Read, Seek, SeekFrom};

use crate::header::read_up_to;

/// Four-byte start code that precedes elementary stream data.
pub const START_MARKER: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// Default number of leading bytes searched for markers.
pub const DEFAULT_SCAN_WINDOW: usize = 1024;

/// Result of scanning a window for start markers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerScan {
    /// Number of bytes that were scanned
    pub window_len: usize,
    /// Offsets of every marker found, ascending
    pub hits: Vec<u64>,
}

impl MarkerScan {
    /// Scan `window` for start markers.
    pub fn scan(window: &[u8]) -> Self {
        Self {
            window_len: window.len(),
            hits: find_markers(window),
        }
    }

    /// Number of markers found.
    pub fn count(&self) -> usize {
        self.hits.len()
    }

    /// Offset of the first marker, which is where extraction starts.
    pub fn first(&self) -> Option<u64> {
        self.hits.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Find every offset in `window` where [`START_MARKER`] begins.
///
/// Every position `i` in `[0, window.len() - 4)` is tested independently, so
/// overlapping candidates are all reported. The end bound is exclusive: a
/// marker that starts exactly four bytes before the end of the window is not
/// reported.
///
/// ```
/// use ptav_format::find_markers;
///
/// let window = [0xaa, 0x00, 0x00, 0x00, 0x01, 0xbb];
/// assert_eq!(find_markers(&window), vec![1]);
/// assert!(find_markers(&[0x00, 0x00, 0x00, 0x01]).is_empty());
/// ```
pub fn find_markers(window: &[u8]) -> Vec<u64> {
    let end = window.len().saturating_sub(START_MARKER.len());

    (0..end)
        .filter(|&i| window[i..i + START_MARKER.len()] == START_MARKER)
        .map(|i| i as u64)
        .collect()
}

/// Offset of the first marker in `window`, if any.
pub fn first_marker(window: &[u8]) -> Option<u64> {
    find_markers(window).first().copied()
}

/// Read the scan window from the start of `reader`.
///
/// The returned buffer holds `min(limit, size)` bytes. The reader is left
/// positioned just past the window.
pub fn read_scan_window<R: Read + Seek>(reader: &mut R, limit: usize) -> std::io::Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(0))?;
    read_up_to(reader, limit)
}
