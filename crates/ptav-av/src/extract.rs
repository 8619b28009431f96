//! Elementary stream extraction.
//!
//! Copies the tail of a source file, starting at a marker offset, into a new
//! file. Data moves through a single fixed-size buffer so memory use does
//! not depend on the size of the source.

use crate::{Error, Result};
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Default copy buffer size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Outcome of a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// File the stream was read from.
    pub source_path: PathBuf,
    /// File the stream was written to.
    pub output_path: PathBuf,
    /// Offset in the source where the copied data starts.
    pub marker_offset: u64,
    /// Size of the source file.
    pub file_size: u64,
    /// Bytes written, always `file_size - marker_offset`.
    pub extracted_length: u64,
}

/// Streams the tail of a file into a new artifact.
///
/// # Example
///
/// ```no_run
/// use ptav_av::StreamExtractor;
/// use std::path::Path;
///
/// let result = StreamExtractor::new().extract(
///     Path::new("clip.media"),
///     20,
///     Path::new("clip_extracted.h264"),
/// )?;
/// println!("wrote {} bytes", result.extracted_length);
/// # Ok::<(), ptav_av::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StreamExtractor {
    chunk_size: usize,
}

impl Default for StreamExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamExtractor {
    /// Create an extractor using [`DEFAULT_CHUNK_SIZE`].
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Use a different copy buffer size. Zero is treated as one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Size of the copy buffer.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Copy everything from `marker_offset` to the end of `source` into `dest`.
    ///
    /// `dest` is created or truncated. If an error is returned after `dest`
    /// was created, its contents are incomplete and it is left in place for
    /// the caller to remove.
    ///
    /// # Errors
    ///
    /// - [`Error::FileNotFound`] if `source` does not exist.
    /// - [`Error::InvalidInput`] if `marker_offset` is past the end of the
    ///   file or `dest` is the source itself.
    /// - [`Error::Io`] on any open, seek, read or write failure.
    /// - [`Error::LengthMismatch`] if the byte count written differs from
    ///   the size of the tail (the source changed during the copy).
    pub fn extract(&self, source: &Path, marker_offset: u64, dest: &Path) -> Result<ExtractionResult> {
        if !source.exists() {
            return Err(Error::file_not_found(source));
        }
        if is_same_target(source, dest) {
            return Err(Error::InvalidInput(format!(
                "extraction output would overwrite its source: {}",
                source.display()
            )));
        }

        let mut input = File::open(source)?;
        let file_size = input.metadata()?.len();

        if marker_offset > file_size {
            return Err(Error::InvalidInput(format!(
                "marker offset {} is beyond end of file ({} bytes)",
                marker_offset, file_size
            )));
        }

        let expected = file_size - marker_offset;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Extracting {} bytes from {:?} at offset {} to {:?}",
            expected,
            source,
            marker_offset,
            dest
        );

        let mut output = File::create(dest)?;
        let written = copy_tail(&mut input, &mut output, marker_offset, self.chunk_size)?;
        output.sync_all()?;

        if written != expected {
            return Err(Error::LengthMismatch { expected, written });
        }

        Ok(ExtractionResult {
            source_path: source.to_path_buf(),
            output_path: dest.to_path_buf(),
            marker_offset,
            file_size,
            extracted_length: written,
        })
    }
}

// Compares file identity, so `./a.media`, absolute paths and links to the
// source are all caught. A destination that does not exist yet cannot be
// the source.
fn is_same_target(source: &Path, dest: &Path) -> bool {
    dest.exists() && matches!(same_file::is_same_file(source, dest), Ok(true))
}

/// Extract with the default chunk size.
pub fn extract(source: &Path, marker_offset: u64, dest: &Path) -> Result<ExtractionResult> {
    StreamExtractor::new().extract(source, marker_offset, dest)
}

/// Seek `reader` to `offset` and copy the rest of it into `writer`.
///
/// At most `chunk_size` bytes are held in memory and each write is at most
/// `chunk_size` bytes long. Returns the number of bytes copied.
pub fn copy_tail<R, W>(reader: &mut R, writer: &mut W, offset: u64, chunk_size: usize) -> std::io::Result<u64>
where
    R: Read + Seek,
    W: Write,
{
    reader.seek(SeekFrom::Start(offset))?;

    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }

    writer.flush()?;
    Ok(total)
}
