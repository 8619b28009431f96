//! Artifact path derivation.
//!
//! A source `<dir>/<stem>.media` produces `<dir>/<stem>_extracted.h264` for
//! the raw stream and `<dir>/<stem>_converted.mp4` for the remuxed container.
//! Sources without the expected extension are rejected so a derived name can
//! never collide with the source itself.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension carried by PTAV source files.
pub const DEFAULT_SOURCE_EXTENSION: &str = "media";

/// Suffix appended to the stem for the extracted elementary stream.
pub const DEFAULT_EXTRACTED_SUFFIX: &str = "_extracted.h264";

/// Suffix appended to the stem for the remuxed container.
pub const DEFAULT_CONVERTED_SUFFIX: &str = "_converted.mp4";

/// Rules for naming the files derived from a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNaming {
    /// Source extension without the leading dot.
    pub source_extension: String,
    /// Suffix for the extracted stream.
    pub extracted_suffix: String,
    /// Suffix for the final container.
    pub converted_suffix: String,
}

impl Default for ArtifactNaming {
    fn default() -> Self {
        Self {
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            extracted_suffix: DEFAULT_EXTRACTED_SUFFIX.to_string(),
            converted_suffix: DEFAULT_CONVERTED_SUFFIX.to_string(),
        }
    }
}

/// Paths derived from a single source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub source: PathBuf,
    pub extracted: PathBuf,
    pub converted: PathBuf,
}

impl ArtifactNaming {
    /// Check if `path` carries the source extension (ASCII case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use ptav_av::ArtifactNaming;
    /// use std::path::Path;
    ///
    /// let naming = ArtifactNaming::default();
    /// assert!(naming.is_source(Path::new("/data/cam1.media")));
    /// assert!(naming.is_source(Path::new("CAM1.MEDIA")));
    /// assert!(!naming.is_source(Path::new("cam1.mp4")));
    /// ```
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(&self.source_extension))
            .unwrap_or(false)
    }

    /// Derive the intermediate and final artifact paths for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the source has no file stem or its
    /// extension is not the configured source extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use ptav_av::ArtifactNaming;
    /// use std::path::Path;
    ///
    /// let paths = ArtifactNaming::default().derive(Path::new("/data/cam1.media"))?;
    /// assert_eq!(paths.extracted, Path::new("/data/cam1_extracted.h264"));
    /// assert_eq!(paths.converted, Path::new("/data/cam1_converted.mp4"));
    /// # Ok::<(), ptav_av::Error>(())
    /// ```
    pub fn derive(&self, source: &Path) -> Result<ArtifactPaths> {
        if !self.is_source(source) {
            return Err(Error::InvalidInput(format!(
                "expected a .{} file: {}",
                self.source_extension,
                source.display()
            )));
        }

        let stem = source
            .file_stem()
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| Error::InvalidInput(format!("no file stem: {}", source.display())))?
            .to_string_lossy();

        let with_suffix = |suffix: &str| source.with_file_name(format!("{}{}", stem, suffix));

        Ok(ArtifactPaths {
            source: source.to_path_buf(),
            extracted: with_suffix(&self.extracted_suffix),
            converted: with_suffix(&self.converted_suffix),
        })
    }
}
