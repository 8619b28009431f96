use ptav_av::naming::{DEFAULT_CONVERTED_SUFFIX, DEFAULT_EXTRACTED_SUFFIX, DEFAULT_SOURCE_EXTENSION};
use ptav_av::{ArtifactNaming, DEFAULT_CHUNK_SIZE, DEFAULT_OUTPUT_FORMAT};
use ptav_format::DEFAULT_SCAN_WINDOW;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub naming: NamingConfig,

    #[serde(default)]
    pub remux: RemuxConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Number of leading bytes searched for start markers (default: 1024)
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

fn default_window_size() -> usize {
    DEFAULT_SCAN_WINDOW
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractConfig {
    /// Copy buffer size in bytes (default: 64 KiB)
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Keep the extracted stream after a successful remux
    #[serde(default)]
    pub keep_intermediate: bool,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            keep_intermediate: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NamingConfig {
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    #[serde(default = "default_extracted_suffix")]
    pub extracted_suffix: String,

    #[serde(default = "default_converted_suffix")]
    pub converted_suffix: String,
}

fn default_source_extension() -> String {
    DEFAULT_SOURCE_EXTENSION.to_string()
}
fn default_extracted_suffix() -> String {
    DEFAULT_EXTRACTED_SUFFIX.to_string()
}
fn default_converted_suffix() -> String {
    DEFAULT_CONVERTED_SUFFIX.to_string()
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            extracted_suffix: default_extracted_suffix(),
            converted_suffix: default_converted_suffix(),
        }
    }
}

impl From<&NamingConfig> for ArtifactNaming {
    fn from(config: &NamingConfig) -> Self {
        ArtifactNaming {
            source_extension: config.source_extension.trim_start_matches('.').to_string(),
            extracted_suffix: config.extracted_suffix.clone(),
            converted_suffix: config.converted_suffix.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemuxConfig {
    /// Run ffmpeg on each extracted stream (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Explicit ffmpeg executable; PATH is searched when unset
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// ffmpeg muxer name passed with `-f`
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Kill ffmpeg after this many seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_true() -> bool {
    true
}

fn default_output_format() -> String {
    DEFAULT_OUTPUT_FORMAT.to_string()
}

impl Default for RemuxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ffmpeg_path: None,
            output_format: default_output_format(),
            timeout_secs: None,
        }
    }
}

impl RemuxConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifestConfig {
    /// Write a concat list after a batch with at least one success
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_manifest_path")]
    pub path: PathBuf,
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from(crate::manifest::DEFAULT_MANIFEST_NAME)
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_manifest_path(),
        }
    }
}
