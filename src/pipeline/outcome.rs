//! Per-file outcomes and the batch summary.

use ptav_format::ContainerHeader;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Decoded header values reported for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderInfo {
    pub version: u32,
    pub field1: u32,
    pub field2: u32,
}

impl From<ContainerHeader> for HeaderInfo {
    fn from(header: ContainerHeader) -> Self {
        Self {
            version: header.version,
            field1: header.field1,
            field2: header.field2,
        }
    }
}

/// Stage at which a file failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Opening or reading the source
    Read,
    /// Deriving artifact paths
    Naming,
    /// Copying the stream
    Extract,
    /// Running the remuxer
    Remux,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureStage::Read => "read",
            FailureStage::Naming => "naming",
            FailureStage::Extract => "extract",
            FailureStage::Remux => "remux",
        };
        f.write_str(name)
    }
}

/// Terminal state of one file's pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file is not a PTAV container.
    SkippedNoHeader { reason: String },
    /// No start marker inside the scan window.
    SkippedNoMarker,
    /// Stream extracted, remuxing disabled.
    Extracted {
        artifact: PathBuf,
        marker_offset: u64,
        extracted_length: u64,
    },
    /// Stream extracted and remuxed.
    Remuxed {
        output: PathBuf,
        marker_offset: u64,
        extracted_length: u64,
    },
    /// Processing stopped on an error.
    Failed {
        stage: FailureStage,
        reason: String,
        /// Intermediate artifact kept for inspection
        retained: Option<PathBuf>,
    },
}

impl FileOutcome {
    pub(crate) fn failed(stage: FailureStage, err: impl fmt::Display) -> Self {
        FileOutcome::Failed {
            stage,
            reason: err.to_string(),
            retained: None,
        }
    }

    /// Whether the file ended with a remuxed container.
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Remuxed { .. })
    }

    /// Whether a stream was extracted, whether or not it was remuxed.
    pub fn is_extracted(&self) -> bool {
        matches!(self, FileOutcome::Extracted { .. } | FileOutcome::Remuxed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            FileOutcome::SkippedNoHeader { .. } | FileOutcome::SkippedNoMarker
        )
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileOutcome::SkippedNoHeader { reason } => write!(f, "skipped, no PTAV header ({})", reason),
            FileOutcome::SkippedNoMarker => f.write_str("skipped, no H.264 stream found"),
            FileOutcome::Extracted {
                artifact,
                extracted_length,
                ..
            } => write!(
                f,
                "extracted {} bytes to {}",
                extracted_length,
                artifact.display()
            ),
            FileOutcome::Remuxed { output, .. } => write!(f, "converted to {}", output.display()),
            FileOutcome::Failed {
                stage,
                reason,
                retained,
            } => {
                write!(f, "{} failed: {}", stage, reason)?;
                if let Some(path) = retained {
                    write!(f, " (kept {})", path.display())?;
                }
                Ok(())
            }
        }
    }
}

/// Everything learned about one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Decoded header, if it was valid
    pub header: Option<HeaderInfo>,
    /// Start marker offsets found in the scan window
    pub markers: Vec<u64>,
    pub outcome: FileOutcome,
}

/// Ordered per-file reports for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub reports: Vec<FileReport>,
    /// Number of files that ended remuxed
    pub successes: usize,
}

impl BatchSummary {
    pub(crate) fn push(&mut self, report: FileReport) {
        if report.outcome.is_success() {
            self.successes += 1;
        }
        self.reports.push(report);
    }

    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Number of files with an extracted stream, remuxed or not.
    pub fn extracted(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.is_extracted())
            .count()
    }

    /// Containers produced by successful remuxes, in input order.
    pub fn produced(&self) -> Vec<&Path> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                FileOutcome::Remuxed { output, .. } => Some(output.as_path()),
                _ => None,
            })
            .collect()
    }
}
