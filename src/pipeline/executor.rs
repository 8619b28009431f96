use super::inspect::inspect;
use super::outcome::{BatchSummary, FailureStage, FileOutcome, FileReport, HeaderInfo};
use crate::config::Config;
use ptav_av::{ArtifactNaming, Remuxer, StreamExtractor};
use std::path::{Path, PathBuf};

/// Progress callback type, called with the 1-based position, the batch size
/// and the finished report.
pub type ProgressCallback = Box<dyn Fn(usize, usize, &FileReport)>;

/// Runs header check, marker scan, extraction and remux over a batch of files.
///
/// Each file is processed to completion before the next one starts, and a
/// failure in one file never affects the others.
pub struct BatchPipeline {
    window_size: usize,
    extractor: StreamExtractor,
    naming: ArtifactNaming,
    keep_intermediate: bool,
    remuxer: Option<Box<dyn Remuxer>>,
    progress_callback: Option<ProgressCallback>,
}

impl BatchPipeline {
    /// Create a pipeline from configuration. Remuxing stays off until a
    /// remuxer is attached.
    pub fn new(config: &Config) -> Self {
        Self {
            window_size: config.scan.window_size,
            extractor: StreamExtractor::new().with_chunk_size(config.extract.chunk_size),
            naming: ArtifactNaming::from(&config.naming),
            keep_intermediate: config.extract.keep_intermediate,
            remuxer: None,
            progress_callback: None,
        }
    }

    pub fn with_remuxer(mut self, remuxer: Box<dyn Remuxer>) -> Self {
        self.remuxer = Some(remuxer);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Process `inputs` in order.
    pub fn run(&self, inputs: &[PathBuf]) -> BatchSummary {
        let total = inputs.len();
        let mut summary = BatchSummary::default();

        for (i, input) in inputs.iter().enumerate() {
            tracing::info!("Processing file {}/{}: {:?}", i + 1, total, input);

            let report = self.process_file(input);
            if let Some(ref cb) = self.progress_callback {
                cb(i + 1, total, &report);
            }
            summary.push(report);
        }

        tracing::info!(
            "Batch complete: {}/{} files converted",
            summary.successes,
            summary.total()
        );
        summary
    }

    /// Run one file through every stage and record where it stopped.
    pub fn process_file(&self, path: &Path) -> FileReport {
        let mut report = FileReport {
            path: path.to_path_buf(),
            header: None,
            markers: Vec::new(),
            outcome: FileOutcome::SkippedNoMarker,
        };
        let outcome = self.advance(path, &mut report);
        report.outcome = outcome;

        match &report.outcome {
            FileOutcome::Failed { .. } => tracing::warn!("{:?}: {}", path, report.outcome),
            _ => tracing::info!("{:?}: {}", path, report.outcome),
        }
        report
    }

    fn advance(&self, path: &Path, report: &mut FileReport) -> FileOutcome {
        // Header and marker window
        let inspection = match inspect(path, self.window_size) {
            Ok(inspection) => inspection,
            Err(e) if e.is_format() => {
                return FileOutcome::SkippedNoHeader {
                    reason: e.to_string(),
                }
            }
            Err(e) => return FileOutcome::failed(FailureStage::Read, e),
        };

        let header = inspection.header;
        tracing::debug!(
            "PTAV version {}, data1 {} (0x{:08x}), data2 {} (0x{:08x})",
            header.version,
            header.field1,
            header.field1,
            header.field2,
            header.field2
        );
        report.header = Some(HeaderInfo::from(header));
        report.markers = inspection.scan.hits.clone();

        let Some(offset) = inspection.scan.first() else {
            return FileOutcome::SkippedNoMarker;
        };
        tracing::debug!(
            "Found {} potential H.264 markers, first at offset {}",
            inspection.scan.count(),
            offset
        );

        // Extraction
        let paths = match self.naming.derive(path) {
            Ok(paths) => paths,
            Err(e) => return FileOutcome::failed(FailureStage::Naming, e),
        };

        let extraction = match self.extractor.extract(path, offset, &paths.extracted) {
            Ok(extraction) => extraction,
            Err(e) => {
                if e.leaves_partial_output() {
                    discard(&paths.extracted);
                }
                return FileOutcome::failed(FailureStage::Extract, e);
            }
        };
        tracing::info!(
            "Extracted H.264 stream to {:?} ({} bytes)",
            extraction.output_path,
            extraction.extracted_length
        );

        // Remux
        let Some(ref remuxer) = self.remuxer else {
            return FileOutcome::Extracted {
                artifact: extraction.output_path,
                marker_offset: extraction.marker_offset,
                extracted_length: extraction.extracted_length,
            };
        };

        match remuxer.remux(&extraction.output_path, &paths.converted) {
            Ok(output) => {
                if !self.keep_intermediate {
                    discard(&extraction.output_path);
                }
                FileOutcome::Remuxed {
                    output,
                    marker_offset: extraction.marker_offset,
                    extracted_length: extraction.extracted_length,
                }
            }
            Err(e) => FileOutcome::Failed {
                stage: FailureStage::Remux,
                reason: e.to_string(),
                retained: Some(extraction.output_path),
            },
        }
    }
}

/// Remove an intermediate file, ignoring one that is already gone.
fn discard(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => tracing::debug!("Removed {:?}", path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove {:?}: {}", path, e),
    }
}
