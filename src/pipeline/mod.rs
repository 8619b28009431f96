//! Batch extraction pipeline.
//!
//! Each input file moves through header validation, marker scanning,
//! extraction and (optionally) remuxing. Every file ends with exactly one
//! [`FileOutcome`], collected in order into a [`BatchSummary`].

pub mod executor;
pub mod inspect;
pub mod outcome;

pub use executor::{BatchPipeline, ProgressCallback};
pub use inspect::{inspect, Inspection};
pub use outcome::{BatchSummary, FailureStage, FileOutcome, FileReport, HeaderInfo};
