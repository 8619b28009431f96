//! Pipeline integration tests
//!
//! Runs whole batches against files on disk with an in-process remuxer.

mod common;

use assert_matches::assert_matches;
use ptav::config::Config;
use ptav::manifest;
use ptav::pipeline::{BatchPipeline, FailureStage, FileOutcome};
use ptav_av::Error;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::tempdir;

/// Remuxer stand-in that copies the stream and records each call.
fn copying_remuxer(calls: Rc<RefCell<Vec<PathBuf>>>) -> impl Fn(&Path, &Path) -> ptav_av::Result<PathBuf> {
    move |input: &Path, output: &Path| -> ptav_av::Result<PathBuf> {
        calls.borrow_mut().push(input.to_path_buf());
        fs::copy(input, output)?;
        Ok(output.to_path_buf())
    }
}

fn failing_remuxer(input: &Path, _output: &Path) -> ptav_av::Result<PathBuf> {
    Err(Error::tool_failed(
        "ffmpeg",
        format!("{}: Invalid data found when processing input", input.display()),
    ))
}

#[test]
fn test_no_marker_file_is_skipped() {
    let dir = tempdir().unwrap();
    let path = common::write(dir.path(), "a.media", &common::no_marker_file());

    let report = BatchPipeline::new(&Config::default()).process_file(&path);

    let header = report.header.unwrap();
    assert_eq!((header.version, header.field1, header.field2), (1, 0, 0));
    assert!(report.markers.is_empty());
    assert_eq!(report.outcome, FileOutcome::SkippedNoMarker);
    assert!(!dir.path().join("a_extracted.h264").exists());
}

#[test]
fn test_marker_file_is_extracted() {
    let dir = tempdir().unwrap();
    let path = common::write(dir.path(), "a.media", &common::stream_file());

    let report = BatchPipeline::new(&Config::default()).process_file(&path);

    assert_eq!(report.markers, vec![20]);
    assert_matches!(
        report.outcome,
        FileOutcome::Extracted { marker_offset: 20, extracted_length: 8, .. }
    );
    assert_eq!(
        fs::read(dir.path().join("a_extracted.h264")).unwrap(),
        common::STREAM_TAIL
    );
}

#[test]
fn test_truncated_file_does_not_stop_batch() {
    let dir = tempdir().unwrap();
    let short = common::write(dir.path(), "a_short.media", &common::truncated_file());
    let good = common::write(dir.path(), "b_good.media", &common::stream_file());

    let summary = BatchPipeline::new(&Config::default()).run(&[short, good]);

    assert_eq!(summary.total(), 2);
    assert_matches!(
        &summary.reports[0].outcome,
        FileOutcome::SkippedNoHeader { reason } if reason.contains("Truncated")
    );
    assert!(summary.reports[0].header.is_none());
    assert_matches!(summary.reports[1].outcome, FileOutcome::Extracted { .. });
}

#[test]
fn test_remux_success_removes_intermediate() {
    let dir = tempdir().unwrap();
    let path = common::write(dir.path(), "cam.media", &common::stream_file());
    let calls = Rc::new(RefCell::new(Vec::new()));

    let pipeline = BatchPipeline::new(&Config::default())
        .with_remuxer(Box::new(copying_remuxer(calls.clone())));
    let summary = pipeline.run(&[path]);

    let extracted = dir.path().join("cam_extracted.h264");
    let converted = dir.path().join("cam_converted.mp4");

    assert_eq!(*calls.borrow(), vec![extracted.clone()]);
    assert_eq!(summary.successes, 1);
    assert_eq!(
        summary.reports[0].outcome,
        FileOutcome::Remuxed {
            output: converted.clone(),
            marker_offset: 20,
            extracted_length: 8,
        }
    );
    assert!(!extracted.exists());
    assert_eq!(fs::read(&converted).unwrap(), common::STREAM_TAIL);
    assert_eq!(summary.produced(), vec![converted.as_path()]);
}

#[test]
fn test_remux_failure_keeps_intermediate() {
    let dir = tempdir().unwrap();
    let path = common::write(dir.path(), "cam.media", &common::stream_file());

    let pipeline = BatchPipeline::new(&Config::default()).with_remuxer(Box::new(failing_remuxer));
    let summary = pipeline.run(&[path]);

    let extracted = dir.path().join("cam_extracted.h264");
    assert_eq!(summary.successes, 0);
    assert_matches!(
        &summary.reports[0].outcome,
        FileOutcome::Failed { stage: FailureStage::Remux, reason, retained: Some(kept) }
            if reason.contains("Invalid data") && *kept == extracted
    );
    assert_eq!(fs::read(&extracted).unwrap(), common::STREAM_TAIL);
    assert!(!dir.path().join("cam_converted.mp4").exists());
}

#[test]
fn test_mixed_batch_preserves_order_and_counts() {
    let dir = tempdir().unwrap();
    let mut not_ptav = common::stream_file();
    not_ptav[..4].copy_from_slice(b"RIFF");

    let inputs = vec![
        common::write(dir.path(), "1.media", &common::stream_file()),
        common::write(dir.path(), "2.media", &common::truncated_file()),
        common::write(dir.path(), "3.media", &not_ptav),
        dir.path().join("4_missing.media"),
        common::write(dir.path(), "5.media", &common::no_marker_file()),
        common::write(dir.path(), "6.media", &common::stream_file()),
    ];

    let calls = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let seen_by_callback = seen.clone();

    let pipeline = BatchPipeline::new(&Config::default())
        .with_remuxer(Box::new(copying_remuxer(calls.clone())))
        .with_progress_callback(Box::new(move |index, total, report| {
            seen_by_callback
                .borrow_mut()
                .push((index, total, report.path.clone()));
        }));
    let summary = pipeline.run(&inputs);

    assert_eq!(summary.total(), 6);
    assert_eq!(summary.successes, 2);
    assert_eq!(calls.borrow().len(), 2);

    let paths: Vec<_> = summary.reports.iter().map(|r| r.path.clone()).collect();
    assert_eq!(paths, inputs);

    assert_matches!(summary.reports[0].outcome, FileOutcome::Remuxed { .. });
    assert_matches!(summary.reports[1].outcome, FileOutcome::SkippedNoHeader { .. });
    assert_matches!(
        &summary.reports[2].outcome,
        FileOutcome::SkippedNoHeader { reason } if reason.contains("Bad magic")
    );
    assert_matches!(
        summary.reports[3].outcome,
        FileOutcome::Failed { stage: FailureStage::Read, .. }
    );
    assert_eq!(summary.reports[4].outcome, FileOutcome::SkippedNoMarker);
    assert_matches!(summary.reports[5].outcome, FileOutcome::Remuxed { .. });

    let seen = seen.borrow();
    assert_eq!(seen.len(), 6);
    assert_eq!(seen[0], (1, 6, inputs[0].clone()));
    assert_eq!(seen[5], (6, 6, inputs[5].clone()));
}

#[test]
fn test_all_failures_still_summarised() {
    let dir = tempdir().unwrap();
    let inputs = vec![
        common::write(dir.path(), "a.media", &common::truncated_file()),
        common::write(dir.path(), "b.media", &[]),
    ];

    let summary = BatchPipeline::new(&Config::default())
        .with_remuxer(Box::new(failing_remuxer))
        .run(&inputs);

    assert_eq!(summary.total(), 2);
    assert_eq!(summary.successes, 0);
    assert!(summary.reports.iter().all(|r| r.outcome.is_skipped()));
}

#[test]
fn test_manifest_from_batch() {
    let dir = tempdir().unwrap();
    let inputs = vec![
        common::write(dir.path(), "b.media", &common::stream_file()),
        common::write(dir.path(), "a.media", &common::stream_file()),
    ];

    let calls = Rc::new(RefCell::new(Vec::new()));
    let summary = BatchPipeline::new(&Config::default())
        .with_remuxer(Box::new(copying_remuxer(calls)))
        .run(&inputs);

    let manifest_path = dir.path().join(manifest::DEFAULT_MANIFEST_NAME);
    manifest::write_manifest(&manifest_path, &summary.produced()).unwrap();

    let text = fs::read_to_string(&manifest_path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            format!("file '{}'", dir.path().join("a_converted.mp4").display()),
            format!("file '{}'", dir.path().join("b_converted.mp4").display()),
        ]
    );
}

#[test]
fn test_large_stream_extracts_exactly() {
    let dir = tempdir().unwrap();
    let mut bytes = common::header(2, 0xffff_ffff, 42);
    bytes.extend_from_slice(&[0x11; 100]);
    bytes.extend_from_slice(&common::MARKER);
    bytes.extend((0..1_000_000u32).map(|i| (i % 241) as u8));
    let path = common::write(dir.path(), "big.media", &bytes);

    let mut config = Config::default();
    config.extract.chunk_size = 4096;
    let report = BatchPipeline::new(&config).process_file(&path);

    assert_matches!(
        report.outcome,
        FileOutcome::Extracted { marker_offset: 116, extracted_length, .. }
            if extracted_length == bytes.len() as u64 - 116
    );
    assert_eq!(
        fs::read(dir.path().join("big_extracted.h264")).unwrap(),
        &bytes[116..]
    );
}
