//! Extraction integration tests
//!
//! Exercises naming and extraction together against files on disk.

use ptav_av::{ArtifactNaming, StreamExtractor};
use std::fs;
use tempfile::tempdir;

fn ptav_bytes(body: &[u8]) -> Vec<u8> {
    let mut bytes = b"PTAV".to_vec();
    bytes.extend_from_slice(&1u32.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 8]);
    bytes.extend_from_slice(body);
    bytes
}

#[test]
fn test_extract_to_derived_path() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("cam.media");
    fs::write(
        &source,
        ptav_bytes(&[0, 0, 0, 0, 0x00, 0x00, 0x00, 0x01, 0xde, 0xad, 0xbe, 0xef]),
    )
    .unwrap();

    let paths = ArtifactNaming::default().derive(&source).unwrap();
    let result = StreamExtractor::new()
        .extract(&paths.source, 20, &paths.extracted)
        .unwrap();

    assert_eq!(paths.extracted, dir.path().join("cam_extracted.h264"));
    assert_eq!(result.extracted_length, result.file_size - result.marker_offset);
    assert_eq!(
        fs::read(&paths.extracted).unwrap(),
        [0x00, 0x00, 0x00, 0x01, 0xde, 0xad, 0xbe, 0xef]
    );
}

#[test]
fn test_extract_every_offset() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("ramp.media");
    let data: Vec<u8> = (0..300u32).map(|i| (i * 7 % 256) as u8).collect();
    fs::write(&source, &data).unwrap();

    let extractor = StreamExtractor::new().with_chunk_size(16);
    let dest = dir.path().join("ramp_extracted.h264");

    for offset in [0u64, 1, 15, 16, 17, 150, 299, 300] {
        let result = extractor.extract(&source, offset, &dest).unwrap();
        assert_eq!(result.extracted_length, 300 - offset);
        assert_eq!(fs::read(&dest).unwrap(), &data[offset as usize..]);
    }
}

#[test]
fn test_large_file_with_small_chunks() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("big.media");
    let data: Vec<u8> = (0..3_000_000u32).map(|i| (i % 253) as u8).collect();
    fs::write(&source, &data).unwrap();

    let dest = dir.path().join("big_extracted.h264");
    let result = StreamExtractor::new().extract(&source, 1024, &dest).unwrap();

    assert_eq!(result.extracted_length, 3_000_000 - 1024);
    assert_eq!(fs::metadata(&dest).unwrap().len(), result.extracted_length);
    assert!(fs::read(&dest).unwrap() == data[1024..]);
}
