//! Property tests for stream extraction.

use proptest::prelude::*;
use ptav_av::StreamExtractor;
use std::fs;
use tempfile::tempdir;

fn source_and_offset() -> impl Strategy<Value = (Vec<u8>, u64)> {
    prop::collection::vec(any::<u8>(), 0..8192).prop_flat_map(|data| {
        let len = data.len() as u64;
        (Just(data), 0..=len)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_extract_copies_exact_tail(
        (data, offset) in source_and_offset(),
        chunk_size in 1usize..512,
    ) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("clip.media");
        let dest = dir.path().join("clip_extracted.h264");
        fs::write(&source, &data).unwrap();

        let result = StreamExtractor::new()
            .with_chunk_size(chunk_size)
            .extract(&source, offset, &dest)
            .unwrap();

        prop_assert_eq!(result.file_size, data.len() as u64);
        prop_assert_eq!(result.extracted_length, data.len() as u64 - offset);
        prop_assert_eq!(fs::read(&dest).unwrap(), &data[offset as usize..]);
    }
}
