//! Shared fixtures for integration tests.
//!
//! Builds PTAV files on disk inside a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const MARKER: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

/// 16-byte PTAV header with the given fields.
pub fn header(version: u32, field1: u32, field2: u32) -> Vec<u8> {
    let mut bytes = b"PTAV".to_vec();
    bytes.extend_from_slice(&version.to_le_bytes());
    bytes.extend_from_slice(&field1.to_le_bytes());
    bytes.extend_from_slice(&field2.to_le_bytes());
    bytes
}

/// 20-byte file: header (version 1) followed by four zero bytes. No marker.
pub fn no_marker_file() -> Vec<u8> {
    let mut bytes = header(1, 0, 0);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

/// Header, four zero bytes, a marker at offset 20, then `DE AD BE EF`.
pub fn stream_file() -> Vec<u8> {
    let mut bytes = header(1, 0, 0);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes.extend_from_slice(&MARKER);
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    bytes
}

/// The eight bytes extracted from [`stream_file`].
pub const STREAM_TAIL: [u8; 8] = [0x00, 0x00, 0x00, 0x01, 0xde, 0xad, 0xbe, 0xef];

/// A file too short to hold a header.
pub fn truncated_file() -> Vec<u8> {
    header(1, 0, 0)[..10].to_vec()
}

pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).unwrap();
    path
}
