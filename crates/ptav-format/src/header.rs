//! PTAV container header
//!
//! The header occupies the first 16 bytes of the file:
//!
//! | Offset | Length | Field   |
//! |--------|--------|---------|
//! | 0      | 4      | magic   |
//! | 4      | 4      | version |
//! | 8      | 4      | field1  |
//! | 12     | 4      | field2  |
//!
//! All multi-byte fields are little-endian. Bytes 16..64 are reserved.

use std::io::Read;

use crate::error::FormatError;

/// Signature at offset 0 of every PTAV file.
pub const MAGIC: [u8; 4] = *b"PTAV";

/// Minimum number of bytes needed to decode a header.
pub const HEADER_SIZE: usize = 16;

/// Number of bytes read from the start of a file for header inspection.
pub const HEADER_READ_LEN: usize = 64;

/// Decoded PTAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Signature bytes, always equal to [`MAGIC`]
    pub magic: [u8; 4],
    /// Format version
    pub version: u32,
    /// Opaque payload metadata
    pub field1: u32,
    /// Opaque payload metadata
    pub field2: u32,
}

impl ContainerHeader {
    /// Check if the magic bytes are valid.
    pub fn is_valid_magic(&self) -> bool {
        self.magic == MAGIC
    }
}

/// Parse a header from the leading bytes of a file.
///
/// Only the first 16 bytes are interpreted; anything after that is ignored.
///
/// # Errors
///
/// Returns [`FormatError::Truncated`] if fewer than 16 bytes are given and
/// [`FormatError::BadMagic`] if the first four bytes are not `PTAV`.
///
/// # Example
///
/// ```
/// use ptav_format::parse_header;
///
/// let mut bytes = b"PTAV".to_vec();
/// bytes.extend_from_slice(&7u32.to_le_bytes());
/// bytes.extend_from_slice(&[0; 8]);
///
/// let header = parse_header(&bytes).unwrap();
/// assert_eq!(header.version, 7);
/// ```
pub fn parse_header(bytes: &[u8]) -> Result<ContainerHeader, FormatError> {
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::Truncated { len: bytes.len() });
    }

    let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
    if magic != MAGIC {
        return Err(FormatError::BadMagic { found: magic });
    }

    Ok(ContainerHeader {
        magic,
        version: read_u32_le(bytes, 4),
        field1: read_u32_le(bytes, 8),
        field2: read_u32_le(bytes, 12),
    })
}

/// Read up to [`HEADER_READ_LEN`] bytes from `reader` and parse them.
pub fn read_header<R: Read>(reader: &mut R) -> Result<ContainerHeader, FormatError> {
    let buf = read_up_to(reader, HEADER_READ_LEN)?;
    parse_header(&buf)
}

/// Read at most `limit` bytes, stopping early only at end of input.
pub(crate) fn read_up_to<R: Read>(reader: &mut R, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(limit);
    reader.take(limit as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
