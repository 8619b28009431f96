//! Error types for ptav-format

/// Errors that can occur while reading a PTAV header or scan window
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Fewer bytes than a full header were available
    #[error("Truncated header: {len} bytes available, {} required", crate::HEADER_SIZE)]
    Truncated { len: usize },

    /// The leading signature is not `PTAV`
    #[error("Bad magic: expected {:02x?}, found {found:02x?}", crate::MAGIC)]
    BadMagic { found: [u8; 4] },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    /// Whether the error describes the file contents rather than a failure to read them.
    pub fn is_format(&self) -> bool {
        matches!(self, FormatError::Truncated { .. } | FormatError::BadMagic { .. })
    }
}
