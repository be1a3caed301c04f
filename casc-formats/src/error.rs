use thiserror::Error;

/// Errors shared by every parser in this crate.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("bad signature")]
    BadSignature,

    #[error("bad version: {0}")]
    BadVersion(String),

    #[error("malformed CSV: {0}")]
    BadCsv(String),

    #[error("malformed configuration: {0}")]
    BadConfig(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("corrupt data: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormatError>;
