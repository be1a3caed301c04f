use thiserror::Error;

/// Errors that can occur while decoding a BLTE frame.
#[derive(Debug, Error)]
pub enum BlteError {
    #[error("bad BLTE signature")]
    BadSignature,

    #[error("header size {declared} does not match 12 + 24*{count}")]
    BadHeaderSize { declared: u32, count: u16 },

    #[error("unknown chunk type {0:#04x}")]
    UnknownChunkType(u8),

    #[error("compressed size mismatch in stored chunk")]
    CompressedSizeMismatch,

    #[error("uncompressed size mismatch: expected {expected}, got {actual}")]
    UncompressedSizeMismatch { expected: u32, actual: usize },

    #[error("chunk checksum mismatch")]
    ChecksumMismatch,

    #[error("truncated BLTE input")]
    TruncatedInput,

    #[error("zlib error: {0}")]
    ZlibError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BlteError>;
