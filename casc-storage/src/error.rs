//! Error types for the local backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format error: {0}")]
    Format(#[from] casc_formats::FormatError),

    #[error("BLTE error: {0}")]
    Blte(#[from] casc_blte::BlteError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("no installation found at {0}")]
    NoInstallation(String),

    #[error("unsupported title at {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;
