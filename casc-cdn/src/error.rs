//! Error types for the online backend.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CdnError {
    #[error("malformed version/CDN table: {0}")]
    BadCsv(#[from] casc_formats::FormatError),

    #[error("no CDN/version record for region {0}")]
    UnknownRegion(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unsupported title: {0}")]
    Unsupported(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for CdnError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CdnError>;
