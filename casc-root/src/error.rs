//! Error types for root parsing and resolution.

use thiserror::Error;

/// Errors that can occur when parsing a root blob or resolving a name.
#[derive(Error, Debug)]
pub enum RootError {
    /// Invalid magic signature detected.
    #[error("invalid root signature: {0:08x}")]
    InvalidMagic(u32),

    /// Root blob ended before an expected field or array could be read.
    #[error("truncated root data: {0}")]
    Truncated(String),

    /// A directory entry under `D` has no content-hash in any helper table.
    #[error("could not resolve file: {0}")]
    NotFound(String),

    /// Title is recognised but this root format is not implemented.
    #[error("unsupported root format: {0}")]
    Unsupported(String),

    /// Fetching a referenced blob (directory, `CoreTOC.dat`, `Packages.dat`)
    /// failed.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// I/O error reading a buffered slice.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RootError>;
