//! Error types for the content resolver and explorer facade.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Cdn(#[from] casc_cdn::CdnError),

    #[error(transparent)]
    Storage(#[from] casc_storage::StorageError),

    #[error(transparent)]
    Root(#[from] casc_root::RootError),

    #[error(transparent)]
    Blte(#[from] casc_blte::BlteError),

    #[error("content hash {0} has no known encoded key")]
    NotEncoded(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
