//! The local backend: mounts an on-disk CASC installation and serves
//! content directly from its `.idx`/`data.NNN` files, without any network
//! access.
//!
//! Unlike the online backend, every frame this crate reads has already had
//! its local header stripped — see [`casc_formats::FetchedData`] for why
//! that distinction matters to the content resolver.

pub mod backend;
pub mod bucket;
pub mod build_info;
pub mod error;
pub mod title;

pub use backend::LocalBackend;
pub use error::{Result, StorageError};
pub use title::Title;
