//! The online backend: bootstraps a title's build from the Blizzard patch
//! service, then serves content either from a CDN archive (byte-range
//! reads) or as a standalone blob.
//!
//! Every fetch this crate performs returns a raw BLTE frame — see
//! [`casc_formats::FetchedData`] for why that matters to the content
//! resolver.

pub mod client;
pub mod error;
pub mod region;
pub mod url;

pub use client::OnlineBackend;
pub use error::{CdnError, Result};
pub use region::Region;
