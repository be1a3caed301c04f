//! Binary and text format parsers for the CASC/TACT content system:
//! version and CDN tables, build/CDN configuration, the paged encoding
//! table, CDN archive indices, and the local install's `.idx`/`data.NNN`
//! framing.
//!
//! Every parser here is a pure function over a byte source; none of them
//! perform network or filesystem I/O themselves. The encoding table
//! parser streams page by page rather than buffering the whole table,
//! since encoding tables for large titles can run into the hundreds of
//! megabytes.

pub mod archive_index;
pub mod bpsv;
pub mod build_info;
pub mod cancel;
pub mod config;
pub mod encoding;
pub mod error;
pub mod fetched;
pub mod hash;
pub mod local_frame;
pub mod local_idx;
pub mod versions;

pub use cancel::CancelToken;
pub use error::{FormatError, Result};
pub use fetched::FetchedData;
pub use hash::CascHash;
