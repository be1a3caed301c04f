//! BLTE (Block Table Encoded) decoder.
//!
//! BLTE is the chunked container format CASC wraps every file in: a small
//! header describing a table of chunks, each individually compressed and
//! MD5-verified. This crate exposes a single entry point, [`BlteDecoder`],
//! that decodes a source lazily, one chunk at a time, without ever
//! buffering the whole frame.
//!
//! Only the `N` (stored) and `Z` (zlib) chunk types are supported; `E`
//! (encrypted) and `F` (recursive) chunks are rejected with
//! [`BlteError::UnknownChunkType`].

mod decoder;
mod encoder;
mod error;
mod header;

pub use decoder::BlteDecoder;
pub use encoder::{ChunkSpec, encode_multi_chunk, encode_single_chunk};
pub use error::{BlteError, Result};
pub use header::{BlteHeader, ChunkInfo};
