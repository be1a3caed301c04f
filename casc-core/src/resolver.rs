//! Content resolver: turns a content-hash into fully-decoded logical bytes.

use casc_formats::{CancelToken, CascHash, FetchedData};

use crate::backend::Backend;
use crate::error::{CoreError, Result};

/// Resolve `content_hash` to its decoded bytes.
///
/// Picks the first of the content-hash's encoded keys, fetches it from
/// `backend`, and BLTE-decodes the result unless the backend had already
/// decoded it (see [`casc_formats::FetchedData`] for why the two backends
/// disagree on this).
pub fn extract(backend: &Backend, content_hash: CascHash, cancel: &CancelToken) -> Result<Vec<u8>> {
    let ekey = backend
        .encoded_keys_for(content_hash)
        .and_then(|keys| keys.first().copied())
        .ok_or_else(|| CoreError::NotEncoded(content_hash.to_hex()))?;

    match backend.open_data(ekey, cancel)? {
        FetchedData::Decoded(bytes) => Ok(bytes),
        FetchedData::Encoded(bytes) => {
            tracing::debug!(%ekey, len = bytes.len(), "BLTE-decoding fetched frame");
            let decoded = casc_blte::BlteDecoder::new(bytes.as_slice())?.decode_all()?;
            Ok(decoded)
        }
    }
}
