//! The backend union: presents either concrete backend through one
//! synchronous surface, per the "avoid inheritance, use a tagged variant"
//! guidance this crate's two backend families follow.

use casc_formats::{CancelToken, CascHash, FetchedData};

use crate::error::Result;

/// Either backend. The online backend's `open_data` is genuinely async;
/// bridging it through [`tokio::task::block_in_place`] keeps this type's
/// surface identical to the local backend's, which never performs network
/// I/O. Requires a multi-threaded Tokio runtime (the default for
/// `#[tokio::main]`).
pub enum Backend {
    Online(casc_cdn::OnlineBackend),
    Local(casc_storage::LocalBackend),
}

impl Backend {
    pub fn root_hash(&self) -> CascHash {
        match self {
            Self::Online(backend) => backend.root_hash(),
            Self::Local(backend) => backend.root_hash(),
        }
    }

    pub fn encoded_keys_for(&self, content_hash: CascHash) -> Option<Vec<CascHash>> {
        match self {
            Self::Online(backend) => backend.encoded_keys_for(content_hash).map(<[_]>::to_vec),
            Self::Local(backend) => backend.encoded_keys_for(content_hash).map(<[_]>::to_vec),
        }
    }

    /// Fetch the bytes behind `ekey`. `cancel` is honoured by the online
    /// backend between requests; the local backend ignores it, since a
    /// single file read never runs long enough to need cancelling.
    pub fn open_data(&self, ekey: CascHash, cancel: &CancelToken) -> Result<FetchedData> {
        match self {
            Self::Online(backend) => {
                let fetched = tokio::task::block_in_place(|| {
                    tokio::runtime::Handle::current().block_on(backend.open_data(ekey, cancel))
                })?;
                Ok(fetched)
            }
            Self::Local(backend) => Ok(backend.open_data(ekey)?),
        }
    }
}
