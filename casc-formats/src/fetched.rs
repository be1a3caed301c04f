//! The shared result shape of a backend's `open_data`.
//!
//! Online and local backends disagree on whether the bytes behind a
//! direct (non-archive) fetch have already been BLTE-decoded — see the
//! content resolver's handling of this asymmetry. Tagging the bytes with
//! their decode state lets the resolver apply exactly one decode step,
//! regardless of which backend produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedData {
    /// Raw bytes that still need BLTE decoding.
    Encoded(Vec<u8>),
    /// Bytes the backend has already BLTE-decoded internally.
    Decoded(Vec<u8>),
}

impl FetchedData {
    pub fn into_inner(self) -> Vec<u8> {
        match self {
            Self::Encoded(bytes) | Self::Decoded(bytes) => bytes,
        }
    }
}
