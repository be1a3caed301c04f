//! The World of Warcraft (MNDX) root. Out of scope for this implementation.

use crate::error::{Result, RootError};
use crate::Root;
use casc_formats::CascHash;

/// Constructing a WoW root always fails with `Unsupported`; the format is
/// left as future work.
pub struct WowRoot;

impl WowRoot {
    pub fn new(_root_bytes: &[u8]) -> Result<Self> {
        Err(RootError::Unsupported("WoW MNDX root is not implemented".into()))
    }
}

impl Root for WowRoot {
    /// Unreachable: `WowRoot::new` always returns `Err`, so no instance
    /// of `WowRoot` can ever exist to call this.
    fn files(&self) -> Vec<String> {
        unreachable!("WowRoot cannot be constructed")
    }

    /// Unreachable: `WowRoot::new` always returns `Err`, so no instance
    /// of `WowRoot` can ever exist to call this.
    fn content_hash(&self, _name: &str) -> Result<CascHash> {
        unreachable!("WowRoot cannot be constructed")
    }
}
