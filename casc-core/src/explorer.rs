//! The explorer facade: binds exactly one backend to exactly one
//! title-specific root adapter, both immutable after construction.

use casc_formats::CancelToken;
use casc_root::diablo3::Diablo3Root;
use casc_root::text_line::TextLineRoot;
use casc_root::wow::WowRoot;
use casc_root::Root;
use casc_storage::Title;

use crate::backend::Backend;
use crate::error::Result;
use crate::resolver;

pub struct Explorer {
    backend: Backend,
    root: Box<dyn Root + Send + Sync>,
}

impl Explorer {
    /// Detect the root's content-hash from `backend`, fetch and decode it,
    /// and build the root adapter for `title`.
    pub fn open(backend: Backend, title: Title) -> Result<Self> {
        let cancel = CancelToken::new();
        let root_bytes = resolver::extract(&backend, backend.root_hash(), &cancel)?;

        let root: Box<dyn Root + Send + Sync> = match title {
            Title::Diablo3 => {
                let fetch = |hash| {
                    resolver::extract(&backend, hash, &cancel)
                        .map_err(|err| casc_root::RootError::Fetch(err.to_string()))
                };
                Box::new(Diablo3Root::new(&root_bytes, fetch)?)
            }
            Title::StarCraft1 | Title::Warcraft3 => Box::new(TextLineRoot::parse(&root_bytes)?),
            Title::Wow => Box::new(WowRoot::new(&root_bytes)?),
        };

        Ok(Self { backend, root })
    }

    /// A sorted, deduplicated listing of every known filename.
    pub fn files(&self) -> Vec<String> {
        self.root.files()
    }

    /// Resolve `name` to its content-hash via the root adapter, then fetch
    /// and decode its bytes through the content resolver.
    pub fn extract(&self, name: &str) -> Result<Vec<u8>> {
        let cancel = CancelToken::new();
        let content_hash = self.root.content_hash(name)?;
        resolver::extract(&self.backend, content_hash, &cancel)
    }
}
