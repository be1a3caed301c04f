//! Title-specific root adapters.
//!
//! A root is the per-title map from a logical filename to its content-hash
//! (CKey). Every title here implements the same small capability —
//! [`Root::files`] and [`Root::content_hash`] — over a format that is
//! otherwise completely title-specific: a flat pipe-delimited listing for
//! StarCraft 1/Warcraft 3, and a three-level binary tree of blobs for
//! Diablo 3.
//!
//! ```no_run
//! use casc_root::{Root, text_line::TextLineRoot};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("root")?;
//! let root = TextLineRoot::parse(&bytes)?;
//! for name in root.files() {
//!     let _hash = root.content_hash(&name)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod diablo3;
pub mod error;
pub mod text_line;
pub mod wow;

use casc_formats::CascHash;
pub use error::{Result, RootError};

/// The capability every title-specific root implements.
pub trait Root {
    /// A sorted, deduplicated listing of every known filename.
    fn files(&self) -> Vec<String>;

    /// The content-hash for `name`, or `NotFound`.
    fn content_hash(&self, name: &str) -> Result<CascHash>;
}

/// Replace `\` with `/` and collapse consecutive separators.
///
/// Every root stores paths with whatever separator its source platform
/// used; callers must never see a `\` or a doubled `/`.
pub fn normalize_path(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_sep = false;
    for ch in raw.chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' {
            if last_was_sep {
                continue;
            }
            last_was_sep = true;
        } else {
            last_was_sep = false;
        }
        out.push(ch);
    }
    out
}
