//! The Diablo 3 root: a three-level tree of binary blobs synthesising
//! filenames from SNO ids rather than storing them directly.

pub mod blob;
pub mod core_toc;
pub mod packages;
pub mod root;
pub mod sno_table;

pub use root::Diablo3Root;
