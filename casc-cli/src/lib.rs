//! Shared helpers for the `casc-extract` and `blte` binaries.

pub mod pattern;
