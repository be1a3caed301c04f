//! Key/value configuration files (`BuildConfig`, `CDNConfig`).
//!
//! Lines are `key = value`; blank lines and `#`-comments are skipped. A
//! value is whitespace-separated tokens, each a hex-encoded hash.

use std::collections::HashMap;

use crate::error::{FormatError, Result};
use crate::hash::CascHash;

/// The raw key/value form, before any per-key contract is enforced.
#[derive(Debug, Clone, Default)]
pub struct KvConfig {
    entries: HashMap<String, Vec<String>>,
}

impl KvConfig {
    pub fn parse(input: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| FormatError::BadConfig(format!("malformed line: {line}")))?;
            let tokens = value.split_whitespace().map(str::to_string).collect();
            entries.insert(key.trim().to_string(), tokens);
        }
        Ok(Self { entries })
    }

    pub fn tokens(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn hashes(&self, key: &str) -> Result<Vec<CascHash>> {
        self.tokens(key)
            .unwrap_or_default()
            .iter()
            .map(|tok| {
                CascHash::from_hex(tok)
                    .ok_or_else(|| FormatError::BadConfig(format!("invalid hash for {key}: {tok}")))
            })
            .collect()
    }
}

/// `root` (one content-hash), `encoding` (content-hash + encoded-hash),
/// optional `install`, optional `build-product`.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    pub root_hash: CascHash,
    pub encoding_hashes: Vec<CascHash>,
    pub install_hashes: Vec<CascHash>,
    pub build_product: Option<String>,
}

impl BuildConfig {
    pub fn parse(input: &str) -> Result<Self> {
        let kv = KvConfig::parse(input)?;

        let root_hashes = kv.hashes("root")?;
        let root_hash = match root_hashes.as_slice() {
            [hash] => *hash,
            other => {
                return Err(FormatError::BadConfig(format!(
                    "root must have exactly one token, got {}",
                    other.len()
                )));
            }
        };

        let encoding_hashes = kv.hashes("encoding")?;
        if encoding_hashes.len() != 2 {
            return Err(FormatError::BadConfig(format!(
                "encoding must have exactly two tokens, got {}",
                encoding_hashes.len()
            )));
        }

        let install_hashes = kv.hashes("install")?;
        let build_product = kv
            .tokens("build-product")
            .and_then(|tokens| tokens.first())
            .cloned();

        Ok(Self {
            root_hash,
            encoding_hashes,
            install_hashes,
            build_product,
        })
    }

    /// The content-hash of the encoding file.
    pub fn encoding_content_hash(&self) -> CascHash {
        self.encoding_hashes[0]
    }

    /// The encoded-hash of the encoding file (how it is actually fetched).
    pub fn encoding_encoded_hash(&self) -> CascHash {
        self.encoding_hashes[1]
    }
}

/// `archives` (zero or more encoded-hashes of archive blobs).
#[derive(Debug, Clone)]
pub struct CdnConfig {
    pub archive_hashes: Vec<CascHash>,
}

impl CdnConfig {
    pub fn parse(input: &str) -> Result<Self> {
        let kv = KvConfig::parse(input)?;
        let archive_hashes = kv.hashes("archives")?;
        Ok(Self { archive_hashes })
    }
}
