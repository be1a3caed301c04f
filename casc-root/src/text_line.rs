//! The StarCraft 1 / Warcraft 3 root: one `path|hexhash[|...]` line per file.

use std::collections::HashMap;

use casc_formats::CascHash;

use crate::error::{Result, RootError};
use crate::{normalize_path, Root};

/// A flat, line-oriented root. Lines are `path|hexhash`, with any further
/// pipe-delimited fields ignored. Blank lines are skipped.
#[derive(Debug, Clone, Default)]
pub struct TextLineRoot {
    entries: HashMap<String, CascHash>,
}

impl TextLineRoot {
    pub fn parse(data: &[u8]) -> Result<Self> {
        let text = String::from_utf8_lossy(data);
        let mut entries = HashMap::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('|');
            let path = fields
                .next()
                .ok_or_else(|| RootError::Truncated("missing path field".into()))?;
            let hex = fields
                .next()
                .ok_or_else(|| RootError::Truncated(format!("missing hash field: {line}")))?;
            let hash = CascHash::from_hex(hex)
                .ok_or_else(|| RootError::Truncated(format!("invalid hash: {hex}")))?;

            entries.insert(normalize_path(path), hash);
        }

        Ok(Self { entries })
    }
}

impl Root for TextLineRoot {
    fn files(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names.dedup();
        names
    }

    fn content_hash(&self, name: &str) -> Result<CascHash> {
        self.entries
            .get(&normalize_path(name))
            .copied()
            .ok_or_else(|| RootError::NotFound(name.to_string()))
    }
}
