//! Bucket derivation and the per-bucket `.idx` entry list.

use std::fs;
use std::path::Path;

use casc_formats::local_idx::{self, LocalIdxEntry};

use crate::error::Result;

pub const BUCKET_COUNT: usize = 16;

/// The bucket id `0..16` that an encoded-hash's entry lives in.
pub fn bucket_for(ekey: &[u8; 16]) -> u8 {
    let t = ekey[0..9].iter().fold(0u8, |acc, b| acc ^ b);
    (t & 0x0F) ^ (t >> 4)
}

/// All `.idx` entries, grouped by bucket, with the freshest `.idx` file's
/// entries for a key taking precedence (via the descending-filename scan
/// order plus first-match-wins lookup).
#[derive(Debug, Default)]
pub struct BucketTable {
    buckets: [Vec<LocalIdxEntry>; BUCKET_COUNT],
}

impl BucketTable {
    /// Load every `.idx` file directly under `data_dir`, newest filename
    /// first, deriving each file's bucket from the hex digit at position 1
    /// of its name.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let mut idx_files: Vec<_> = fs::read_dir(data_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("idx")))
            .collect();
        idx_files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        let mut table = Self::default();
        for path in idx_files {
            let Some(bucket) = bucket_from_filename(&path) else {
                continue;
            };
            let bytes = fs::read(&path)?;
            let entries = local_idx::parse(bytes.as_slice())?;
            table.buckets[bucket as usize].extend(entries);
        }
        Ok(table)
    }

    /// The first entry in `ekey`'s bucket whose key prefix matches.
    pub fn find(&self, ekey: &[u8; 16]) -> Option<&LocalIdxEntry> {
        let bucket = bucket_for(ekey);
        self.buckets[bucket as usize].iter().find(|e| e.matches(ekey))
    }
}

fn bucket_from_filename(path: &Path) -> Option<u8> {
    let stem = path.file_stem()?.to_str()?;
    let digit = stem.chars().nth(1)?;
    digit.to_digit(16).map(|d| d as u8)
}
