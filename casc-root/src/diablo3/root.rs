//! Assembles the top root blob, directory blobs, and the two name-synthesis
//! helper files into a flat `filename -> content-hash` map.

use std::collections::HashMap;

use casc_formats::CascHash;

use crate::diablo3::blob::{self, DirectoryBlob, TopRootEntry};
use crate::diablo3::core_toc::{self, CoreToc};
use crate::diablo3::packages::{self, Packages};
use crate::diablo3::sno_table::group_name_and_ext;
use crate::error::{Result, RootError};
use crate::{normalize_path, Root};

const SKIPPED_DIRECTORIES: [&str; 2] = ["Windows", "Mac"];

pub struct Diablo3Root {
    entries: HashMap<String, CascHash>,
}

impl Diablo3Root {
    /// Build the root from the top root blob's raw bytes, using `fetch` to
    /// retrieve any other content-hash (directory blobs, `CoreTOC.dat`,
    /// `Packages.dat`) as already-decoded logical bytes. `fetch` is an
    /// explicit dependency, not a back-reference to a backend type.
    pub fn new<F>(top_root_bytes: &[u8], fetch: F) -> Result<Self>
    where
        F: Fn(CascHash) -> Result<Vec<u8>>,
    {
        let top_entries = blob::parse_top_root(top_root_bytes)?;

        let base_entry = find_entry(&top_entries, "Base")
            .ok_or_else(|| RootError::NotFound("Base directory".into()))?;
        let base_blob = blob::parse_directory(&fetch(base_entry.content_hash)?)?;

        let core_toc = load_core_toc(&base_blob, &fetch)?;
        let packages = load_packages(&base_blob, &fetch)?;

        let mut entries = HashMap::new();
        for top in &top_entries {
            if SKIPPED_DIRECTORIES.contains(&top.name.as_str()) {
                continue;
            }

            let dir_blob = match fetch(top.content_hash) {
                Ok(bytes) => blob::parse_directory(&bytes)?,
                Err(RootError::NotFound(_) | RootError::Fetch(_)) => continue,
                Err(err) => return Err(err),
            };

            synthesize(&top.name, &dir_blob, &core_toc, &packages, &mut entries);
        }

        Ok(Self { entries })
    }
}

impl Root for Diablo3Root {
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

fn find_entry<'a>(entries: &'a [TopRootEntry], name: &str) -> Option<&'a TopRootEntry> {
    entries.iter().find(|e| e.name == name)
}

fn load_core_toc<F>(base: &DirectoryBlob, fetch: &F) -> Result<CoreToc>
where
    F: Fn(CascHash) -> Result<Vec<u8>>,
{
    let hash = base
        .named
        .iter()
        .find(|n| n.name == "CoreTOC.dat")
        .map(|n| n.content_hash)
        .ok_or_else(|| RootError::NotFound("CoreTOC.dat".into()))?;
    core_toc::parse(&fetch(hash)?)
}

fn load_packages<F>(base: &DirectoryBlob, fetch: &F) -> Result<Packages>
where
    F: Fn(CascHash) -> Result<Vec<u8>>,
{
    match base.named.iter().find(|n| n.name.ends_with("Packages.dat")) {
        Some(entry) => packages::parse(&fetch(entry.content_hash)?),
        None => Ok(Packages::default()),
    }
}

fn synthesize(
    dir_name: &str,
    dir: &DirectoryBlob,
    core_toc: &CoreToc,
    packages: &Packages,
    entries: &mut HashMap<String, CascHash>,
) {
    for asset in &dir.assets {
        let Some((group_id, name)) = core_toc.get(asset.sno_id) else {
            continue;
        };
        let (group_name, ext) = group_name_and_ext(*group_id);
        let synthesised = normalize_path(&format!("{dir_name}/{group_name}/{name}.{ext}"));
        entries.insert(synthesised, asset.content_hash);
    }

    for asset_idx in &dir.asset_indices {
        let Some((group_id, name)) = core_toc.get(asset_idx.sno_id) else {
            continue;
        };
        let (group_name, default_ext) = group_name_and_ext(*group_id);
        let sub_path = format!("{group_name}/{name}/{:04}", asset_idx.file_index);
        let ext = packages
            .extension_override(&sub_path)
            .map(str::to_string)
            .unwrap_or(default_ext);
        let synthesised = normalize_path(&format!("{dir_name}/{sub_path}.{ext}"));
        entries.insert(synthesised, asset_idx.content_hash);
    }

    for named in &dir.named {
        let synthesised = normalize_path(&format!("{dir_name}/{}", named.name));
        entries.insert(synthesised, named.content_hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diablo3::blob::{AssetEntry, AssetIdxEntry, NamedEntry};

    #[test]
    fn synthesises_asset_and_asset_idx_names() {
        let mut core_toc_entries = HashMap::new();
        core_toc_entries.insert(42u32, (6u32, "MyAnim".to_string()));
        let core_toc = CoreToc::from_entries_for_test(core_toc_entries);

        let mut overrides = HashMap::new();
        overrides.insert("Anim/MyAnim/0003".to_string(), "ogg".to_string());
        let packages = Packages::from_overrides_for_test(overrides);

        let dir = DirectoryBlob {
            assets: vec![AssetEntry {
                content_hash: CascHash::from([0x11; 16]),
                sno_id: 42,
            }],
            asset_indices: vec![AssetIdxEntry {
                content_hash: CascHash::from([0x22; 16]),
                sno_id: 42,
                file_index: 3,
            }],
            named: vec![NamedEntry {
                content_hash: CascHash::from([0x33; 16]),
                name: "loose.txt".to_string(),
            }],
        };

        let mut entries = HashMap::new();
        synthesize("Base", &dir, &core_toc, &packages, &mut entries);

        assert_eq!(entries.get("Base/Anim/MyAnim.ani"), Some(&CascHash::from([0x11; 16])));
        assert_eq!(
            entries.get("Base/Anim/MyAnim/0003.ogg"),
            Some(&CascHash::from([0x22; 16]))
        );
        assert_eq!(entries.get("Base/loose.txt"), Some(&CascHash::from([0x33; 16])));
    }
}
