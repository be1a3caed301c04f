//! Parsers for the two binary blob shapes in the Diablo 3 root tree.

use std::io::{Cursor, Read};

use casc_formats::CascHash;

use crate::error::{Result, RootError};

const TOP_ROOT_SIGNATURE: u32 = 0x8007_D0C4;
const DIRECTORY_SIGNATURE: u32 = 0xEAF1_FE87;

/// One entry of the top root blob: a directory name and the content-hash
/// of its directory blob.
#[derive(Debug, Clone)]
pub struct TopRootEntry {
    pub content_hash: CascHash,
    pub name: String,
}

pub fn parse_top_root(data: &[u8]) -> Result<Vec<TopRootEntry>> {
    let mut cursor = Cursor::new(data);
    let signature = read_u32(&mut cursor)?;
    if signature != TOP_ROOT_SIGNATURE {
        return Err(RootError::InvalidMagic(signature));
    }
    let count = read_u32(&mut cursor)?;

    let mut entries = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let content_hash = read_hash(&mut cursor)?;
        let name = read_asciiz(&mut cursor)?;
        entries.push(TopRootEntry { content_hash, name });
    }
    Ok(entries)
}

#[derive(Debug, Clone)]
pub struct AssetEntry {
    pub content_hash: CascHash,
    pub sno_id: u32,
}

#[derive(Debug, Clone)]
pub struct AssetIdxEntry {
    pub content_hash: CascHash,
    pub sno_id: u32,
    pub file_index: u32,
}

#[derive(Debug, Clone)]
pub struct NamedEntry {
    pub content_hash: CascHash,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryBlob {
    pub assets: Vec<AssetEntry>,
    pub asset_indices: Vec<AssetIdxEntry>,
    pub named: Vec<NamedEntry>,
}

pub fn parse_directory(data: &[u8]) -> Result<DirectoryBlob> {
    let mut cursor = Cursor::new(data);
    let signature = read_u32(&mut cursor)?;
    if signature != DIRECTORY_SIGNATURE {
        return Err(RootError::InvalidMagic(signature));
    }

    let asset_count = read_u32(&mut cursor)?;
    let mut assets = Vec::with_capacity(asset_count as usize);
    for _ in 0..asset_count {
        let content_hash = read_hash(&mut cursor)?;
        let sno_id = read_u32(&mut cursor)?;
        assets.push(AssetEntry { content_hash, sno_id });
    }

    let asset_idx_count = read_u32(&mut cursor)?;
    let mut asset_indices = Vec::with_capacity(asset_idx_count as usize);
    for _ in 0..asset_idx_count {
        let content_hash = read_hash(&mut cursor)?;
        let sno_id = read_u32(&mut cursor)?;
        let file_index = read_u32(&mut cursor)?;
        asset_indices.push(AssetIdxEntry {
            content_hash,
            sno_id,
            file_index,
        });
    }

    let named_count = read_u32(&mut cursor)?;
    let mut named = Vec::with_capacity(named_count as usize);
    for _ in 0..named_count {
        let content_hash = read_hash(&mut cursor)?;
        let name = read_asciiz(&mut cursor)?;
        named.push(NamedEntry { content_hash, name });
    }

    Ok(DirectoryBlob {
        assets,
        asset_indices,
        named,
    })
}

fn read_u32(cursor: &mut Cursor<&[u8]>) -> Result<u32> {
    let mut buf = [0u8; 4];
    cursor.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_hash(cursor: &mut Cursor<&[u8]>) -> Result<CascHash> {
    let mut buf = [0u8; 16];
    cursor.read_exact(&mut buf)?;
    Ok(CascHash::from(buf))
}

fn read_asciiz(cursor: &mut Cursor<&[u8]>) -> Result<String> {
    let mut bytes = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        cursor.read_exact(&mut byte)?;
        if byte[0] == 0 {
            break;
        }
        bytes.push(byte[0]);
    }
    String::from_utf8(bytes).map_err(|e| RootError::Truncated(format!("invalid name: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_top_root_blob() {
        let mut data = Vec::new();
        data.extend_from_slice(&TOP_ROOT_SIGNATURE.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&[0x11; 16]);
        data.extend_from_slice(b"Base\0");

        let entries = parse_top_root(&data).expect("valid top root");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Base");
    }

    #[test]
    fn parses_directory_blob() {
        let mut data = Vec::new();
        data.extend_from_slice(&DIRECTORY_SIGNATURE.to_le_bytes());
        data.extend_from_slice(&1u32.to_le_bytes()); // asset count
        data.extend_from_slice(&[0x22; 16]);
        data.extend_from_slice(&42u32.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes()); // asset idx count
        data.extend_from_slice(&1u32.to_le_bytes()); // named count
        data.extend_from_slice(&[0x33; 16]);
        data.extend_from_slice(b"CoreTOC.dat\0");

        let blob = parse_directory(&data).expect("valid directory blob");
        assert_eq!(blob.assets.len(), 1);
        assert_eq!(blob.assets[0].sno_id, 42);
        assert_eq!(blob.named[0].name, "CoreTOC.dat");
    }
}
