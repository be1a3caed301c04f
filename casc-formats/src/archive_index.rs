//! CDN archive indices (`<archive-hash>.index`).
//!
//! Each archive blob on the CDN is accompanied by an index mapping the
//! EKeys it contains to their offset and size within the blob. The index
//! is laid out as fixed 4096-byte blocks; a zeroed EKey marks the
//! remainder of a block as padding.

use std::io::Read;

use crate::error::Result;
use crate::hash::CascHash;

const BLOCK_SIZE: usize = 4096;
const ENTRY_SIZE: usize = 16 + 4 + 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveIndexEntry {
    pub ekey: CascHash,
    pub encoded_size: u32,
    pub offset: u32,
}

/// All entries contained in one archive's index, in file order.
#[derive(Debug, Clone, Default)]
pub struct ArchiveIndex {
    entries: Vec<ArchiveIndexEntry>,
}

impl ArchiveIndex {
    pub fn entries(&self) -> &[ArchiveIndexEntry] {
        &self.entries
    }

    pub fn find(&self, ekey: CascHash) -> Option<&ArchiveIndexEntry> {
        self.entries.iter().find(|e| e.ekey == ekey)
    }
}

pub fn parse<R: Read>(mut reader: R) -> Result<ArchiveIndex> {
    let mut entries = Vec::new();
    let mut block = [0u8; BLOCK_SIZE];

    loop {
        let read = read_block(&mut reader, &mut block)?;
        if read == 0 {
            break;
        }

        for chunk in block[..read].chunks_exact(ENTRY_SIZE) {
            let ekey_bytes: [u8; 16] = chunk[0..16].try_into().unwrap();
            if ekey_bytes == [0u8; 16] {
                break; // padding for the remainder of this block
            }
            let encoded_size = u32::from_be_bytes(chunk[16..20].try_into().unwrap());
            let offset = u32::from_be_bytes(chunk[20..24].try_into().unwrap());
            entries.push(ArchiveIndexEntry {
                ekey: CascHash::from(ekey_bytes),
                encoded_size,
                offset,
            });
        }

        if read < BLOCK_SIZE {
            break; // short final block: end of stream
        }
    }

    Ok(ArchiveIndex { entries })
}

/// Reads up to a full block, returning the number of bytes actually read
/// (which may be short only at end of stream).
fn read_block<R: Read>(reader: &mut R, block: &mut [u8; BLOCK_SIZE]) -> Result<usize> {
    let mut filled = 0;
    while filled < BLOCK_SIZE {
        match reader.read(&mut block[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
