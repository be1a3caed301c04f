//! The encoding table: the global `CKey -> [EKey, ...]` map.
//!
//! Parsing streams page by page: only one page (`ckey_page_size_kb`
//! kilobytes) is ever buffered at a time, never the whole table.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use binrw::BinRead;

use crate::error::{FormatError, Result};
use crate::hash::CascHash;

#[derive(Debug, Clone, BinRead)]
#[br(big, magic = b"EN")]
struct EncodingHeader {
    version: u8,
    chash_size: u8,
    ehash_size: u8,
    cpage_size_kb: u16,
    epage_size_kb: u16,
    cpage_count: u32,
    epage_count: u32,
    unk: u8,
    espec_block_size: u32,
}

const HEADER_LEN: usize = 22;

/// The parsed `CKey -> [EKey, ...]` mapping. The EPage section is skipped
/// entirely; only the CKey-indexed pages are required by the content
/// resolver.
#[derive(Debug, Clone, Default)]
pub struct EncodingTable {
    entries: HashMap<CascHash, Vec<CascHash>>,
}

impl EncodingTable {
    pub fn encoded_keys_for(&self, content_hash: CascHash) -> Option<&[CascHash]> {
        self.entries.get(&content_hash).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse<R: Read>(mut reader: R) -> Result<EncodingTable> {
    let mut header_bytes = [0u8; HEADER_LEN];
    reader
        .read_exact(&mut header_bytes)
        .map_err(|_| FormatError::BadSignature)?;
    let header = EncodingHeader::read(&mut Cursor::new(&header_bytes[..]))
        .map_err(|_| FormatError::BadSignature)?;

    // The espec block sits between the header and the CKey page index;
    // it is not needed for CKey -> EKey resolution.
    skip(&mut reader, header.espec_block_size as usize)?;

    let mut page_index = Vec::with_capacity(header.cpage_count as usize);
    for _ in 0..header.cpage_count {
        let mut first_hash = vec![0u8; header.chash_size as usize];
        reader.read_exact(&mut first_hash)?;
        let mut checksum = [0u8; 16];
        reader.read_exact(&mut checksum)?;
        page_index.push(checksum);
    }

    let page_size = header.cpage_size_kb as usize * 1024;
    let mut entries = HashMap::new();
    for checksum in page_index {
        let mut page = vec![0u8; page_size];
        reader.read_exact(&mut page)?;

        let digest = md5::compute(&page).0;
        if digest != checksum {
            return Err(FormatError::ChecksumMismatch);
        }

        parse_ckey_page(&page, header.chash_size, header.ehash_size, &mut entries)?;
    }

    Ok(EncodingTable { entries })
}

fn parse_ckey_page(
    page: &[u8],
    chash_size: u8,
    ehash_size: u8,
    entries: &mut HashMap<CascHash, Vec<CascHash>>,
) -> Result<()> {
    let chash_size = chash_size as usize;
    let ehash_size = ehash_size as usize;
    let mut pos = 0;

    while pos + 2 <= page.len() {
        let key_count = u16::from_le_bytes([page[pos], page[pos + 1]]);
        if key_count == 0 {
            break; // page padding
        }
        pos += 2;

        if pos + 4 > page.len() {
            return Err(FormatError::Corrupt("truncated encoding page entry".into()));
        }
        let _file_size = u32::from_be_bytes(page[pos..pos + 4].try_into().unwrap());
        pos += 4;

        if pos + chash_size > page.len() {
            return Err(FormatError::Corrupt("truncated encoding page ckey".into()));
        }
        let ckey = to_hash(&page[pos..pos + chash_size])?;
        pos += chash_size;

        let mut ekeys = Vec::with_capacity(key_count as usize);
        for _ in 0..key_count {
            if pos + ehash_size > page.len() {
                return Err(FormatError::Corrupt("truncated encoding page ekey".into()));
            }
            ekeys.push(to_hash(&page[pos..pos + ehash_size])?);
            pos += ehash_size;
        }

        entries.entry(ckey).or_insert(ekeys);
    }
    Ok(())
}

fn to_hash(bytes: &[u8]) -> Result<CascHash> {
    let arr: [u8; 16] = bytes
        .try_into()
        .map_err(|_| FormatError::Corrupt("hash is not 16 bytes".into()))?;
    Ok(CascHash::from(arr))
}

fn skip<R: Read>(reader: &mut R, mut n: usize) -> Result<()> {
    let mut buf = [0u8; 4096];
    while n > 0 {
        let take = n.min(buf.len());
        reader.read_exact(&mut buf[..take])?;
        n -= take;
    }
    Ok(())
}
