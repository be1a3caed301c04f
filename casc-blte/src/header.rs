use std::io::Read;

use crate::error::{BlteError, Result};

pub const BLTE_MAGIC: [u8; 4] = *b"BLTE";

/// One entry of the chunk table: sizes and the expected payload checksum.
#[derive(Debug, Clone, Copy)]
pub struct ChunkInfo {
    pub compressed_size: u32,
    pub decompressed_size: u32,
    pub checksum: [u8; 16],
}

/// Parsed BLTE frame header.
#[derive(Debug)]
pub enum BlteHeader {
    /// `header_size` was zero: the rest of the stream is one chunk with no
    /// declared sizes and no checksum.
    SingleChunkNoHeader,
    /// `header_size` was non-zero: a chunk table follows the preamble.
    Chunked(Vec<ChunkInfo>),
}

impl BlteHeader {
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut magic = [0u8; 4];
        read_exact_or_truncated(reader, &mut magic)?;
        if magic != BLTE_MAGIC {
            return Err(BlteError::BadSignature);
        }

        let header_size = read_u32_be(reader)?;
        if header_size == 0 {
            return Ok(Self::SingleChunkNoHeader);
        }

        let mut reserved = [0u8; 2];
        read_exact_or_truncated(reader, &mut reserved)?;
        let count = read_u16_be(reader)?;

        let expected = 12u32 + 24u32 * u32::from(count);
        if header_size != expected {
            return Err(BlteError::BadHeaderSize {
                declared: header_size,
                count,
            });
        }

        let mut chunks = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let compressed_size = read_u32_be(reader)?;
            let decompressed_size = read_u32_be(reader)?;
            let mut checksum = [0u8; 16];
            read_exact_or_truncated(reader, &mut checksum)?;
            chunks.push(ChunkInfo {
                compressed_size,
                decompressed_size,
                checksum,
            });
        }
        Ok(Self::Chunked(chunks))
    }
}

fn read_exact_or_truncated<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            BlteError::TruncatedInput
        } else {
            BlteError::Io(e)
        }
    })
}

fn read_u32_be<R: Read>(reader: &mut R) -> Result<u32> {
    let mut b = [0u8; 4];
    read_exact_or_truncated(reader, &mut b)?;
    Ok(u32::from_be_bytes(b))
}

fn read_u16_be<R: Read>(reader: &mut R) -> Result<u16> {
    let mut b = [0u8; 2];
    read_exact_or_truncated(reader, &mut b)?;
    Ok(u16::from_be_bytes(b))
}
