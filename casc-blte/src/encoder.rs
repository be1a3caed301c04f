use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write as _;

use crate::header::{BLTE_MAGIC, ChunkInfo};

/// A chunk to be written by [`encode_multi_chunk`], before compression.
pub struct ChunkSpec {
    pub data: Vec<u8>,
    pub compress: bool,
}

/// Build a single-chunk BLTE frame (`header_size = 0`).
pub fn encode_single_chunk(data: &[u8], compress: bool) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&BLTE_MAGIC);
    out.extend_from_slice(&0u32.to_be_bytes());
    if compress {
        out.push(b'Z');
        out.extend_from_slice(&zlib_compress(data));
    } else {
        out.push(b'N');
        out.extend_from_slice(data);
    }
    out
}

/// Build a multi-chunk BLTE frame with a full chunk table.
pub fn encode_multi_chunk(chunks: &[ChunkSpec]) -> Vec<u8> {
    let mut payloads = Vec::with_capacity(chunks.len());
    let mut infos = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        let mut payload = Vec::new();
        if chunk.compress {
            payload.push(b'Z');
            payload.extend_from_slice(&zlib_compress(&chunk.data));
        } else {
            payload.push(b'N');
            payload.extend_from_slice(&chunk.data);
        }
        let checksum = md5::compute(&payload).0;
        infos.push(ChunkInfo {
            compressed_size: payload.len() as u32,
            decompressed_size: chunk.data.len() as u32,
            checksum,
        });
        payloads.push(payload);
    }

    let header_size = 12u32 + 24u32 * chunks.len() as u32;
    let mut out = Vec::new();
    out.extend_from_slice(&BLTE_MAGIC);
    out.extend_from_slice(&header_size.to_be_bytes());
    out.extend_from_slice(&[0u8, 0u8]); // reserved
    out.extend_from_slice(&(chunks.len() as u16).to_be_bytes());
    for info in &infos {
        out.extend_from_slice(&info.compressed_size.to_be_bytes());
        out.extend_from_slice(&info.decompressed_size.to_be_bytes());
        out.extend_from_slice(&info.checksum);
    }
    for payload in payloads {
        out.extend_from_slice(&payload);
    }
    out
}

fn zlib_compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    let _ = encoder.write_all(data);
    encoder.finish().unwrap_or_default()
}
