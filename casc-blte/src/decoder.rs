use std::io::{Cursor, Read};

use flate2::read::ZlibDecoder;

use crate::error::{BlteError, Result};
use crate::header::{BlteHeader, ChunkInfo};

const STORED: u8 = b'N';
const ZLIB: u8 = b'Z';

#[derive(Debug)]
enum Mode {
    SingleChunkNoHeader { consumed: bool },
    Chunked { chunks: Vec<ChunkInfo>, next: usize },
}

/// Lazily decodes a BLTE frame as it is read.
///
/// Each call to [`Read::read`] decodes at most one chunk's worth of payload
/// into an internal buffer before handing bytes back to the caller; the
/// frame as a whole is never materialised in memory.
#[derive(Debug)]
pub struct BlteDecoder<R> {
    reader: R,
    mode: Mode,
    current: Option<Cursor<Vec<u8>>>,
}

impl<R: Read> BlteDecoder<R> {
    pub fn new(mut reader: R) -> Result<Self> {
        let header = BlteHeader::read(&mut reader)?;
        let mode = match header {
            BlteHeader::SingleChunkNoHeader => Mode::SingleChunkNoHeader { consumed: false },
            BlteHeader::Chunked(chunks) => Mode::Chunked { chunks, next: 0 },
        };
        Ok(Self {
            reader,
            mode,
            current: None,
        })
    }

    /// Decode the entire frame into a single buffer. Convenience wrapper
    /// around the streaming [`Read`] implementation for callers (such as
    /// the archive-index and root parsers) that buffer freely.
    pub fn decode_all(self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut this = self;
        this.read_to_end(&mut out)?;
        Ok(out)
    }

    fn advance(&mut self) -> Result<bool> {
        match &mut self.mode {
            Mode::SingleChunkNoHeader { consumed } => {
                if *consumed {
                    return Ok(false);
                }
                *consumed = true;
                let mut payload = Vec::new();
                self.reader.read_to_end(&mut payload)?;
                if payload.is_empty() {
                    return Ok(false);
                }
                let tag = payload[0];
                let body = &payload[1..];
                let decoded = decode_payload(tag, body)?;
                self.current = Some(Cursor::new(decoded));
                Ok(true)
            }
            Mode::Chunked { chunks, next } => {
                if *next >= chunks.len() {
                    return Ok(false);
                }
                let info = chunks[*next];
                *next += 1;

                if info.compressed_size == 0 {
                    return Err(BlteError::TruncatedInput);
                }
                let mut raw = vec![0u8; info.compressed_size as usize];
                self.reader.read_exact(&mut raw).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::UnexpectedEof {
                        BlteError::TruncatedInput
                    } else {
                        BlteError::Io(e)
                    }
                })?;

                let digest = md5::compute(&raw);
                if digest.0 != info.checksum {
                    return Err(BlteError::ChecksumMismatch);
                }

                let tag = raw[0];
                let body = &raw[1..];
                if tag == STORED && body.len() as u64 != u64::from(info.decompressed_size) {
                    return Err(BlteError::CompressedSizeMismatch);
                }
                let decoded = decode_payload(tag, body)?;
                if decoded.len() as u64 != u64::from(info.decompressed_size) {
                    return Err(BlteError::UncompressedSizeMismatch {
                        expected: info.decompressed_size,
                        actual: decoded.len(),
                    });
                }
                self.current = Some(Cursor::new(decoded));
                Ok(true)
            }
        }
    }
}

fn decode_payload(tag: u8, body: &[u8]) -> Result<Vec<u8>> {
    match tag {
        STORED => Ok(body.to_vec()),
        ZLIB => {
            let mut decoder = ZlibDecoder::new(body);
            let mut out = Vec::new();
            decoder
                .read_to_end(&mut out)
                .map_err(|e| BlteError::ZlibError(e.to_string()))?;
            Ok(out)
        }
        other => Err(BlteError::UnknownChunkType(other)),
    }
}

impl<R: Read> Read for BlteDecoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            if let Some(cur) = &mut self.current {
                let n = cur.read(buf)?;
                if n > 0 {
                    return Ok(n);
                }
                self.current = None;
            }
            match self.advance() {
                Ok(true) => continue,
                Ok(false) => return Ok(0),
                Err(e) => return Err(std::io::Error::other(e)),
            }
        }
    }
}
