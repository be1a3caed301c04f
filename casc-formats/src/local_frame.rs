//! The 30-byte frame header prefixing a BLTE frame inside `data.NNN`.

use std::io::Read;

use crate::error::{FormatError, Result};
use crate::hash::CascHash;

pub const FRAME_HEADER_SIZE: usize = 30;

#[derive(Debug, Clone)]
pub struct LocalFrameHeader {
    pub encoded_key: CascHash,
    pub size_with_header: u32,
    pub checksum_a: u32,
    pub checksum_b: u32,
}

impl LocalFrameHeader {
    /// Size of the BLTE payload that follows this header.
    pub fn payload_size(&self) -> Result<usize> {
        (self.size_with_header as usize)
            .checked_sub(FRAME_HEADER_SIZE)
            .ok_or_else(|| FormatError::Corrupt("frame size smaller than header".into()))
    }
}

/// Read the frame header and verify it matches `expected_ekey`.
pub fn read_and_verify<R: Read>(mut reader: R, expected_ekey: CascHash) -> Result<LocalFrameHeader> {
    let mut bytes = [0u8; FRAME_HEADER_SIZE];
    reader.read_exact(&mut bytes)?;

    let mut reversed = [0u8; 16];
    reversed.copy_from_slice(&bytes[0..16]);
    reversed.reverse();
    let encoded_key = CascHash::from(reversed);

    if encoded_key != expected_ekey {
        return Err(FormatError::Corrupt(format!(
            "local frame header key {} does not match requested {}",
            encoded_key.to_hex(),
            expected_ekey.to_hex()
        )));
    }

    let size_with_header = u32::from_le_bytes(bytes[16..20].try_into().unwrap());
    let checksum_a = u32::from_be_bytes(bytes[22..26].try_into().unwrap());
    let checksum_b = u32::from_be_bytes(bytes[26..30].try_into().unwrap());

    Ok(LocalFrameHeader {
        encoded_key,
        size_with_header,
        checksum_a,
        checksum_b,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header(ekey: [u8; 16], size_with_header: u32) -> Vec<u8> {
        let mut reversed = ekey;
        reversed.reverse();
        let mut bytes = reversed.to_vec();
        bytes.extend_from_slice(&size_with_header.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 2]); // unknown/flags
        bytes.extend_from_slice(&0xDEADBEEFu32.to_be_bytes());
        bytes.extend_from_slice(&0xCAFEBABEu32.to_be_bytes());
        bytes
    }

    #[test]
    fn matching_ekey_parses() {
        let ekey = [0x42u8; 16];
        let bytes = sample_header(ekey, 130);
        let header = read_and_verify(bytes.as_slice(), CascHash::from(ekey)).expect("valid header");
        assert_eq!(header.payload_size().unwrap(), 100);
    }

    #[test]
    fn mismatched_ekey_is_corrupt() {
        let bytes = sample_header([0x42u8; 16], 130);
        let err = read_and_verify(bytes.as_slice(), CascHash::from([0x99u8; 16])).unwrap_err();
        assert!(matches!(err, FormatError::Corrupt(_)));
    }
}
