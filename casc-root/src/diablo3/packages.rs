//! `Data_D3/PC/Misc/Packages.dat`: per-asset extension overrides.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use crate::error::{Result, RootError};

const SIGNATURE: u32 = 0xAABB_0002;

/// Synthesised-name-minus-extension -> override extension.
#[derive(Debug, Clone, Default)]
pub struct Packages {
    overrides: HashMap<String, String>,
}

impl Packages {
    pub fn extension_override(&self, key: &str) -> Option<&str> {
        self.overrides.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn from_overrides_for_test(overrides: HashMap<String, String>) -> Self {
        Self { overrides }
    }
}

pub fn parse(data: &[u8]) -> Result<Packages> {
    let mut cursor = Cursor::new(data);

    let mut sig_buf = [0u8; 4];
    cursor.read_exact(&mut sig_buf)?;
    let signature = u32::from_le_bytes(sig_buf);
    if signature != SIGNATURE {
        return Err(RootError::InvalidMagic(signature));
    }

    let mut count_buf = [0u8; 4];
    cursor.read_exact(&mut count_buf)?;
    let count = u32::from_le_bytes(count_buf);

    let mut overrides = HashMap::new();
    for _ in 0..count {
        let name = read_asciiz(&mut cursor)?;
        if name.len() <= 4 {
            continue;
        }
        let split = name.len() - 4;
        let (key, ext) = name.split_at(split);
        let ext = ext.trim_start_matches('.');
        overrides.insert(key.to_string(), ext.to_string());
    }

    Ok(Packages { overrides })
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
