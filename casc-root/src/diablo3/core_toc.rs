//! `CoreTOC.dat`: maps a Diablo 3 `sno_id` to its owning group and name.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek, SeekFrom};

use crate::error::{Result, RootError};
use crate::diablo3::sno_table::GROUP_COUNT;

/// `sno_id -> (group_id, name)`.
#[derive(Debug, Clone, Default)]
pub struct CoreToc {
    entries: HashMap<u32, (u32, String)>,
}

impl CoreToc {
    pub fn get(&self, sno_id: u32) -> Option<&(u32, String)> {
        self.entries.get(&sno_id)
    }

    #[cfg(test)]
    pub(crate) fn from_entries_for_test(entries: HashMap<u32, (u32, String)>) -> Self {
        Self { entries }
    }
}

pub fn parse(data: &[u8]) -> Result<CoreToc> {
    let mut cursor = Cursor::new(data);

    let counts = read_u32_array(&mut cursor)?;
    let offsets = read_u32_array(&mut cursor)?;
    let _unknown = read_u32_array(&mut cursor)?;
    let mut trailing = [0u8; 1];
    cursor.read_exact(&mut trailing)?;

    let header_size = cursor.position();

    let mut entries = HashMap::new();
    for (group_id, (&count, &offset)) in counts.iter().zip(offsets.iter()).enumerate() {
        if count == 0 {
            continue;
        }
        let table_start = header_size + u64::from(offset);
        cursor.seek(SeekFrom::Start(table_start))?;

        for _ in 0..count {
            let mut fixed = [0u8; 12];
            cursor.read_exact(&mut fixed)?;
            let entry_group_id = u32::from_le_bytes(fixed[0..4].try_into().unwrap());
            let sno_id = u32::from_le_bytes(fixed[4..8].try_into().unwrap());
            let name_offset = u32::from_le_bytes(fixed[8..12].try_into().unwrap());

            let resume_at = cursor.position();
            let absolute_name_offset =
                header_size + u64::from(offset) + 12 * u64::from(count) + u64::from(name_offset);
            cursor.seek(SeekFrom::Start(absolute_name_offset))?;
            let name = read_asciiz(&mut cursor)?;
            cursor.seek(SeekFrom::Start(resume_at))?;

            entries.insert(sno_id, (entry_group_id, name));
        }
    }

    Ok(CoreToc { entries })
}

fn read_u32_array(cursor: &mut Cursor<&[u8]>) -> Result<[u32; GROUP_COUNT]> {
    let mut out = [0u32; GROUP_COUNT];
    for slot in &mut out {
        let mut buf = [0u8; 4];
        cursor.read_exact(&mut buf)?;
        *slot = u32::from_le_bytes(buf);
    }
    Ok(out)
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
