//! The local backend: mounts an install directory and serves content
//! directly out of its `.idx`/`data.NNN` files.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use casc_formats::config::BuildConfig;
use casc_formats::encoding::EncodingTable;
use casc_formats::{CascHash, FetchedData};

use crate::build_info::select_entry;
use crate::bucket::BucketTable;
use crate::error::{Result, StorageError};
use crate::title::Title;

pub struct LocalBackend {
    data_dir: PathBuf,
    build_config: BuildConfig,
    buckets: BucketTable,
    encoding: EncodingTable,
}

impl LocalBackend {
    /// Mount `install_root`, detecting the title from its marker files.
    pub fn open(install_root: &Path) -> Result<Self> {
        let title = Title::detect(install_root)?;
        tracing::debug!(title = title.code(), path = %install_root.display(), "detected title");

        let build_info_text = std::fs::read_to_string(install_root.join(".build.info"))?;
        let entry = select_entry(&build_info_text, title)?;

        let config_path = hash_shard_path(install_root, "config", &entry.build_config_hash.to_hex());
        let build_config_text = std::fs::read_to_string(&config_path)?;
        let build_config = BuildConfig::parse(&build_config_text)?;

        let data_dir = install_root.join("Data").join("data");
        let buckets = BucketTable::load(&data_dir)?;

        let encoding_raw = read_frame(&data_dir, &buckets, build_config.encoding_encoded_hash())?;
        let encoding = casc_formats::encoding::parse(encoding_raw.as_slice())?;
        tracing::info!(install = %install_root.display(), "opened local installation");

        Ok(Self {
            data_dir,
            build_config,
            buckets,
            encoding,
        })
    }

    pub fn root_hash(&self) -> CascHash {
        self.build_config.root_hash
    }

    pub fn encoded_keys_for(&self, content_hash: CascHash) -> Option<&[CascHash]> {
        self.encoding.encoded_keys_for(content_hash)
    }

    /// Read the bytes behind `ekey`. Local storage BLTE-decodes its frames
    /// itself, relative to the online backend, so this always returns
    /// [`FetchedData::Decoded`].
    pub fn open_data(&self, ekey: CascHash) -> Result<FetchedData> {
        let payload = read_frame(&self.data_dir, &self.buckets, ekey)?;
        Ok(FetchedData::Decoded(payload))
    }
}

/// Read the local frame at `ekey`'s indexed offset, strip its 30-byte local
/// header, and BLTE-decode the remainder. Every local frame is BLTE-framed,
/// including the encoding blob fetched during [`LocalBackend::open`], so the
/// decode happens once here rather than at each call site.
fn read_frame(data_dir: &Path, buckets: &BucketTable, ekey: CascHash) -> Result<Vec<u8>> {
    let key_bytes = *ekey.as_bytes();
    let entry = buckets.find(&key_bytes).ok_or_else(|| {
        tracing::warn!(ekey = %ekey, "no local index entry for encoded key");
        StorageError::NotFound(ekey.to_hex())
    })?;

    let data_path = data_dir.join(format!("data.{:03}", entry.data_file_index));
    let mut file = File::open(&data_path)?;
    file.seek(SeekFrom::Start(u64::from(entry.offset)))?;

    casc_formats::local_frame::read_and_verify(&mut file, ekey)?;
    let payload_size = (entry.size as usize)
        .checked_sub(casc_formats::local_frame::FRAME_HEADER_SIZE)
        .ok_or_else(|| StorageError::NotFound(ekey.to_hex()))?;
    let mut frame = vec![0u8; payload_size];
    file.read_exact(&mut frame)?;

    let decoded = casc_blte::BlteDecoder::new(frame.as_slice())?.decode_all()?;
    Ok(decoded)
}

fn hash_shard_path(install_root: &Path, kind: &str, hex_hash: &str) -> PathBuf {
    install_root
        .join("Data")
        .join(kind)
        .join(&hex_hash[0..2])
        .join(&hex_hash[2..4])
        .join(hex_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn write_build_config(path: &Path, root: &str, encoding_content: &str, encoding_encoded: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            path,
            format!("root = {root}\nencoding = {encoding_content} {encoding_encoded}\n"),
        )
        .unwrap();
    }

    fn local_frame(ekey: [u8; 16], payload: &[u8]) -> Vec<u8> {
        let mut frame = Vec::new();
        let mut reversed = ekey;
        reversed.reverse();
        frame.extend_from_slice(&reversed);
        let size_with_header = (30 + payload.len()) as u32;
        frame.extend_from_slice(&size_with_header.to_le_bytes());
        frame.extend_from_slice(&[0u8; 2]);
        frame.extend_from_slice(&0u32.to_be_bytes());
        frame.extend_from_slice(&0u32.to_be_bytes());
        frame.extend_from_slice(payload);
        frame
    }

    fn idx_bytes(entries: &[([u8; 16], u32, u32)]) -> Vec<u8> {
        let mut bytes = vec![0u8; 41];
        bytes[10] = 4; // entry_size_bytes
        bytes[11] = 5; // entry_offset_bytes
        bytes[12] = 9; // entry_key_bytes
        let entries_size: u32 = (9 + 5 + 4) * entries.len() as u32;
        bytes[33..37].copy_from_slice(&entries_size.to_le_bytes());
        for (key, offset, size) in entries {
            bytes.extend_from_slice(&key[..9]);
            let packed_value = u64::from(*offset);
            bytes.push(((packed_value >> 32) & 0xFF) as u8);
            bytes.push(((packed_value >> 24) & 0xFF) as u8);
            bytes.push(((packed_value >> 16) & 0xFF) as u8);
            bytes.push(((packed_value >> 8) & 0xFF) as u8);
            bytes.push((packed_value & 0xFF) as u8);
            bytes.extend_from_slice(&size.to_le_bytes());
        }
        bytes
    }

    fn encoding_table_bytes(chash: [u8; 16], ekey: [u8; 16]) -> Vec<u8> {
        let page_size = 4096usize;
        let mut page = Vec::new();
        page.extend_from_slice(&1u16.to_le_bytes());
        page.extend_from_slice(&0u32.to_be_bytes());
        page.extend_from_slice(&chash);
        page.extend_from_slice(&ekey);
        page.resize(page_size, 0);
        let checksum = md5::compute(&page).0;

        let mut data = Vec::new();
        data.extend_from_slice(b"EN");
        data.push(1);
        data.push(16);
        data.push(16);
        data.extend_from_slice(&4u16.to_be_bytes());
        data.extend_from_slice(&4u16.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.push(0);
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&chash);
        data.extend_from_slice(&checksum);
        data.extend_from_slice(&page);
        data
    }

    /// Lay out `frames` (keyed by ekey, given as the *decoded* bytes a
    /// caller should get back) across a single `data.000` file and a
    /// matching `.idx`, bucketed the way the real loader expects. Each
    /// payload is BLTE-encoded before being written, matching how every
    /// local frame is actually stored.
    fn write_data_files(data_dir: &Path, frames: &[([u8; 16], Vec<u8>)]) {
        std::fs::create_dir_all(data_dir).unwrap();
        let mut data_file = File::create(data_dir.join("data.000")).unwrap();
        let mut by_bucket: HashMap<u8, Vec<([u8; 16], u32, u32)>> = HashMap::new();
        let mut offset = 0u32;
        for (ekey, payload) in frames {
            let blte = casc_blte::encode_single_chunk(payload, false);
            let frame = local_frame(*ekey, &blte);
            data_file.write_all(&frame).unwrap();
            let bucket = crate::bucket::bucket_for(ekey);
            by_bucket
                .entry(bucket)
                .or_default()
                .push((*ekey, offset, frame.len() as u32));
            offset += frame.len() as u32;
        }
        drop(data_file);

        for (bucket, entries) in by_bucket {
            let name = format!("{bucket:02x}0000000a.idx");
            std::fs::write(data_dir.join(name), idx_bytes(&entries)).unwrap();
        }
    }

    fn write_install(root: &Path, root_hash: &str, frames: &[([u8; 16], Vec<u8>)]) {
        std::fs::write(root.join("Diablo III.exe"), b"").unwrap();

        let build_hash = "11111111111111111111111111111111";
        std::fs::write(
            root.join(".build.info"),
            format!("Branch!STRING:0|Build Key!HEX:16|Version!STRING:0\nus|{build_hash}|1.0.0.1\n"),
        )
        .unwrap();
        write_build_config(
            &hash_shard_path(root, "config", build_hash),
            root_hash,
            "44444444444444444444444444444444",
            "55555555555555555555555555555555",
        );

        write_data_files(root.join("Data").join("data").as_path(), frames);
    }

    #[test]
    fn opens_install_and_resolves_root_hash() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let encoding_ekey = [0x55u8; 16];
        let encoding_chash = [0x44u8; 16];
        let encoding_blob = encoding_table_bytes(encoding_chash, encoding_ekey);
        let root_hash = "22222222222222222222222222222222";
        write_install(root, root_hash, &[(encoding_ekey, encoding_blob)]);

        let backend = LocalBackend::open(root).expect("opens installation");
        assert_eq!(backend.root_hash().to_hex(), root_hash);
    }

    #[test]
    fn open_data_reads_frame_at_offset() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let encoding_ekey = [0x55u8; 16];
        let encoding_chash = [0x44u8; 16];
        let encoding_blob = encoding_table_bytes(encoding_chash, encoding_ekey);

        let ekey = [0xABu8; 16];
        let payload = b"hello blte frame".to_vec();

        write_install(
            root,
            "22222222222222222222222222222222",
            &[(encoding_ekey, encoding_blob), (ekey, payload.clone())],
        );

        let backend = LocalBackend::open(root).expect("opens installation");
        let fetched = backend.open_data(CascHash::from(ekey)).expect("reads frame");
        assert_eq!(fetched.into_inner(), payload);
    }

    #[test]
    fn encoded_keys_for_resolves_through_loaded_table() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let encoding_ekey = [0x55u8; 16];
        let encoding_chash = [0x44u8; 16];
        let encoding_blob = encoding_table_bytes(encoding_chash, encoding_ekey);
        write_install(root, "22222222222222222222222222222222", &[(encoding_ekey, encoding_blob)]);

        let backend = LocalBackend::open(root).expect("opens installation");
        let found = backend
            .encoded_keys_for(CascHash::from(encoding_chash))
            .expect("ckey present");
        assert_eq!(found, &[CascHash::from(encoding_ekey)]);
    }
}
