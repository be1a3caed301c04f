//! The online backend: bootstraps from the patch service, then resolves
//! content either through a CDN archive or as a standalone blob.

use casc_formats::archive_index::ArchiveIndex;
use casc_formats::config::{BuildConfig, CdnConfig};
use casc_formats::encoding::EncodingTable;
use casc_formats::versions::{parse_cdn, parse_versions};
use casc_formats::{CancelToken, CascHash, FetchedData};

use crate::error::{CdnError, Result};
use crate::region::Region;
use crate::url::{content_url, index_url, ContentKind};

struct ArchiveLocation {
    archive_hash: CascHash,
    ekey: CascHash,
    offset: u32,
    size: u32,
}

/// The online backend. Immutable after [`OnlineBackend::connect`]; every
/// field needed by `open_data` is established during bootstrap.
pub struct OnlineBackend {
    http: reqwest::Client,
    host: String,
    path_prefix: String,
    build_config: BuildConfig,
    cdn_config: CdnConfig,
    encoding: EncodingTable,
    archive_locations: Vec<ArchiveLocation>,
}

impl OnlineBackend {
    pub async fn connect(http: reqwest::Client, app: &str, region: Region) -> Result<Self> {
        Self::bootstrap(http, &region.patch_base_url(), app, region).await
    }

    /// Bootstraps against an explicit patch-service base URL. Exposed
    /// separately from [`Self::connect`] so tests can point it at a mock
    /// server instead of the real `*.patch.battle.net` hosts.
    pub async fn bootstrap(
        http: reqwest::Client,
        patch_base_url: &str,
        app: &str,
        region: Region,
    ) -> Result<Self> {
        Self::bootstrap_with_cdn_region(http, patch_base_url, app, region, region).await
    }

    /// Like [`Self::bootstrap`], but selects the version record from
    /// `version_region` and the CDN record from `cdn_region` independently
    /// (the CLI's `--region`/`--cdn` flags).
    pub async fn bootstrap_with_cdn_region(
        http: reqwest::Client,
        patch_base_url: &str,
        app: &str,
        version_region: Region,
        cdn_region: Region,
    ) -> Result<Self> {
        let versions_text = http
            .get(format!("{patch_base_url}/{app}/versions"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let versions = parse_versions(&versions_text)?;
        let version = pick_region(&versions, &version_region, |v| &v.region)
            .ok_or_else(|| CdnError::UnknownRegion(version_region.to_string()))?;

        let cdns_text = http
            .get(format!("{patch_base_url}/{app}/cdns"))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let cdn_records = parse_cdn(&cdns_text)?;
        let cdn_record = pick_region(&cdn_records, &cdn_region, |c| &c.region)
            .ok_or_else(|| CdnError::UnknownRegion(cdn_region.to_string()))?;
        let host = cdn_record
            .hosts
            .first()
            .cloned()
            .ok_or_else(|| CdnError::NotFound("cdn record has no hosts".into()))?;
        let path_prefix = cdn_record.path_prefix.clone();
        tracing::debug!(app, cdn_region = %cdn_region, %host, "resolved CDN host");

        let build_config_text = fetch_text(
            &http,
            &host,
            &path_prefix,
            ContentKind::Config,
            version.build_config_hash,
        )
        .await?;
        let build_config = BuildConfig::parse(&build_config_text)?;

        let encoding_raw = fetch_bytes(
            &http,
            &host,
            &path_prefix,
            ContentKind::Data,
            build_config.encoding_encoded_hash(),
        )
        .await?;
        let encoding_decoded = casc_blte::BlteDecoder::new(encoding_raw.as_slice())
            .and_then(casc_blte::BlteDecoder::decode_all)
            .map_err(|e| CdnError::Transport(e.to_string()))?;
        let encoding = casc_formats::encoding::parse(encoding_decoded.as_slice())?;

        let cdn_config_text = fetch_text(
            &http,
            &host,
            &path_prefix,
            ContentKind::Config,
            version.cdn_config_hash,
        )
        .await?;
        let cdn_config = CdnConfig::parse(&cdn_config_text)?;

        let mut archive_locations = Vec::new();
        for archive_hash in &cdn_config.archive_hashes {
            let index_bytes = fetch_index(&http, &host, &path_prefix, *archive_hash).await?;
            let index: ArchiveIndex = casc_formats::archive_index::parse(index_bytes.as_slice())?;
            for entry in index.entries() {
                archive_locations.push(ArchiveLocation {
                    archive_hash: *archive_hash,
                    ekey: entry.ekey,
                    offset: entry.offset,
                    size: entry.encoded_size,
                });
            }
        }

        tracing::info!(archives = archive_locations.len(), "bootstrapped online backend");

        Ok(Self {
            http,
            host,
            path_prefix,
            build_config,
            cdn_config,
            encoding,
            archive_locations,
        })
    }

    pub fn root_hash(&self) -> CascHash {
        self.build_config.root_hash
    }

    pub fn encoded_keys_for(&self, content_hash: CascHash) -> Option<&[CascHash]> {
        self.encoding.encoded_keys_for(content_hash)
    }

    pub fn cdn_config(&self) -> &CdnConfig {
        &self.cdn_config
    }

    /// Fetch the bytes behind `ekey`, honouring `cancel` between requests.
    pub async fn open_data(&self, ekey: CascHash, cancel: &CancelToken) -> Result<FetchedData> {
        if cancel.is_cancelled() {
            return Err(CdnError::Cancelled);
        }

        if let Some(location) = self.archive_locations.iter().find(|l| l.ekey == ekey) {
            tracing::debug!(%ekey, archive = %location.archive_hash, "archive hit");
            let url = content_url(&self.host, &self.path_prefix, ContentKind::Data, location.archive_hash);
            let range_end = location.offset + location.size - 1;
            let response = self
                .http
                .get(&url)
                .header("Range", format!("bytes={}-{}", location.offset, range_end))
                .send()
                .await?
                .error_for_status()?;
            if cancel.is_cancelled() {
                return Err(CdnError::Cancelled);
            }
            let bytes = response.bytes().await?.to_vec();
            return Ok(FetchedData::Encoded(bytes));
        }

        tracing::debug!(%ekey, "standalone fetch, no archive location known");
        let url = content_url(&self.host, &self.path_prefix, ContentKind::Data, ekey);
        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(CdnError::NotFound(ekey.to_hex()));
        }
        let bytes = response.error_for_status()?.bytes().await?.to_vec();
        Ok(FetchedData::Encoded(bytes))
    }
}

fn pick_region<'a, T>(records: &'a [T], region: &Region, key: impl Fn(&T) -> &String) -> Option<&'a T> {
    let wanted = region.to_string();
    records.iter().find(|r| key(r).eq_ignore_ascii_case(&wanted))
}

async fn fetch_text(
    http: &reqwest::Client,
    host: &str,
    path_prefix: &str,
    kind: ContentKind,
    hash: CascHash,
) -> Result<String> {
    let url = content_url(host, path_prefix, kind, hash);
    Ok(http.get(url).send().await?.error_for_status()?.text().await?)
}

async fn fetch_bytes(
    http: &reqwest::Client,
    host: &str,
    path_prefix: &str,
    kind: ContentKind,
    hash: CascHash,
) -> Result<Vec<u8>> {
    let url = content_url(host, path_prefix, kind, hash);
    let bytes = http.get(url).send().await?.error_for_status()?.bytes().await?;
    Ok(bytes.to_vec())
}

async fn fetch_index(
    http: &reqwest::Client,
    host: &str,
    path_prefix: &str,
    archive_hash: CascHash,
) -> Result<Vec<u8>> {
    let url = index_url(host, path_prefix, archive_hash);
    let bytes = http.get(url).send().await?.error_for_status()?.bytes().await?;
    Ok(bytes.to_vec())
}
