//! Versions and CDN list tables fetched during online backend bootstrap.

use crate::bpsv::BpsvTable;
use crate::error::{FormatError, Result};
use crate::hash::CascHash;

/// One row of the versions table: identifies a build for a region.
#[derive(Debug, Clone)]
pub struct Version {
    pub region: String,
    pub build_config_hash: CascHash,
    pub cdn_config_hash: CascHash,
    pub version_name: String,
    pub product_code: Option<String>,
}

/// One row of the CDN table: where to fetch content for a region.
#[derive(Debug, Clone)]
pub struct CdnRecord {
    pub region: String,
    pub path_prefix: String,
    pub hosts: Vec<String>,
}

pub fn parse_versions(input: &str) -> Result<Vec<Version>> {
    let table = BpsvTable::parse(input)?;
    table.require_columns(&["Region", "BuildConfig", "CDNConfig", "VersionsName"])?;

    table
        .rows()
        .iter()
        .map(|row| {
            let region = table.get(row, "Region").unwrap_or_default().to_string();
            let build_config_hash = hash_column(&table, row, "BuildConfig")?;
            let cdn_config_hash = hash_column(&table, row, "CDNConfig")?;
            let version_name = table.get(row, "VersionsName").unwrap_or_default().to_string();
            let product_code = table
                .get(row, "ProductConfig")
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            Ok(Version {
                region,
                build_config_hash,
                cdn_config_hash,
                version_name,
                product_code,
            })
        })
        .collect()
}

pub fn parse_cdn(input: &str) -> Result<Vec<CdnRecord>> {
    let table = BpsvTable::parse(input)?;
    table.require_columns(&["Name", "Path", "Hosts"])?;

    table
        .rows()
        .iter()
        .map(|row| {
            let region = table.get(row, "Name").unwrap_or_default().to_string();
            let path_prefix = table.get(row, "Path").unwrap_or_default().trim().to_string();
            let hosts: Vec<String> = table
                .get(row, "Hosts")
                .unwrap_or_default()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            if hosts.is_empty() {
                return Err(FormatError::BadCsv(format!(
                    "cdn record for {region} has no hosts"
                )));
            }
            Ok(CdnRecord {
                region,
                path_prefix,
                hosts,
            })
        })
        .collect()
}

fn hash_column(table: &BpsvTable, row: &[String], name: &str) -> Result<CascHash> {
    let raw = table.get(row, name).unwrap_or_default();
    CascHash::from_hex(raw).ok_or_else(|| FormatError::BadCsv(format!("invalid hash in {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "Region!STRING:0|BuildConfig!HEX:16|CDNConfig!HEX:16|KeyRing!HEX:16|BuildId!DEC:4|VersionsName!STRING:0|ProductConfig!HEX:16\n## seqn = 11111\nus|6a9e9d6b2a070a4c6a3b777beeb2b7c0|351c5adcdda3a2553ed1aa3ae5332a38||1|1.1.1.11111|c\neu|66d0476334023bb1eaa241424f9ad178|07b668246e2cb87bfc6aa7a4a825a348||2|2.1.1.11111|f\n";

    #[test]
    fn parses_two_regions() {
        let versions = parse_versions(FIXTURE).expect("valid versions csv");
        assert_eq!(versions.len(), 2);
        assert_eq!(versions[0].region, "us");
        assert_eq!(versions[0].version_name, "1.1.1.11111");
        assert_eq!(versions[1].region, "eu");
        assert_eq!(versions[1].version_name, "2.1.1.11111");
        assert_eq!(
            versions[0].build_config_hash.to_hex(),
            "6a9e9d6b2a070a4c6a3b777beeb2b7c0"
        );
    }

    #[test]
    fn cdn_requires_hosts() {
        let input = "Name!STRING:0|Path!STRING:0|Hosts!STRING:0\nus|tpr/wow|level3.blizzard.com edgecast.blizzard.com\n";
        let cdns = parse_cdn(input).expect("valid cdn csv");
        assert_eq!(cdns[0].hosts.len(), 2);
        assert_eq!(cdns[0].path_prefix, "tpr/wow");
    }
}
