//! CDN content URL construction: `http://{host}/{path}/{type}/{hh0hh1}/{hh2hh3}/{hash}[.index]`.

use casc_formats::CascHash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Config,
    Data,
}

impl ContentKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Data => "data",
        }
    }
}

pub fn content_url(host: &str, path: &str, kind: ContentKind, hash: CascHash) -> String {
    build(host, path, kind, hash, false)
}

pub fn index_url(host: &str, path: &str, hash: CascHash) -> String {
    build(host, path, ContentKind::Data, hash, true)
}

fn build(host: &str, path: &str, kind: ContentKind, hash: CascHash, is_index: bool) -> String {
    let hex = hash.to_hex();
    let suffix = if is_index { ".index" } else { "" };
    format!(
        "http://{host}/{path}/{kind}/{a}/{b}/{hex}{suffix}",
        kind = kind.as_str(),
        a = &hex[0..2],
        b = &hex[2..4],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_data_url() {
        let hash = CascHash::from([0xAB; 16]);
        let url = content_url("cdn.example.com", "tpr/d3", ContentKind::Data, hash);
        assert_eq!(
            url,
            "http://cdn.example.com/tpr/d3/data/ab/ab/abababababababababababababababab"
        );
    }

    #[test]
    fn builds_index_url() {
        let hash = CascHash::from([0xCD; 16]);
        let url = index_url("cdn.example.com", "tpr/d3", hash);
        assert!(url.ends_with(".index"));
        assert!(url.contains("/data/cd/cd/"));
    }
}
