//! End-to-end bootstrap against a mock patch service and CDN.

use casc_cdn::client::OnlineBackend;
use casc_cdn::region::Region;
use casc_formats::CancelToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUILD_CONFIG_HASH: &str = "11111111111111111111111111111111";
const CDN_CONFIG_HASH: &str = "22222222222222222222222222222222";
const ROOT_HASH: &str = "33333333333333333333333333333333";
const ENCODING_CONTENT_HASH: &str = "44444444444444444444444444444444";
const ENCODING_ENCODED_HASH: &str = "55555555555555555555555555555555";
const ARCHIVE_HASH: &str = "66666666666666666666666666666666";
const ARCHIVE_EKEY: &str = "77777777777777777777777777777777";
const STANDALONE_EKEY: &str = "88888888888888888888888888888888";

/// `reqwest`'s `rustls-no-provider` feature requires a crypto provider to
/// be installed before any `Client` is built; install it once per process.
fn ensure_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

fn encoding_table_bytes(ckey_hex: &str, ekey_hex: &str) -> Vec<u8> {
    let ckey = hex::decode(ckey_hex).unwrap();
    let ekey = hex::decode(ekey_hex).unwrap();

    let mut page = Vec::new();
    page.extend_from_slice(&1u16.to_le_bytes());
    page.extend_from_slice(&0u32.to_be_bytes());
    page.extend_from_slice(&ckey);
    page.extend_from_slice(&ekey);
    page.resize(4096, 0);
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
    data.extend_from_slice(&ckey);
    data.extend_from_slice(&checksum);
    data.extend_from_slice(&page);
    data
}

async fn mount_common(server: &MockServer, host_port: &str) {
    let versions = format!(
        "Region!STRING:0|BuildConfig!HEX:16|CDNConfig!HEX:16|VersionsName!STRING:0\nus|{BUILD_CONFIG_HASH}|{CDN_CONFIG_HASH}|1.0.0.1\n"
    );
    Mock::given(method("GET"))
        .and(path("/d3/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(versions))
        .mount(server)
        .await;

    let cdns = format!("Name!STRING:0|Path!STRING:0|Hosts!STRING:0\nus|tpr/d3|{host_port}\n");
    Mock::given(method("GET"))
        .and(path("/d3/cdns"))
        .respond_with(ResponseTemplate::new(200).set_body_string(cdns))
        .mount(server)
        .await;

    let build_config = format!("root = {ROOT_HASH}\nencoding = {ENCODING_CONTENT_HASH} {ENCODING_ENCODED_HASH}\n");
    Mock::given(method("GET"))
        .and(path(format!("/tpr/d3/config/11/11/{BUILD_CONFIG_HASH}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(build_config))
        .mount(server)
        .await;

    let cdn_config = format!("archives = {ARCHIVE_HASH}\n");
    Mock::given(method("GET"))
        .and(path(format!("/tpr/d3/config/22/22/{CDN_CONFIG_HASH}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(cdn_config))
        .mount(server)
        .await;

    let encoding_raw = encoding_table_bytes(ENCODING_CONTENT_HASH, ENCODING_ENCODED_HASH);
    let encoding_blte = casc_blte::encode_single_chunk(&encoding_raw, false);
    Mock::given(method("GET"))
        .and(path(format!("/tpr/d3/data/55/55/{ENCODING_ENCODED_HASH}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(encoding_blte))
        .mount(server)
        .await;

    let mut index_block = Vec::new();
    index_block.extend_from_slice(&hex::decode(ARCHIVE_EKEY).unwrap());
    index_block.extend_from_slice(&10u32.to_be_bytes()); // encoded_size
    index_block.extend_from_slice(&0u32.to_be_bytes()); // offset
    index_block.resize(4096, 0);
    Mock::given(method("GET"))
        .and(path(format!("/tpr/d3/data/66/66/{ARCHIVE_HASH}.index")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(index_block))
        .mount(server)
        .await;
}

#[tokio::test]
async fn bootstraps_and_resolves_root_and_encoding() {
    ensure_crypto_provider();
    let server = MockServer::start().await;
    let host_port = server.address().to_string();
    mount_common(&server, &host_port).await;

    let backend = OnlineBackend::bootstrap(
        reqwest::Client::new(),
        &server.uri(),
        "d3",
        Region::Us,
    )
    .await
    .expect("bootstrap succeeds");

    assert_eq!(backend.root_hash().to_hex(), ROOT_HASH);
    let ekeys = backend
        .encoded_keys_for(casc_formats::CascHash::from_hex(ENCODING_CONTENT_HASH).unwrap())
        .expect("ckey resolved");
    assert_eq!(ekeys[0].to_hex(), ENCODING_ENCODED_HASH);
    assert_eq!(backend.cdn_config().archive_hashes.len(), 1);
}

#[tokio::test]
async fn open_data_resolves_archive_hit() {
    ensure_crypto_provider();
    let server = MockServer::start().await;
    let host_port = server.address().to_string();
    mount_common(&server, &host_port).await;

    let archive_bytes = vec![0xAAu8; 10];
    Mock::given(method("GET"))
        .and(path(format!("/tpr/d3/data/66/66/{ARCHIVE_HASH}")))
        .respond_with(ResponseTemplate::new(206).set_body_bytes(archive_bytes.clone()))
        .mount(&server)
        .await;

    let backend = OnlineBackend::bootstrap(reqwest::Client::new(), &server.uri(), "d3", Region::Us)
        .await
        .expect("bootstrap succeeds");

    let cancel = CancelToken::new();
    let fetched = backend
        .open_data(casc_formats::CascHash::from_hex(ARCHIVE_EKEY).unwrap(), &cancel)
        .await
        .expect("archive hit resolves");
    assert_eq!(fetched.into_inner(), archive_bytes);
}

#[tokio::test]
async fn open_data_falls_back_to_standalone() {
    ensure_crypto_provider();
    let server = MockServer::start().await;
    let host_port = server.address().to_string();
    mount_common(&server, &host_port).await;

    let standalone_bytes = vec![0xBBu8; 20];
    Mock::given(method("GET"))
        .and(path(format!(
            "/tpr/d3/data/88/88/{STANDALONE_EKEY}"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(standalone_bytes.clone()))
        .mount(&server)
        .await;

    let backend = OnlineBackend::bootstrap(reqwest::Client::new(), &server.uri(), "d3", Region::Us)
        .await
        .expect("bootstrap succeeds");

    let cancel = CancelToken::new();
    let fetched = backend
        .open_data(casc_formats::CascHash::from_hex(STANDALONE_EKEY).unwrap(), &cancel)
        .await
        .expect("standalone fetch resolves");
    assert_eq!(fetched.into_inner(), standalone_bytes);
}
