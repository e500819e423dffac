//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small copy of the archive site and run the
//! full crawl cycle end-to-end, writing real CSV files into a temp directory.

use archive_harvester::config::{Config, CrawlerConfig, OutputConfig, SiteConfig};
use archive_harvester::crawler::Coordinator;
use archive_harvester::ScraperError;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server and temp directory
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            ..SiteConfig::default()
        },
        crawler: CrawlerConfig {
            request_delay_ms: 0, // No pacing in tests
        },
        user_agent: Default::default(),
        output: OutputConfig {
            incremental_path: dir.path().join("results.csv").display().to_string(),
            full_path: dir.path().join("results_full.csv").display().to_string(),
            log_path: dir.path().join("output.log").display().to_string(),
        },
    }
}

fn read_rows(path: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .expect("Failed to open CSV output");
    reader
        .records()
        .map(|record| {
            record
                .expect("Malformed CSV row")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

async fn mount_get(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn listing_page(title: &str, version: &str, link: &str) -> String {
    format!(
        r#"<html><body>
        <div class="media">
            <img class="mr-3" src="/icon.png">
            <div class="media-body">
                <h5 class="mt-0"><a href="/product/x">{}</a></h5>
                <ul class="nav">
                    <li class="nav-link"><a href="{}">{}</a></li>
                </ul>
            </div>
        </div>
        </body></html>"#,
        title, link, version
    )
}

fn detail_page(name: &str, identifier: &str, checksum: &str) -> String {
    format!(
        r#"<html><body>
        <table id="downloadsTable">
            <thead><tr><th>Name</th><th>Version</th><th>Language</th><th>Arch</th><th>Size</th><th>Downloads</th></tr></thead>
            <tbody>
                <tr>
                    <td><a href="/download/{}">{}</a></td>
                    <td>1.0</td>
                    <td>English</td>
                    <td><img src="/arch.png" title="x86"></td>
                    <td><span title="{}">360KB</span></td>
                    <td>120</td>
                </tr>
            </tbody>
        </table>
        </body></html>"#,
        identifier, name, checksum
    )
}

#[tokio::test]
async fn test_full_crawl_writes_files_in_page_then_row_order() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().expect("Failed to create temp dir");

    // Listing pages 1 and 2; page 3 is the (excluded) upper bound
    for (page, title, link) in [
        ("1", "MS-DOS", "/product/ms-dos/622"),
        ("2", "PC-DOS", "/product/pc-dos/70"),
    ] {
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("sort", "most-recent"))
            .and(query_param("page", page))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(listing_page(title, "6.22", link)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Root listing with pagination
    mount_get(
        &mock_server,
        "/search",
        r#"<ul id="searchPagination"><li>1</li><li>2</li><li>3</li></ul>"#.to_string(),
    )
    .await;

    // Detail pages
    mount_get(
        &mock_server,
        "/product/ms-dos/622",
        detail_page("MS-DOS 6.22 (3.5)", "guid-dos", "aaaa"),
    )
    .await;
    mount_get(
        &mock_server,
        "/product/pc-dos/70",
        detail_page("PC-DOS 7.0 (3.5)", "guid-pcdos", "bbbb"),
    )
    .await;

    // Download pages: the first has storage + two mirrors, the second only one mirror
    mount_get(
        &mock_server,
        "/download/guid-dos",
        r#"<div id="localClientLink"><a href="ipfs://QmDos">Open</a></div>
           <ul id="mirrorsList">
               <li><a href="https://mirror-1.example/dos">1</a></li>
               <li><a href="https://mirror-2.example/dos">2</a></li>
           </ul>"#
            .to_string(),
    )
    .await;
    mount_get(
        &mock_server,
        "/download/guid-pcdos",
        r#"<ul id="mirrorsList"><li><a href="https://mirror-1.example/pcdos">1</a></li></ul>"#
            .to_string(),
    )
    .await;

    let config = create_test_config(&base_url, &dir);

    // Run the crawl
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.pages_scraped, 2);
    assert_eq!(summary.articles, 2);
    assert_eq!(summary.files, 2);
    assert_eq!(summary.files_without_storage_link, 1);
    assert_eq!(summary.mirror_links, 3);

    // Verify the authoritative full dataset
    let rows = read_rows(&config.output.full_path);
    assert_eq!(
        rows,
        vec![
            vec![
                "MS-DOS 6.22 (3.5)",
                "1.0",
                "English",
                "guid-dos",
                "360KB",
                "aaaa",
                "x86",
                "ipfs://QmDos",
                "https://mirror-1.example/dos",
                "https://mirror-2.example/dos",
            ],
            vec![
                "PC-DOS 7.0 (3.5)",
                "1.0",
                "English",
                "guid-pcdos",
                "360KB",
                "bbbb",
                "x86",
                "",
                "https://mirror-1.example/pcdos",
            ],
        ]
    );

    // The per-page output holds the same rows, in whatever order the writes landed
    let mut incremental = read_rows(&config.output.incremental_path);
    incremental.sort();
    let mut expected = rows.clone();
    expected.sort();
    assert_eq!(incremental, expected);
}

#[tokio::test]
async fn test_non_numeric_page_bound_stops_before_listing_pages() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");

    // No listing page may be requested
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("sort", "most-recent"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    mount_get(
        &mock_server,
        "/search",
        r#"<ul id="searchPagination"><li>1</li><li>Last</li></ul>"#.to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");

    match coordinator.run().await {
        Err(ScraperError::PageCount { label }) => assert_eq!(label, "Last"),
        other => panic!("Expected page count error, got {:?}", other),
    }

    // Nothing was persisted
    assert!(!dir.path().join("results_full.csv").exists());
    assert!(!dir.path().join("results.csv").exists());
}

#[tokio::test]
async fn test_unreachable_detail_page_keeps_article_and_continues() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="media"><div class="media-body">
                <h5 class="mt-0"><a>Broken</a></h5>
                <ul class="nav"><li class="nav-link"><a href="/product/broken">1.0</a></li></ul>
            </div></div>
            <div class="media"><div class="media-body">
                <h5 class="mt-0"><a>Working</a></h5>
                <ul class="nav"><li class="nav-link"><a href="/product/working">2.0</a></li></ul>
            </div></div>"#,
        ))
        .mount(&mock_server)
        .await;
    mount_get(
        &mock_server,
        "/search",
        r#"<ul id="searchPagination"><li>2</li></ul>"#.to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/product/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_get(
        &mock_server,
        "/product/working",
        detail_page("Working disk", "guid-working", "cccc"),
    )
    .await;
    mount_get(
        &mock_server,
        "/download/guid-working",
        r#"<div id="localClientLink"><a href="ipfs://QmW">Open</a></div>"#.to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), &dir);
    let coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let summary = coordinator.run().await.expect("Crawl failed");

    assert_eq!(summary.articles, 2);
    assert_eq!(summary.articles_without_files, 1);

    let rows = read_rows(&config.output.full_path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "Working disk");
    assert_eq!(rows[0][7], "ipfs://QmW");
    assert_eq!(rows[0].len(), 8);
}
