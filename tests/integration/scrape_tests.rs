use scrapedf::config::{Config, CrawlerConfig};
use scrapedf::scrape::archive_path;
use scrapedf::{ScrapeError, ScrapeOptions, Scraper};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

/// Serves `/`, `/about` and `/docs/intro`, plus a broken link and an external one
async fn start_site() -> MockServer {
    let server = MockServer::start().await;

    mount_html(
        &server,
        "/",
        r#"<html><head><title>Home</title><style>body { color: red; }</style></head><body>
            <nav><a href="/about">About</a><a href="/docs/intro">Docs</a></nav>
            <h1>Welcome</h1>
            <p>This is the landing page of the test site.</p>
            <a href="/missing">Broken</a>
            <a href="https://external.example/page">External</a>
        </body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/about",
        r#"<html><body><h2>About us</h2><p>We write small test fixtures for crawlers.</p>
            <a href="/">Home</a></body></html>"#,
    )
    .await;
    mount_html(
        &server,
        "/docs/intro",
        r#"<html><body><ul><li>First step here</li><li>Second</li></ul>
            <a href="/about#team">Team</a></body></html>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    server
}

fn test_config() -> Config {
    Config {
        crawler: CrawlerConfig {
            request_timeout_secs: 2,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    }
}

fn archive_entries(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(File::open(path).expect("open archive")).expect("read archive");
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_full_scrape_with_strip() {
    let server = start_site().await;
    let start_url = format!("{}/", server.uri());
    let dir = tempdir().unwrap();
    let output = archive_path(&dir.path().join("out"), &start_url).unwrap();

    let scraper = Scraper::new(test_config(), ScrapeOptions::new(true, false));
    let report = scraper
        .scrape_and_save(&start_url, &output)
        .await
        .expect("scrape failed");

    assert_eq!(output, dir.path().join("out").join("127.0.0.1.zip"));
    assert!(output.exists());
    assert_eq!(
        archive_entries(&output),
        vec![
            "127.0.0.1_about.pdf",
            "127.0.0.1_docs_intro.pdf",
            "127.0.0.1_index.pdf"
        ]
    );

    assert_eq!(report.pages_archived, 3);
    assert_eq!(report.fetch_errors, 1);
    assert_eq!(report.max_depth_reached, 1);

    let mut archive = zip::ZipArchive::new(File::open(&output).unwrap()).unwrap();
    let mut entry = archive.by_name("127.0.0.1_index.pdf").unwrap();
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_full_scrape_raw_mode() {
    let server = start_site().await;
    let start_url = format!("{}/", server.uri());
    let dir = tempdir().unwrap();
    let output = dir.path().join("site.zip");

    let scraper = Scraper::new(test_config(), ScrapeOptions::default());
    let report = scraper.scrape_and_save(&start_url, &output).await.unwrap();

    assert_eq!(report.pages_archived, 3);
    assert_eq!(archive_entries(&output).len(), 3);
}

#[tokio::test]
async fn test_depth_zero_archives_start_page_only() {
    let server = start_site().await;
    let start_url = format!("{}/", server.uri());
    let dir = tempdir().unwrap();
    let output = dir.path().join("site.zip");

    let mut config = test_config();
    config.crawler.max_depth = 0;
    let report = Scraper::new(config, ScrapeOptions::new(true, true))
        .scrape_and_save(&start_url, &output)
        .await
        .unwrap();

    assert_eq!(report.entries, vec!["127.0.0.1_index.pdf"]);
}

#[tokio::test]
async fn test_existing_archive_is_replaced() {
    let server = start_site().await;
    let start_url = format!("{}/", server.uri());
    let dir = tempdir().unwrap();
    let output = dir.path().join("site.zip");
    std::fs::write(&output, b"stale").unwrap();

    Scraper::new(test_config(), ScrapeOptions::default())
        .scrape_and_save(&start_url, &output)
        .await
        .unwrap();

    assert_eq!(archive_entries(&output).len(), 3);
}

#[tokio::test]
async fn test_no_pages_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("site.zip");
    let result = Scraper::new(test_config(), ScrapeOptions::default())
        .scrape_and_save(&format!("{}/", server.uri()), &output)
        .await;

    assert!(matches!(result, Err(ScrapeError::NoPages)));
    assert!(!output.exists());
}
