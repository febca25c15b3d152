//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full scrape cycle end-to-end.

use std::path::Path;
use tempfile::TempDir;
use wikiscrape::config::Config;
use wikiscrape::crawler::{Coordinator, FetchResult};
use wikiscrape::state::PageOutcome;
use wikiscrape::url::{cache_path_for, LinkFilter};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration rooted in a temporary directory
fn create_test_config(entry_url: &str, dir: &Path, use_cache: bool) -> Config {
    let mut config = Config::default();
    config.scrape.entry_url = entry_url.to_string();
    config.scrape.use_cache = use_cache;
    config.fetch.cache_dir = dir.join("cache");
    config.output.index_path = dir.join("index.json");
    config
}

/// Builds an article page with the given infobox rows
fn article(name: &str, rows: &str) -> String {
    format!(
        r#"<html><head><title>{name} - Wikipedia</title></head><body>
        <h1 id="firstHeading">{name}</h1>
        <div id="bodyContent">
            <table class="infobox vevent"><tbody>{rows}</tbody></table>
            <p><a href="/wiki/Compiler">compiler</a> <a href="/wiki/Interpreter">interpreter</a>
               <a href="https://example.org/">external</a></p>
            <h2>History</h2>
            <h2>Syntax</h2>
        </div>
        </body></html>"#
    )
}

const FULL_ROWS: &str = r#"
    <tr><th>Paradigm</th><td>Multi-paradigm</td></tr>
    <tr><th>First&nbsp;appeared</th><td>1991</td></tr>
    <tr><th>Filename extensions</th><td>.ext</td></tr>
"#;

const PARTIAL_ROWS: &str = r#"
    <tr><th>Paradigm</th><td>Concatenative</td></tr>
    <tr><th>First&nbsp;appeared</th><td>1970</td></tr>
"#;

const LIST_PAGE: &str = r#"<html><head><title>List of languages</title></head><body>
    <div id="bodyContent">
        <ul>
            <li><a href="/wiki/Python">Python</a></li>
            <li><a href="/wiki/Rust">Rust</a></li>
            <li><a href="/wiki/Forth">Forth</a></li>
            <li><a href="/not-wiki">Not a wiki link</a></li>
        </ul>
        <p><a href="/wiki/Outside_list">Outside of a list</a></p>
    </div>
</body></html>"#;

/// Mounts a GET mock serving HTML at `route`, expected `times` times
async fn mount_page(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts the list page and the three language articles
async fn mount_language_site(server: &MockServer, times: u64) {
    mount_page(server, "/wiki/List", LIST_PAGE.to_string(), times).await;
    mount_page(server, "/wiki/Python", article("Python", FULL_ROWS), times).await;
    mount_page(server, "/wiki/Rust", article("Rust", FULL_ROWS), times).await;
    mount_page(server, "/wiki/Forth", article("Forth", PARTIAL_ROWS), times).await;
    mount_page(server, "/not-wiki", "<html></html>".to_string(), 0).await;
    mount_page(server, "/wiki/Outside_list", "<html></html>".to_string(), 0).await;
}

#[tokio::test]
async fn test_full_scrape_indexes_qualifying_articles() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_language_site(&mock_server, 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/wiki/List", base_url), dir.path(), false);

    let mut coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    coordinator.run().await.expect("Scrape failed");

    let written = std::fs::read_to_string(dir.path().join("index.json")).unwrap();
    let index: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&written).expect("Index is not a JSON object");

    let python_url = format!("{}/wiki/Python", base_url);
    let rust_url = format!("{}/wiki/Rust", base_url);
    assert_eq!(index.len(), 2, "Expected two indexed languages: {}", written);
    assert!(index.contains_key(&python_url));
    assert!(index.contains_key(&rust_url));

    for (url, record) in &index {
        let record = record.as_object().expect("Record is not an object");
        assert_eq!(record.len(), 7, "Record for {} should have seven fields", url);
        assert_eq!(record["url"], serde_json::Value::String(url.clone()));
        assert_eq!(record["paradigm"], "Multi-paradigm");
        assert_eq!(record["first_appeared"], "1991");
        assert_eq!(record["file_extensions"], ".ext");
        assert_eq!(record["header_sections"], 2);
        assert_eq!(record["internal_links"], 2);
    }
    assert_eq!(index[&python_url]["name"], "Python");

    // Four-space indentation
    assert!(written.starts_with("{\n    \""));

    let stats = coordinator.statistics();
    assert_eq!(stats.links_discovered, 3);
    assert_eq!(stats.network_fetches, 4);
    assert_eq!(stats.count(PageOutcome::Recorded), 2);
    assert_eq!(stats.count(PageOutcome::Incomplete), 1);
}

#[tokio::test]
async fn test_cached_reruns_are_byte_identical() {
    let mock_server = MockServer::start().await;
    // Every page is requested once, by the first run only
    mount_language_site(&mock_server, 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("{}/wiki/List", mock_server.uri()),
        dir.path(),
        true,
    );
    let index_path = config.output.index_path.clone();

    let mut first = Coordinator::new(config.clone()).unwrap();
    first.run().await.unwrap();
    let first_output = std::fs::read(&index_path).unwrap();
    assert_eq!(first.statistics().network_fetches, 4);

    let mut second = Coordinator::new(config).unwrap();
    second.run().await.unwrap();
    let second_output = std::fs::read(&index_path).unwrap();

    assert_eq!(first_output, second_output);
    assert_eq!(second.statistics().network_fetches, 0);
    assert_eq!(second.statistics().cache_hits, 4);
}

#[tokio::test]
async fn test_network_bytes_match_cache_file() {
    let mock_server = MockServer::start().await;
    let body = article("Python", FULL_ROWS);
    mount_page(&mock_server, "/wiki/Python", body.clone(), 1).await;

    let dir = TempDir::new().unwrap();
    let page_url = format!("{}/wiki/Python", mock_server.uri());
    let config = create_test_config(&page_url, dir.path(), false);
    let client =
        wikiscrape::crawler::build_http_client(&config.fetch, &config.user_agent).unwrap();
    let fetcher = wikiscrape::crawler::Fetcher::new(client, &config.fetch.cache_dir, false);

    let result = fetcher.fetch_page(&page_url).await.unwrap();
    assert!(matches!(result, FetchResult::Fetched { .. }));
    let returned = result.into_body().unwrap();

    let cache_path =
        cache_path_for(&url::Url::parse(&page_url).unwrap(), &config.fetch.cache_dir).unwrap();
    assert_eq!(returned, body.as_bytes());
    assert_eq!(std::fs::read(cache_path).unwrap(), returned);
}

#[tokio::test]
async fn test_failed_links_do_not_stop_the_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/wiki/List", LIST_PAGE.to_string(), 1).await;
    mount_page(&mock_server, "/wiki/Python", article("Python", FULL_ROWS), 1).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Rust"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Forth"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/wiki/List", base_url), dir.path(), false);

    let mut coordinator = Coordinator::new(config).unwrap();
    let index = coordinator.run().await.unwrap();

    assert_eq!(index.len(), 1);
    assert!(index.get(&format!("{}/wiki/Python", base_url)).is_some());
    assert_eq!(
        coordinator.statistics().count(PageOutcome::MissingStructure),
        2
    );
}

#[tokio::test]
async fn test_cache_path_collision_does_not_stop_the_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let list_page = r#"<ul>
        <li><a href="/wiki/Rust">Rust</a></li>
        <li><a href="/wiki/Rust/Syntax">Rust syntax</a></li>
        <li><a href="/wiki/Zig">Zig</a></li>
    </ul>"#;
    mount_page(&mock_server, "/wiki/List", list_page.to_string(), 1).await;
    mount_page(&mock_server, "/wiki/Rust", article("Rust", FULL_ROWS), 1).await;
    mount_page(&mock_server, "/wiki/Rust/Syntax", article("Syntax", FULL_ROWS), 1).await;
    mount_page(&mock_server, "/wiki/Zig", article("Zig", FULL_ROWS), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/wiki/List", base_url), dir.path(), false);
    let cache_dir = config.fetch.cache_dir.clone();

    let mut coordinator = Coordinator::new(config).unwrap();
    let index = coordinator.run().await.expect("Collision ended the run");

    // `/wiki/Rust` is cached as a file first, so `/wiki/Rust/Syntax` cannot be
    // cached; it is still indexed, and so is every link after it
    assert_eq!(index.len(), 3);
    for name in ["Rust", "Rust/Syntax", "Zig"] {
        assert!(index.get(&format!("{}/wiki/{}", base_url, name)).is_some());
    }
    assert!(dir.path().join("index.json").exists());

    let rust_cache = cache_path_for(
        &url::Url::parse(&format!("{}/wiki/Rust", base_url)).unwrap(),
        &cache_dir,
    )
    .unwrap();
    assert!(rust_cache.is_file());
    assert_eq!(coordinator.statistics().count(PageOutcome::Recorded), 3);
}

#[tokio::test]
async fn test_unreachable_links_are_skipped() {
    // Bind then drop a listener to get a port with nothing behind it
    let dead_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mock_server = MockServer::start().await;
    let list_page = format!(
        r#"<ul>
            <li><a href="/wiki/Python">Python</a></li>
            <li><a href="http://127.0.0.1:{}/wiki/Gone">Gone</a></li>
        </ul>"#,
        dead_port
    );
    mount_page(&mock_server, "/wiki/List", list_page, 1).await;
    mount_page(&mock_server, "/wiki/Python", article("Python", FULL_ROWS), 1).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(
        &format!("{}/wiki/List", mock_server.uri()),
        dir.path(),
        false,
    );
    config.scrape.link_filter = LinkFilter::NonFragment;

    let mut coordinator = Coordinator::new(config).unwrap();
    let index = coordinator.run().await.unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(coordinator.statistics().count(PageOutcome::FetchFailed), 1);
    assert_eq!(coordinator.statistics().errors(), 1);
}

#[tokio::test]
async fn test_unreachable_entry_page_writes_empty_index() {
    let dead_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let dir = TempDir::new().unwrap();
    let config = create_test_config(
        &format!("http://127.0.0.1:{}/wiki/List", dead_port),
        dir.path(),
        false,
    );

    let mut coordinator = Coordinator::new(config).unwrap();
    let index = coordinator.run().await.unwrap();

    assert!(index.is_empty());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("index.json")).unwrap(),
        "{}"
    );
}

#[tokio::test]
async fn test_links_only_run_never_fetches_articles() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(&mock_server, "/wiki/List", LIST_PAGE.to_string(), 1).await;
    mount_page(&mock_server, "/wiki/Python", article("Python", FULL_ROWS), 0).await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/wiki/List", base_url), dir.path(), false);
    config.scrape.extract_fields = false;

    let mut coordinator = Coordinator::new(config).unwrap();
    coordinator.run().await.unwrap();

    let written = std::fs::read_to_string(dir.path().join("index.json")).unwrap();
    let index: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&written).unwrap();

    assert_eq!(index.len(), 3);
    for name in ["Python", "Rust", "Forth"] {
        let value = &index[&format!("{}/wiki/{}", base_url, name)];
        assert_eq!(value, &serde_json::json!({}));
    }
    assert_eq!(coordinator.statistics().count(PageOutcome::Listed), 3);
}
