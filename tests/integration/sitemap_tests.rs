use crate::create_test_config;
use flate2::write::GzEncoder;
use flate2::Compression;
use robots_sitemap::{Robots, SitemapEntry};
use std::io::Write;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

fn urlset(locations: &[String]) -> String {
    let urls: String = locations
        .iter()
        .map(|loc| {
            format!(
                "<url><loc>{}</loc><lastmod>2024-01-01</lastmod><priority>0.5</priority></url>",
                loc
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="{}">{}</urlset>"#,
        SITEMAP_NS, urls
    )
}

fn index(locations: &[String]) -> String {
    let sitemaps: String = locations
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="{}">{}</sitemapindex>"#,
        SITEMAP_NS, sitemaps
    )
}

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

fn pages(base_url: &str, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| format!("{}/{}", base_url, name))
        .collect()
}

fn locations(entries: &[SitemapEntry]) -> Vec<String> {
    entries.iter().map(|e| e.loc.clone()).collect()
}

async fn serve(mock_server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(mock_server)
        .await;
}

/// Mounts robots.txt -> sitemap index -> two urlsets with 3 and 2 entries
async fn mount_site(mock_server: &MockServer) -> String {
    let base_url = mock_server.uri();

    serve(
        mock_server,
        "/robots.txt",
        format!("User-agent: *\nDisallow: /private\nSitemap: {}/sitemap_index.xml\n", base_url),
    )
    .await;
    serve(
        mock_server,
        "/sitemap_index.xml",
        index(&pages(&base_url, &["posts.xml", "pages.xml"])),
    )
    .await;
    serve(
        mock_server,
        "/posts.xml",
        urlset(&pages(&base_url, &["post-1", "post-2", "post-3"])),
    )
    .await;
    serve(
        mock_server,
        "/pages.xml",
        urlset(&pages(&base_url, &["about", "contact"])),
    )
    .await;

    base_url
}

#[tokio::test]
async fn test_sitemap_index_from_robots() {
    let mock_server = MockServer::start().await;
    let base_url = mount_site(&mock_server).await;

    let robots = Robots::from_config(&create_test_config(&base_url)).unwrap();
    robots.load().await.expect("Load failed");

    let links = robots.sitemap_links(None).await.expect("Aggregation failed");

    assert_eq!(
        locations(&links),
        pages(&base_url, &["post-1", "post-2", "post-3", "about", "contact"])
    );
    assert_eq!(links[0].lastmod.as_deref(), Some("2024-01-01"));
    assert_eq!(links[0].priority.as_deref(), Some("0.5"));
    assert_eq!(links[0].changefreq, None);
}

#[tokio::test]
async fn test_explicit_sitemap_url_overrides_robots() {
    let mock_server = MockServer::start().await;
    let base_url = mount_site(&mock_server).await;

    let robots = Robots::from_config(&create_test_config(&base_url)).unwrap();

    // No load needed when the seed is given explicitly
    let links = robots
        .sitemap_links(Some(&format!("{}/pages.xml", base_url)))
        .await
        .expect("Aggregation failed");

    assert_eq!(locations(&links), pages(&base_url, &["about", "contact"]));
}

#[tokio::test]
async fn test_gzipped_sitemap_index() {
    let mock_server = MockServer::start().await;
    let base_url = mount_site(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/sitemap_index.xml.gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(gzip(&index(&pages(&base_url, &["pages.xml"]))))
                .insert_header("content-type", "application/x-gzip"),
        )
        .mount(&mock_server)
        .await;

    let robots = Robots::new(&base_url, "TestBot/1.0").unwrap();
    let links = robots
        .sitemap_links(Some(&format!("{}/sitemap_index.xml.gz", base_url)))
        .await
        .expect("Aggregation failed");

    assert_eq!(locations(&links), pages(&base_url, &["about", "contact"]));
}

#[tokio::test]
async fn test_failing_sitemaps_are_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    serve(
        &mock_server,
        "/robots.txt",
        format!(
            "Sitemap: {0}/a-broken.xml\nSitemap: {0}/b-missing.xml\nSitemap: {0}/c-good.xml\n",
            base_url
        ),
    )
    .await;
    serve(
        &mock_server,
        "/a-broken.xml",
        "<html><body>Not a sitemap</body></html>".to_string(),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/b-missing.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    serve(
        &mock_server,
        "/c-good.xml",
        urlset(&pages(&base_url, &["kept"])),
    )
    .await;

    let robots = Robots::new(&base_url, "TestBot/1.0").unwrap();
    robots.load().await.expect("Load failed");

    let links = robots.sitemap_links(None).await.expect("Aggregation failed");
    assert_eq!(locations(&links), pages(&base_url, &["kept"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blocking_api() {
    let mock_server = MockServer::start().await;
    let base_url = mount_site(&mock_server).await;

    let robots = Robots::new(&base_url, "TestBot/1.0").unwrap();
    robots.load_blocking().expect("Load failed");
    assert!(robots.is_path_disallowed("/private", "*"));

    let links = robots
        .sitemap_links_blocking(None)
        .expect("Aggregation failed");
    assert_eq!(links.len(), 5);
}
