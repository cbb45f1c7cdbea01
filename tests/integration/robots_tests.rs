use crate::create_test_config;
use robots_sitemap::{Robots, RobotsError, TransportError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROBOTS_TXT: &str = "# Example robots.txt
User-agent: *
Disallow: /admin
Allow: /admin/public

User-agent: BadBot
Disallow: /

Sitemap: https://example.com/sitemap.xml
Crawl-delay: 5
";

async fn serve_robots(mock_server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_load_robots_over_http() {
    let mock_server = MockServer::start().await;
    serve_robots(&mock_server, ROBOTS_TXT).await;

    let robots = Robots::from_config(&create_test_config(&mock_server.uri()))
        .expect("Failed to create robots");
    robots.load().await.expect("Load failed");

    assert_eq!(robots.user_agent_count().unwrap(), 2);
    assert_eq!(
        robots.user_agents().unwrap(),
        vec!["*".to_string(), "BadBot".to_string()]
    );
    assert!(robots.is_path_disallowed("/admin", "*"));
    assert!(robots.is_path_allowed("/admin/public", "*"));
    assert!(robots.is_path_disallowed("/", "BadBot"));
    assert!(!robots.is_path_disallowed("/admin", "BadBot"));
    assert_eq!(
        robots.sitemaps().unwrap(),
        vec!["https://example.com/sitemap.xml".to_string()]
    );
    assert_eq!(robots.crawl_delay(), 5);
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact; test@example.com)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let robots = Robots::from_config(&create_test_config(&mock_server.uri())).unwrap();
    robots.load().await.expect("Load failed");
    assert_eq!(robots.user_agent_count().unwrap(), 1);
}

#[tokio::test]
async fn test_robots_resolved_against_base_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/blog/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: Blog\n"))
        .mount(&mock_server)
        .await;

    let base = format!("{}/blog/", mock_server.uri());
    let robots = Robots::new(&base, "TestBot/1.0").unwrap();
    robots.load().await.expect("Load failed");

    assert_eq!(robots.user_agents().unwrap(), vec!["Blog".to_string()]);
}

#[tokio::test]
async fn test_http_error_status_fails_load() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let robots = Robots::new(&mock_server.uri(), "TestBot/1.0").unwrap();
    let result = robots.load().await;

    assert!(matches!(
        result,
        Err(RobotsError::Transport(TransportError::Status { status: 404, .. }))
    ));
    assert!(matches!(robots.user_agents(), Err(RobotsError::NotLoaded)));
}

#[tokio::test]
async fn test_unrecognized_directive_fails_load() {
    let mock_server = MockServer::start().await;
    serve_robots(&mock_server, "User-agent: *\nHost: example.com\n").await;

    let robots = Robots::new(&mock_server.uri(), "TestBot/1.0").unwrap();
    let result = robots.load().await;

    assert!(matches!(
        result,
        Err(RobotsError::Syntax { line_number: 2, ref line }) if line == "Host: example.com"
    ));
    assert!(matches!(robots.user_agent_count(), Err(RobotsError::NotLoaded)));
}

#[tokio::test]
async fn test_malformed_crawl_delay_fails_load() {
    let mock_server = MockServer::start().await;
    serve_robots(&mock_server, "User-agent: *\nCrawl-delay: ten\n").await;

    let robots = Robots::new(&mock_server.uri(), "TestBot/1.0").unwrap();
    assert!(matches!(
        robots.load().await,
        Err(RobotsError::CrawlDelay { .. })
    ));
}

#[tokio::test]
async fn test_crlf_line_endings() {
    let mock_server = MockServer::start().await;
    serve_robots(&mock_server, "User-agent: *\r\nDisallow: /tmp\r\n\r\n").await;

    let robots = Robots::new(&mock_server.uri(), "TestBot/1.0").unwrap();
    robots.load().await.expect("Load failed");

    assert!(robots.is_path_disallowed("/tmp", "*"));
}

#[test]
fn test_invalid_base_url() {
    assert!(matches!(
        Robots::new("not a url", "TestBot/1.0"),
        Err(RobotsError::InvalidBaseUrl { .. })
    ));
}

/// Mock server running on its own thread and runtime
///
/// Keeps serving while the test's own runtime is blocked.
struct ThreadedServer {
    uri: String,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl ThreadedServer {
    fn start(robots_txt: &'static str) -> Self {
        let (uri_tx, uri_rx) = std::sync::mpsc::channel();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build server runtime");
            runtime.block_on(async move {
                let mock_server = MockServer::start().await;
                serve_robots(&mock_server, robots_txt).await;
                uri_tx.send(mock_server.uri()).expect("Test dropped the server");
                let _ = shutdown_rx.await;
            });
        });

        let uri = uri_rx.recv().expect("Server thread failed to start");
        Self {
            uri,
            shutdown: Some(shutdown_tx),
            thread: Some(thread),
        }
    }
}

impl Drop for ThreadedServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blocking_load_after_async_load_reuses_runtime() {
    let server = ThreadedServer::start(ROBOTS_TXT);
    let robots = Robots::from_config(&create_test_config(&server.uri))
        .expect("Failed to create robots");

    // The async load leaves a pooled keep-alive connection owned by this runtime
    robots.load().await.expect("Async load failed");
    robots.load_blocking().expect("Blocking load failed");
    robots.load().await.expect("Async reload failed");

    assert!(robots.is_path_disallowed("/", "BadBot"));
    assert_eq!(robots.crawl_delay(), 5);
}

#[tokio::test]
async fn test_blocking_load_in_current_thread_runtime_is_refused() {
    let server = ThreadedServer::start(ROBOTS_TXT);
    let robots = Robots::from_config(&create_test_config(&server.uri))
        .expect("Failed to create robots");
    robots.load().await.expect("Async load failed");

    let result = robots.load_blocking();

    assert!(matches!(result, Err(RobotsError::Runtime(_))));
    // The refused call never ran, so the earlier model is still in place
    assert!(robots.is_path_disallowed("/admin", "*"));
    assert!(matches!(
        robots.sitemap_links_blocking(None),
        Err(RobotsError::Runtime(_))
    ));
}
