//! Integration tests against mock HTTP servers
//!
//! These tests use wiremock to serve robots.txt and sitemap documents and
//! drive the real HTTP transport end-to-end.

mod robots_tests;
mod sitemap_tests;

use robots_sitemap::config::{Config, HttpConfig, SiteConfig, UserAgentConfig};

/// Creates a test configuration pointing at the given base URL
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            sitemap_url: None,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        http: HttpConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
            https_only: false,
        },
    }
}
