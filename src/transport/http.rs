//! HTTP transport implementation
//!
//! This module handles all HTTP requests, including:
//! - Building HTTP clients with the configured user agent string
//! - GET requests for robots.txt text and sitemap bytes
//! - Error classification

use crate::config::HttpConfig;
use crate::transport::Transport;
use crate::TransportError;
use reqwest::{redirect::Policy, Client, Response};
use std::time::Duration;

/// Maximum redirect hops followed for a single request
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - Timeouts and scheme restrictions
/// * `user_agent` - The User-Agent header value sent with every request
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(TransportError)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use robots_sitemap::config::HttpConfig;
/// use robots_sitemap::transport::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default(), "ExampleBot/1.0").unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig, user_agent: &str) -> Result<Client, TransportError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .https_only(config.https_only)
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(|e| TransportError::Request {
            url: String::new(),
            message: format!("failed to build HTTP client: {}", e),
        })
}

/// [`Transport`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with default timeouts sending `user_agent`
    pub fn new(user_agent: &str) -> Result<Self, TransportError> {
        let client = build_http_client(&HttpConfig::default(), user_agent)?;
        Ok(Self { client })
    }

    /// Wraps an already configured client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &str) -> Result<Response, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}

impl Transport for HttpTransport {
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        tracing::debug!("GET {}", url);
        let response = self.get(url).await?;
        response.text().await.map_err(|e| classify_error(url, e))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        tracing::debug!("GET {} (bytes)", url);
        let response = self.get(url).await?;
        let body = response.bytes().await.map_err(|e| classify_error(url, e))?;
        Ok(body.to_vec())
    }
}

/// Maps a reqwest error onto the transport error kinds
fn classify_error(url: &str, error: reqwest::Error) -> TransportError {
    let url = url.to_string();
    if error.is_timeout() {
        TransportError::Timeout { url }
    } else if error.is_connect() {
        TransportError::Connect { url }
    } else {
        TransportError::Request {
            url,
            message: error.to_string(),
        }
    }
}
