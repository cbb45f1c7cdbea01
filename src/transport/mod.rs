//! Transport layer for robots.txt and sitemap fetching
//!
//! This module defines the [`Transport`] seam the parser and the sitemap
//! aggregator fetch through, plus two implementations:
//! - [`HttpTransport`] for real sites, built on reqwest
//! - [`MemoryTransport`] serving canned bodies, for tests and offline use

mod http;
mod memory;

pub use http::{build_http_client, HttpTransport};
pub use memory::MemoryTransport;

use crate::TransportError;
use std::future::Future;

/// Fetches resources by URL
///
/// Implementations must be shareable across tasks; both methods may suspend.
pub trait Transport: Send + Sync {
    /// Fetches `url` and decodes the body as text
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Fetches `url` and returns the raw body bytes
    fn fetch_bytes(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}
