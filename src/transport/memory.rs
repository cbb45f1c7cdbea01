//! In-memory transport
//!
//! Serves registered bodies by exact URL. Unregistered URLs fail with
//! `TransportError::NotFound`; failures can also be registered explicitly.

use crate::transport::Transport;
use crate::TransportError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Transport answering from a table of canned responses, keyed by URL
#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: RwLock<HashMap<String, Result<Vec<u8>, TransportError>>>,
    requests: RwLock<Vec<String>>,
}

impl MemoryTransport {
    /// Creates a transport with no registered responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryTransport::insert_text`]
    pub fn with_text(self, url: &str, body: &str) -> Self {
        self.insert_text(url, body);
        self
    }

    /// Builder form of [`MemoryTransport::insert_bytes`]
    pub fn with_bytes(self, url: &str, body: Vec<u8>) -> Self {
        self.insert_bytes(url, body);
        self
    }

    /// Builder form of [`MemoryTransport::insert_error`]
    pub fn with_error(self, url: &str, error: TransportError) -> Self {
        self.insert_error(url, error);
        self
    }

    /// Registers (or replaces) a text body for `url`
    pub fn insert_text(&self, url: &str, body: &str) {
        self.insert_bytes(url, body.as_bytes().to_vec());
    }

    /// Registers (or replaces) a raw body for `url`
    pub fn insert_bytes(&self, url: &str, body: Vec<u8>) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), Ok(body));
    }

    /// Makes every fetch of `url` fail with `error`
    pub fn insert_error(&self, url: &str, error: TransportError) {
        self.responses
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string(), Err(error));
    }

    /// URLs fetched so far, in request order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());

        self.responses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(TransportError::NotFound {
                    url: url.to_string(),
                })
            })
    }
}

impl Transport for MemoryTransport {
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        let body = self.respond(url)?;
        String::from_utf8(body).map_err(|e| TransportError::Request {
            url: url.to_string(),
            message: format!("body is not valid UTF-8: {}", e),
        })
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.respond(url)
    }
}
