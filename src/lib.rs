//! Robots-Sitemap: a strict robots.txt model with sitemap expansion
//!
//! This crate fetches and parses a site's robots.txt into a queryable per-agent
//! model, and follows the declared sitemaps (including gzip-compressed ones and
//! one level of sitemap indexes) into a flat list of URL entries.

pub mod config;
pub mod robots;
mod runtime;
pub mod sitemap;
pub mod transport;

use thiserror::Error;

/// Main error type for robots.txt loading and querying
#[derive(Debug, Error)]
pub enum RobotsError {
    #[error("Invalid base URL '{base}': {source}")]
    InvalidBaseUrl {
        base: String,
        source: ::url::ParseError,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unrecognized robots.txt line {line_number}: {line:?}")]
    Syntax { line_number: usize, line: String },

    #[error("Invalid Crawl-delay on line {line_number}: {value:?}")]
    CrawlDelay { line_number: usize, value: String },

    #[error("robots.txt has not been loaded")]
    NotLoaded,

    #[error("User-agent not declared in robots.txt: {0}")]
    UnknownAgent(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Failed to start blocking runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by a [`transport::Transport`] implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request for {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("No resource registered for {url}")]
    NotFound { url: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for robots.txt operations
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use robots::{Directive, Robots, RobotsModel};
pub use sitemap::{SitemapEntry, SitemapError, SitemapIndexEntry};
pub use transport::{HttpTransport, MemoryTransport, Transport};
