//! Configuration module for Robots-Sitemap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use robots_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("robots.txt will be read from: {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HttpConfig, SiteConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
