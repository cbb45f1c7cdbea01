//! Sitemap document records
//!
//! Field names follow the sitemaps.org 0.9 schema. Metadata is carried as
//! the raw element text and never interpreted.

use serde::Deserialize;

/// One `<url>` entry of a urlset document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SitemapEntry {
    /// Page location
    pub loc: String,

    /// Last modification date, as written
    #[serde(default)]
    pub lastmod: Option<String>,

    /// Change frequency hint (e.g. "daily")
    #[serde(default)]
    pub changefreq: Option<String>,

    /// Priority hint (e.g. "0.8")
    #[serde(default)]
    pub priority: Option<String>,
}

/// One `<sitemap>` entry of a sitemap index document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SitemapIndexEntry {
    /// Child sitemap location
    pub loc: String,

    #[serde(default)]
    pub lastmod: Option<String>,
}

/// `<urlset>` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UrlSet {
    #[serde(rename = "url", default)]
    pub urls: Vec<SitemapEntry>,
}

/// `<sitemapindex>` document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SitemapIndex {
    #[serde(rename = "sitemap", default)]
    pub sitemaps: Vec<SitemapIndexEntry>,
}

/// A decoded top-level sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    Index(SitemapIndex),
    UrlSet(UrlSet),
}
