//! Sitemap aggregation module
//!
//! This module expands sitemap seed URLs into a flat list of URL entries:
//! - Seeds ending in `.gz` are gunzipped before decoding
//! - A sitemap index is followed one level into its child sitemaps
//! - A plain urlset seed contributes its entries directly
//!
//! Every failure (fetch, gzip, XML) is confined to the URL it happened on and
//! logged; it never aborts the remaining seeds.

mod decode;
mod types;

pub use decode::{decode_document, decode_sitemap_index, decode_urlset, gunzip, SitemapError};
pub use types::{SitemapDocument, SitemapEntry, SitemapIndex, SitemapIndexEntry, UrlSet};

use crate::transport::Transport;

const GZIP_SUFFIX: &str = ".gz";

/// Fetches and expands every seed, in order
///
/// # Arguments
///
/// * `transport` - Used for every fetch
/// * `seeds` - Sitemap or sitemap index URLs
///
/// # Returns
///
/// All entries found, in fetch order and without deduplication
pub async fn collect_sitemap_links<T: Transport>(
    transport: &T,
    seeds: &[String],
) -> Vec<SitemapEntry> {
    let mut links = Vec::new();

    for seed in seeds {
        expand_seed(transport, seed, &mut links).await;
    }

    tracing::info!(
        "Collected {} sitemap entries from {} seed(s)",
        links.len(),
        seeds.len()
    );
    links
}

async fn expand_seed<T: Transport>(transport: &T, seed: &str, links: &mut Vec<SitemapEntry>) {
    tracing::debug!("Fetching sitemap {}", seed);

    let body = match transport.fetch_bytes(seed).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Skipping sitemap {}: {}", seed, e);
            return;
        }
    };

    let document = match decode_seed(seed, &body) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Skipping sitemap {}: {}", seed, e);
            return;
        }
    };

    match document {
        SitemapDocument::Index(index) => {
            tracing::debug!(
                "Sitemap index {} lists {} sitemap(s)",
                seed,
                index.sitemaps.len()
            );
            for child in &index.sitemaps {
                links.extend(fetch_child(transport, &child.loc).await);
            }
        }
        SitemapDocument::UrlSet(urlset) => {
            tracing::debug!("Sitemap {} lists {} URL(s)", seed, urlset.urls.len());
            links.extend(urlset.urls);
        }
    }
}

fn decode_seed(url: &str, body: &[u8]) -> Result<SitemapDocument, SitemapError> {
    if url.ends_with(GZIP_SUFFIX) {
        decode_document(&gunzip(body)?)
    } else {
        decode_document(body)
    }
}

// Children of an index are decoded as-is: only seed URLs get the .gz check.
async fn fetch_child<T: Transport>(transport: &T, url: &str) -> Vec<SitemapEntry> {
    let body = match transport.fetch_bytes(url).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Skipping child sitemap {}: {}", url, e);
            return Vec::new();
        }
    };

    match decode_urlset(&body) {
        Ok(urlset) => {
            tracing::debug!("Child sitemap {} lists {} URL(s)", url, urlset.urls.len());
            urlset.urls
        }
        Err(e) => {
            tracing::warn!("Skipping child sitemap {}: {}", url, e);
            Vec::new()
        }
    }
}
