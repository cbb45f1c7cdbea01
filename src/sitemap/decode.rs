//! Sitemap body decoding
//!
//! Gzip decompression and schema-aware XML binding. The root element decides
//! which schema a body is bound to; serde only ever sees the schema the root
//! names.

use crate::sitemap::{SitemapDocument, SitemapIndex, UrlSet};
use flate2::read::GzDecoder;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use thiserror::Error;

const URLSET_ROOT: &str = "urlset";
const SITEMAP_INDEX_ROOT: &str = "sitemapindex";

/// Errors decoding a sitemap body
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Failed to decompress gzip body: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("Sitemap is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Malformed sitemap XML: {0}")]
    Xml(String),

    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },
}

/// Decompresses a gzip byte stream
pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, SitemapError> {
    let mut decoder = GzDecoder::new(bytes);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

/// Decodes a top-level sitemap body as either an index or a urlset
///
/// # Examples
///
/// ```
/// use robots_sitemap::sitemap::{decode_document, SitemapDocument};
///
/// let xml = br#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <sitemap><loc>https://example.com/a.xml</loc></sitemap>
/// </sitemapindex>"#;
///
/// match decode_document(xml).unwrap() {
///     SitemapDocument::Index(index) => assert_eq!(index.sitemaps.len(), 1),
///     SitemapDocument::UrlSet(_) => unreachable!(),
/// }
/// ```
pub fn decode_document(bytes: &[u8]) -> Result<SitemapDocument, SitemapError> {
    let xml = as_text(bytes)?;
    match root_element(xml)?.as_str() {
        SITEMAP_INDEX_ROOT => from_xml(xml).map(SitemapDocument::Index),
        URLSET_ROOT => from_xml(xml).map(SitemapDocument::UrlSet),
        other => Err(SitemapError::UnexpectedRoot {
            expected: SITEMAP_INDEX_ROOT,
            found: other.to_string(),
        }),
    }
}

/// Decodes a body that must be a `<urlset>` document
pub fn decode_urlset(bytes: &[u8]) -> Result<UrlSet, SitemapError> {
    let xml = as_text(bytes)?;
    expect_root(xml, URLSET_ROOT)?;
    from_xml(xml)
}

/// Decodes a body that must be a `<sitemapindex>` document
pub fn decode_sitemap_index(bytes: &[u8]) -> Result<SitemapIndex, SitemapError> {
    let xml = as_text(bytes)?;
    expect_root(xml, SITEMAP_INDEX_ROOT)?;
    from_xml(xml)
}

fn as_text(bytes: &[u8]) -> Result<&str, SitemapError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

fn from_xml<T: serde::de::DeserializeOwned>(xml: &str) -> Result<T, SitemapError> {
    quick_xml::de::from_str(xml).map_err(|e| SitemapError::Xml(e.to_string()))
}

fn expect_root(xml: &str, expected: &'static str) -> Result<(), SitemapError> {
    let found = root_element(xml)?;
    if found == expected {
        Ok(())
    } else {
        Err(SitemapError::UnexpectedRoot { expected, found })
    }
}

/// Local name of the first element, ignoring any namespace prefix
fn root_element(xml: &str) -> Result<String, SitemapError> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                return Ok(String::from_utf8_lossy(element.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) => {
                return Err(SitemapError::Xml("document has no root element".to_string()));
            }
            Ok(_) => {}
            Err(e) => return Err(SitemapError::Xml(e.to_string())),
        }
    }
}
