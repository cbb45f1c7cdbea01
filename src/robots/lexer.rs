//! Robots.txt line classification
//!
//! Each raw line is classified into exactly one [`Directive`]. Matching is
//! case-sensitive against a fixed set of prefixes, and only ASCII spaces are
//! trimmed from directive values.

/// One classified robots.txt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `User-agent: <name>`
    UserAgent(String),
    /// `Allow: <path>`
    Allow(String),
    /// `Disallow: <path>`
    Disallow(String),
    /// `Sitemap: <url>`
    Sitemap(String),
    /// `Crawl-delay: <seconds>`, kept unparsed until the builder sees it
    CrawlDelay(String),
    /// Zero-length line
    Blank,
    /// Line starting with `#`
    Comment,
    /// Anything else, with the raw line text
    Unrecognized(String),
}

const USER_AGENT: &str = "User-agent:";
const DISALLOW: &str = "Disallow:";
const ALLOW: &str = "Allow:";
const SITEMAP: &str = "Sitemap:";
const CRAWL_DELAY: &str = "Crawl-delay:";

/// Classifies a single line (without its trailing newline)
///
/// # Examples
///
/// ```
/// use robots_sitemap::robots::{classify_line, Directive};
///
/// assert_eq!(
///     classify_line("Disallow: /admin "),
///     Directive::Disallow("/admin".to_string())
/// );
/// assert_eq!(classify_line("# comment"), Directive::Comment);
/// ```
pub fn classify_line(line: &str) -> Directive {
    if line.is_empty() {
        return Directive::Blank;
    }

    if let Some(value) = line.strip_prefix(USER_AGENT) {
        Directive::UserAgent(trim_spaces(value))
    } else if let Some(value) = line.strip_prefix(DISALLOW) {
        Directive::Disallow(trim_spaces(value))
    } else if let Some(value) = line.strip_prefix(ALLOW) {
        Directive::Allow(trim_spaces(value))
    } else if let Some(value) = line.strip_prefix(SITEMAP) {
        Directive::Sitemap(trim_spaces(value))
    } else if let Some(value) = line.strip_prefix(CRAWL_DELAY) {
        Directive::CrawlDelay(trim_spaces(value))
    } else if line.starts_with('#') {
        Directive::Comment
    } else {
        Directive::Unrecognized(line.to_string())
    }
}

/// Splits robots.txt text into lines and classifies each one
///
/// Lines end at `\n` or `\r\n`. A leading UTF-8 byte order mark is dropped.
/// The iterator yields `(line_number, directive)` with 1-based line numbers.
pub fn classify(text: &str) -> impl Iterator<Item = (usize, Directive)> + '_ {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, classify_line(line)))
}

// Tabs and other whitespace are part of the value.
fn trim_spaces(value: &str) -> String {
    value.trim_matches(' ').to_string()
}
