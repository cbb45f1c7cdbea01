//! Robots.txt handling module
//!
//! This module provides fetching, parsing, and querying of a site's robots.txt.
//! Parsing is strict: any line that is not one of the supported directives, a
//! comment, or blank fails the whole load.

mod builder;
mod lexer;
mod model;

pub use builder::{build_model, RuleSetBuilder, DEFAULT_AGENT};
pub use lexer::{classify, classify_line, Directive};
pub use model::{AgentRules, RobotsModel};

use crate::config::Config;
use crate::sitemap::{collect_sitemap_links, SitemapEntry};
use crate::transport::{build_http_client, HttpTransport, Transport};
use crate::{runtime, Result, RobotsError};
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A site's robots.txt, fetched through a [`Transport`]
///
/// The parsed model is swapped in atomically on every successful load, so
/// concurrent readers always see either the previous or the new model.
///
/// # Example
///
/// ```no_run
/// use robots_sitemap::Robots;
///
/// # async fn example() -> robots_sitemap::Result<()> {
/// let robots = Robots::new("https://example.com/", "ExampleBot/1.0")?;
/// robots.load().await?;
///
/// if robots.is_path_disallowed("/admin", "*") {
///     println!("/admin is off limits");
/// }
/// for entry in robots.sitemap_links(None).await? {
///     println!("{}", entry.loc);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Robots<T = HttpTransport> {
    robots_url: Url,
    transport: T,
    model: ArcSwapOption<RobotsModel>,
}

impl Robots<HttpTransport> {
    /// Creates a robots.txt handle using the default HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The site URL; `robots.txt` is resolved against it
    /// * `user_agent` - Value sent in the User-Agent header
    ///
    /// # Returns
    ///
    /// * `Ok(Robots)` - Ready to load
    /// * `Err(RobotsError)` - `InvalidBaseUrl` or `Transport` if the client
    ///   could not be built
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let transport = HttpTransport::new(user_agent)?;
        Self::with_transport(base_url, transport)
    }

    /// Creates a robots.txt handle from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.http, &config.user_agent.header_value())?;
        Self::with_transport(&config.site.base_url, HttpTransport::from_client(client))
    }
}

impl<T: Transport> Robots<T> {
    /// Creates a robots.txt handle over a custom transport
    pub fn with_transport(base_url: &str, transport: T) -> Result<Self> {
        let robots_url = robots_url(base_url)?;
        Ok(Self {
            robots_url,
            transport,
            model: ArcSwapOption::empty(),
        })
    }

    /// The resolved robots.txt URL
    pub fn robots_url(&self) -> &Url {
        &self.robots_url
    }

    /// The transport every fetch goes through
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches and parses robots.txt, replacing any previous model
    ///
    /// On failure the previous model is discarded and queries report
    /// `NotLoaded` until a later load succeeds.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The new model is in place
    /// * `Err(RobotsError)` - `Transport`, `Syntax` or `CrawlDelay`
    pub async fn load(&self) -> Result<()> {
        let url = self.robots_url.as_str();
        tracing::debug!("Fetching robots.txt from {}", url);

        let parsed = match self.transport.fetch_text(url).await {
            Ok(text) => RobotsModel::parse(&text),
            Err(e) => Err(e.into()),
        };

        match parsed {
            Ok(model) => {
                tracing::info!(
                    "Loaded robots.txt from {} ({} agents, {} sitemaps, crawl delay {})",
                    url,
                    model.user_agent_count(),
                    model.sitemaps().len(),
                    model.crawl_delay()
                );
                self.model.store(Some(Arc::new(model)));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load robots.txt from {}: {}", url, e);
                self.model.store(None);
                Err(e)
            }
        }
    }

    /// [`Robots::load`] that gives up with `Cancelled` when `cancel` fires
    ///
    /// A cancelled load leaves the current model untouched.
    pub async fn load_with_cancel(&self, cancel: CancellationToken) -> Result<()> {
        tokio::select! {
            result = self.load() => result,
            _ = cancel.cancelled() => Err(RobotsError::Cancelled),
        }
    }

    /// Blocking form of [`Robots::load`]
    ///
    /// Inside a current-thread tokio runtime this fails with
    /// `RobotsError::Runtime`; call [`Robots::load`] there instead.
    pub fn load_blocking(&self) -> Result<()> {
        runtime::block_on(self.load())?
    }

    /// Snapshot of the current model
    ///
    /// The snapshot stays valid and unchanged across later reloads.
    pub fn model(&self) -> Result<Arc<RobotsModel>> {
        self.model.load_full().ok_or(RobotsError::NotLoaded)
    }

    /// True once a load has succeeded and no later load has failed
    pub fn is_loaded(&self) -> bool {
        self.model.load().is_some()
    }

    /// Number of distinct declared user-agents
    pub fn user_agent_count(&self) -> Result<usize> {
        Ok(self.model()?.user_agent_count())
    }

    /// Declared user-agent names
    pub fn user_agents(&self) -> Result<Vec<String>> {
        Ok(self.model()?.user_agents().map(str::to_string).collect())
    }

    /// Sitemap URLs declared anywhere in the file
    pub fn sitemaps(&self) -> Result<Vec<String>> {
        Ok(self.model()?.sitemaps().iter().cloned().collect())
    }

    /// Global crawl delay in seconds; 0 when unset or not loaded
    pub fn crawl_delay(&self) -> i64 {
        self.model
            .load_full()
            .map_or(0, |model| model.crawl_delay())
    }

    /// Every `Allow:` path for `agent`
    ///
    /// # Errors
    ///
    /// * `RobotsError::NotLoaded` - No successful load yet
    /// * `RobotsError::UnknownAgent` - The agent was never declared
    pub fn allowed_paths(&self, agent: &str) -> Result<Vec<String>> {
        Ok(self.model()?.allowed_paths(agent)?.iter().cloned().collect())
    }

    /// Every `Disallow:` path for `agent`
    ///
    /// # Errors
    ///
    /// * `RobotsError::NotLoaded` - No successful load yet
    /// * `RobotsError::UnknownAgent` - The agent was never declared
    pub fn disallowed_paths(&self, agent: &str) -> Result<Vec<String>> {
        Ok(self
            .model()?
            .disallowed_paths(agent)?
            .iter()
            .cloned()
            .collect())
    }

    /// Exact-match test against the `Allow:` paths of `agent`
    ///
    /// Returns `false` for undeclared agents and before any load.
    pub fn is_path_allowed(&self, path: &str, agent: &str) -> bool {
        self.model
            .load_full()
            .is_some_and(|model| model.is_path_allowed(path, agent))
    }

    /// Exact-match test against the `Disallow:` paths of `agent`
    pub fn is_path_disallowed(&self, path: &str, agent: &str) -> bool {
        self.model
            .load_full()
            .is_some_and(|model| model.is_path_disallowed(path, agent))
    }

    /// Expands sitemaps into their URL entries
    ///
    /// With `sitemap_url` set, that URL is the only seed. Otherwise every
    /// sitemap declared in robots.txt is a seed, which requires a loaded model.
    /// Failures for individual sitemaps are logged and skipped.
    ///
    /// # Arguments
    ///
    /// * `sitemap_url` - Optional seed override; an empty string counts as absent
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SitemapEntry>)` - All entries in fetch order, not deduplicated
    /// * `Err(RobotsError::NotLoaded)` - No override and no loaded model
    pub async fn sitemap_links(&self, sitemap_url: Option<&str>) -> Result<Vec<SitemapEntry>> {
        let seeds = match sitemap_url.filter(|url| !url.is_empty()) {
            Some(url) => vec![url.to_string()],
            None => self.sitemaps()?,
        };

        Ok(collect_sitemap_links(&self.transport, &seeds).await)
    }

    /// [`Robots::sitemap_links`] that gives up with `Cancelled` when `cancel` fires
    pub async fn sitemap_links_with_cancel(
        &self,
        sitemap_url: Option<&str>,
        cancel: CancellationToken,
    ) -> Result<Vec<SitemapEntry>> {
        tokio::select! {
            result = self.sitemap_links(sitemap_url) => result,
            _ = cancel.cancelled() => Err(RobotsError::Cancelled),
        }
    }

    /// Blocking form of [`Robots::sitemap_links`]
    ///
    /// Fails with `RobotsError::Runtime` inside a current-thread tokio runtime.
    pub fn sitemap_links_blocking(&self, sitemap_url: Option<&str>) -> Result<Vec<SitemapEntry>> {
        runtime::block_on(self.sitemap_links(sitemap_url))?
    }
}

/// Resolves `robots.txt` against a base URL
///
/// # Examples
///
/// ```
/// use robots_sitemap::robots::robots_url;
///
/// let url = robots_url("https://example.com/blog/").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/blog/robots.txt");
/// ```
pub fn robots_url(base_url: &str) -> Result<Url> {
    Url::parse(base_url)
        .and_then(|base| base.join("robots.txt"))
        .map_err(|source| RobotsError::InvalidBaseUrl {
            base: base_url.to_string(),
            source,
        })
}
