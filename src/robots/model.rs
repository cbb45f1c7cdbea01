//! Parsed robots.txt model
//!
//! A [`RobotsModel`] is built once by [`crate::robots::build_model`] and is
//! read-only afterwards. All lookups are exact string membership tests.

use crate::{Result, RobotsError};
use std::collections::{BTreeMap, BTreeSet};

/// Allow and disallow paths declared under one user-agent block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentRules {
    pub allowed: BTreeSet<String>,
    pub disallowed: BTreeSet<String>,
}

/// The parsed contents of one robots.txt file
///
/// Every declared agent owns exactly one [`AgentRules`] entry, so the set of
/// agents and the keys of the allow/disallow maps can never drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsModel {
    pub(crate) agents: BTreeMap<String, AgentRules>,
    pub(crate) sitemaps: BTreeSet<String>,
    pub(crate) crawl_delay: i64,
}

impl RobotsModel {
    /// Parses robots.txt text into a model
    ///
    /// # Errors
    ///
    /// * `RobotsError::Syntax` - A line matched no known directive
    /// * `RobotsError::CrawlDelay` - A Crawl-delay value is not a base-10 integer
    ///
    /// # Examples
    ///
    /// ```
    /// use robots_sitemap::RobotsModel;
    ///
    /// let model = RobotsModel::parse("User-agent: *\nDisallow: /admin\n").unwrap();
    /// assert!(model.is_path_disallowed("/admin", "*"));
    /// assert!(!model.is_path_disallowed("/admin/sub", "*"));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        super::build_model(super::classify(text))
    }

    /// Number of distinct declared user-agents
    pub fn user_agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Declared user-agent names, in sorted order
    pub fn user_agents(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    /// Returns the rules declared for `agent`, if it was ever declared
    pub fn agent(&self, agent: &str) -> Option<&AgentRules> {
        self.agents.get(agent)
    }

    /// Global sitemap URLs, independent of any user-agent block
    pub fn sitemaps(&self) -> &BTreeSet<String> {
        &self.sitemaps
    }

    /// Last Crawl-delay value in the file, or 0 when none was given
    pub fn crawl_delay(&self) -> i64 {
        self.crawl_delay
    }

    /// Returns every `Allow:` path for `agent`
    ///
    /// There is no fallback to `*`.
    ///
    /// # Errors
    ///
    /// * `RobotsError::UnknownAgent` - The agent was never declared
    pub fn allowed_paths(&self, agent: &str) -> Result<&BTreeSet<String>> {
        self.rules_for(agent).map(|rules| &rules.allowed)
    }

    /// Returns every `Disallow:` path for `agent`
    ///
    /// # Errors
    ///
    /// * `RobotsError::UnknownAgent` - The agent was never declared
    pub fn disallowed_paths(&self, agent: &str) -> Result<&BTreeSet<String>> {
        self.rules_for(agent).map(|rules| &rules.disallowed)
    }

    /// True when `path` was declared exactly as `Allow:` under `agent`
    ///
    /// Undeclared agents yield `false` rather than an error.
    pub fn is_path_allowed(&self, path: &str, agent: &str) -> bool {
        self.agents
            .get(agent)
            .is_some_and(|rules| rules.allowed.contains(path))
    }

    /// True when `path` was declared exactly as `Disallow:` under `agent`
    pub fn is_path_disallowed(&self, path: &str, agent: &str) -> bool {
        self.agents
            .get(agent)
            .is_some_and(|rules| rules.disallowed.contains(path))
    }

    fn rules_for(&self, agent: &str) -> Result<&AgentRules> {
        self.agents
            .get(agent)
            .ok_or_else(|| RobotsError::UnknownAgent(agent.to_string()))
    }
}
