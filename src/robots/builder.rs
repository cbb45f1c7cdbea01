//! Rule-set builder
//!
//! Folds classified directives into a [`RobotsModel`]. The current user-agent
//! cursor lives in the accumulator, so building is a pure function of the
//! directive sequence.

use crate::robots::{AgentRules, Directive, RobotsModel};
use crate::{Result, RobotsError};

/// Agent that rules apply to before any `User-agent:` line
pub const DEFAULT_AGENT: &str = "*";

/// Accumulator threaded through the directive sequence
#[derive(Debug, Clone)]
pub struct RuleSetBuilder {
    current_agent: String,
    model: RobotsModel,
}

impl Default for RuleSetBuilder {
    fn default() -> Self {
        Self {
            current_agent: DEFAULT_AGENT.to_string(),
            model: RobotsModel::default(),
        }
    }
}

impl RuleSetBuilder {
    /// Applies one directive, consuming and returning the accumulator
    ///
    /// # Arguments
    ///
    /// * `line_number` - 1-based line of the directive, used in errors
    /// * `directive` - The classified line
    ///
    /// # Returns
    ///
    /// * `Ok(RuleSetBuilder)` - The updated accumulator
    /// * `Err(RobotsError)` - `Syntax` for unrecognized lines, `CrawlDelay` for
    ///   a non-integer delay
    pub fn apply(mut self, line_number: usize, directive: Directive) -> Result<Self> {
        match directive {
            Directive::UserAgent(name) => {
                // Redeclaring an agent starts its block over
                self.model
                    .agents
                    .insert(name.clone(), AgentRules::default());
                self.current_agent = name;
            }
            Directive::Allow(path) => {
                self.current_rules().allowed.insert(path);
            }
            Directive::Disallow(path) => {
                self.current_rules().disallowed.insert(path);
            }
            Directive::Sitemap(url) => {
                self.model.sitemaps.insert(url);
            }
            Directive::CrawlDelay(value) => {
                self.model.crawl_delay = value
                    .parse::<i64>()
                    .map_err(|_| RobotsError::CrawlDelay { line_number, value })?;
            }
            Directive::Blank | Directive::Comment => {}
            Directive::Unrecognized(line) => {
                return Err(RobotsError::Syntax { line_number, line });
            }
        }
        Ok(self)
    }

    /// Returns the agent the next Allow/Disallow line will apply to
    pub fn current_agent(&self) -> &str {
        &self.current_agent
    }

    /// Finishes building and returns the model
    pub fn finish(self) -> RobotsModel {
        self.model
    }

    // Rules before any User-agent line land under "*", which then counts as
    // declared.
    fn current_rules(&mut self) -> &mut AgentRules {
        self.model
            .agents
            .entry(self.current_agent.clone())
            .or_default()
    }
}

/// Builds a model from a directive sequence
///
/// Stops at the first error; there is no partial result.
pub fn build_model<I>(directives: I) -> Result<RobotsModel>
where
    I: IntoIterator<Item = (usize, Directive)>,
{
    directives
        .into_iter()
        .try_fold(RuleSetBuilder::default(), |builder, (line_number, directive)| {
            tracing::trace!(line_number, ?directive, "Applying directive");
            builder.apply(line_number, directive)
        })
        .map(RuleSetBuilder::finish)
}
