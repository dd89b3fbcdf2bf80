//! Disambiguation run metrics.
//!
//! Metrics are opt-in: [`Disambiguator::disambiguate`](crate::Disambiguator::disambiguate)
//! collects nothing, while `disambiguate_with_metrics` records one
//! [`RuleMetrics`] entry per applied rule.
//!
//! `kept_original` is the number of times a rule left a token untouched
//! because its action would have removed every reading. Rule authors use it to
//! spot filters that are too strict for the data they see.

use std::time::Duration;

use super::rule::RuleOutcome;

/// Counters for one rule over one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMetrics {
    /// Id of the rule.
    pub rule_id: String,
    /// Name of the stage the rule belongs to.
    pub stage: String,
    /// Matched windows.
    pub matches: usize,
    /// Tokens whose readings changed.
    pub changed: usize,
    /// Tokens that kept their readings instead of being emptied.
    pub kept_original: usize,
}

impl RuleMetrics {
    pub fn from_outcome(stage: &str, rule_id: &str, outcome: RuleOutcome) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            stage: stage.to_string(),
            matches: outcome.matches,
            changed: outcome.changed,
            kept_original: outcome.kept_original,
        }
    }
}

/// Metrics for one call of `disambiguate_with_metrics`.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Total elapsed time.
    pub total: Duration,
    /// Number of stages that actually ran.
    pub stages: usize,
    /// Per-rule counters, in application order.
    pub rules: Vec<RuleMetrics>,
}

impl RunMetrics {
    /// Rules that matched at least once.
    pub fn fired(&self) -> impl Iterator<Item = &RuleMetrics> {
        self.rules.iter().filter(|r| r.matches > 0)
    }

    pub fn kept_original(&self) -> usize {
        self.rules.iter().map(|r| r.kept_original).sum()
    }

    pub fn changed(&self) -> usize {
        self.rules.iter().map(|r| r.changed).sum()
    }

    /// Fold the metrics of a later stage into these.
    pub fn absorb(&mut self, other: RunMetrics) {
        self.stages += other.stages;
        self.rules.extend(other.rules);
    }
}
