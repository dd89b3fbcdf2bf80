//! Single-source disambiguator: one rule set, applied rule by rule.

use std::sync::Arc;
use std::time::Instant;

use super::metrics::{RuleMetrics, RunMetrics};
use super::rule_set::RuleSet;
use crate::errors::Result;
use crate::pipeline::Disambiguator;
use crate::sentence::AnalyzedSentence;

/// Applies an ordered [`RuleSet`] to sentences.
///
/// The rule set is shared behind an `Arc` and never mutated, so one instance
/// can be cloned into many workers or called concurrently.
#[derive(Debug, Clone)]
pub struct RuleDisambiguator {
    name: String,
    rules: Arc<RuleSet>,
}

impl RuleDisambiguator {
    pub fn new(name: impl Into<String>, rules: RuleSet) -> Self {
        Self { name: name.into(), rules: Arc::new(rules) }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Apply every rule in order. Never fails.
    pub fn run(&self, sentence: AnalyzedSentence) -> AnalyzedSentence {
        let mut sentence = sentence;
        for rule in self.rules.iter() {
            let outcome = rule.apply(&mut sentence);
            if super::debug_rules() && outcome.matches > 0 {
                eprintln!(
                    "[{}] {} matched={} changed={} kept_original={}",
                    self.name,
                    rule.id(),
                    outcome.matches,
                    outcome.changed,
                    outcome.kept_original
                );
            }
        }
        sentence
    }

    /// Apply every rule in order, recording per-rule counters.
    pub fn run_with_metrics(&self, sentence: AnalyzedSentence) -> (AnalyzedSentence, RunMetrics) {
        let started = Instant::now();
        let mut sentence = sentence;
        let mut rules = Vec::with_capacity(self.rules.len());

        for rule in self.rules.iter() {
            let outcome = rule.apply(&mut sentence);
            rules.push(RuleMetrics::from_outcome(&self.name, rule.id(), outcome));
        }

        (sentence, RunMetrics { total: started.elapsed(), stages: 1, rules })
    }
}

impl Disambiguator for RuleDisambiguator {
    fn name(&self) -> &str {
        &self.name
    }

    fn disambiguate(&self, sentence: AnalyzedSentence) -> Result<AnalyzedSentence> {
        Ok(self.run(sentence))
    }

    fn disambiguate_with_metrics(&self, sentence: AnalyzedSentence) -> Result<(AnalyzedSentence, RunMetrics)> {
        Ok(self.run_with_metrics(sentence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Action, DisambiguationRule, PatternElement, ReadingFilter, ReadingTemplate, anchored};
    use crate::sentence::Reading;

    fn tag(pattern: &str) -> PatternElement {
        PatternElement::any().with_tag(anchored(pattern, true).unwrap())
    }

    fn sentence() -> AnalyzedSentence {
        "to=to/TO walk=walk/NN|walk/VB".parse().unwrap()
    }

    #[test]
    fn empty_rule_set_is_identity() {
        let d = RuleDisambiguator::new("empty", RuleSet::empty());
        assert_eq!(d.run(sentence()), sentence());
    }

    #[test]
    fn later_rules_see_earlier_effects() {
        // r1 adds a marker reading; r2 only matches once the marker is there.
        let r1 = DisambiguationRule::new(
            "MARK_TO",
            vec![tag("TO"), tag("NN|VB").marked()],
            Action::AddReading(ReadingTemplate::tag("AFTER_TO")),
        )
        .unwrap();
        let r2 = DisambiguationRule::new(
            "KEEP_VB",
            vec![tag("AFTER_TO")],
            Action::FilterReadings(ReadingFilter::tag(anchored("VB", true).unwrap())),
        )
        .unwrap();

        let d = RuleDisambiguator::new("ordered", RuleSet::new(vec![r1.clone(), r2.clone()]));
        assert_eq!(d.run(sentence()).tokens()[1].readings(), &[Reading::new("walk", "VB")]);

        let reversed = RuleDisambiguator::new("reversed", RuleSet::new(vec![r2, r1]));
        assert_eq!(reversed.run(sentence()).tokens()[1].readings().len(), 3);
    }

    #[test]
    fn metrics_have_one_entry_per_rule() {
        let rule = DisambiguationRule::new(
            "TO_VB",
            vec![tag("TO"), tag("NN|VB").marked()],
            Action::FilterReadings(ReadingFilter::tag(anchored("VB", true).unwrap())),
        )
        .unwrap();
        let d = RuleDisambiguator::new("builtin", RuleSet::new(vec![rule]));

        let (out, metrics) = d.run_with_metrics(sentence());

        assert_eq!(out.tokens()[1].readings(), &[Reading::new("walk", "VB")]);
        assert_eq!(metrics.rules.len(), 1);
        assert_eq!(metrics.rules[0].stage, "builtin");
        assert_eq!(metrics.fired().count(), 1);
        assert_eq!(metrics.changed(), 1);
    }

    #[test]
    fn shared_across_threads() {
        let rule = DisambiguationRule::new(
            "TO_VB",
            vec![tag("TO"), tag("NN|VB").marked()],
            Action::FilterReadings(ReadingFilter::tag(anchored("VB", true).unwrap())),
        )
        .unwrap();
        let d = RuleDisambiguator::new("builtin", RuleSet::new(vec![rule]));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let out = d.disambiguate(sentence()).unwrap();
                    assert_eq!(out.to_string(), "to=to/TO walk=walk/VB");
                });
            }
        });
    }
}
