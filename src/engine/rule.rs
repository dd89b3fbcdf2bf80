//! Disambiguation rules: a pattern over consecutive tokens plus an action.
//!
//! ## Matching
//!
//! A rule with `n` pattern elements looks at windows of exactly `n` tokens.
//! The scan is leftmost-first and left-to-right; when a window matches, the
//! action runs immediately and scanning resumes right after the window, so
//! matches of one rule never overlap:
//!
//! ```text
//! pattern: [DT] [NN|VB]
//! tokens:   a  walk  a  talk
//!           └──┬──┘  └──┬──┘
//!           match 1  match 2     (window "walk a" is never tried)
//! ```
//!
//! ## Targets
//!
//! The action applies at *target* positions of the window: the elements
//! flagged `MARKED`, or every position when no element is marked.
//!
//! ## Merge modes
//!
//! - `replace-readings`: install the rule's readings.
//! - `filter-readings`: keep readings accepted by the filter.
//! - `add-reading`: add one reading (no-op if already present).
//! - `unify`: keep readings whose feature value is shared by all targets.
//! - `remove-readings`: drop readings accepted by the filter.
//!
//! No mode may leave a token without readings. When it would, the token keeps
//! its original set and [`RuleOutcome::kept_original`] is incremented.

use std::collections::HashSet;

use regex::Regex;
use thiserror::Error;

use super::pattern::PatternElement;
use crate::sentence::{AnalyzedSentence, AnalyzedToken, Reading, Retained};

/// How an [`Action`] merges with the readings a token already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMode {
    ReplaceReadings,
    FilterReadings,
    AddReading,
    Unify,
    RemoveReadings,
}

impl MergeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MergeMode::ReplaceReadings => "replace-readings",
            MergeMode::FilterReadings => "filter-readings",
            MergeMode::AddReading => "add-reading",
            MergeMode::Unify => "unify",
            MergeMode::RemoveReadings => "remove-readings",
        }
    }
}

/// A reading to install, with an optional lemma.
///
/// Without a lemma the reading borrows the lemma of the target token's first
/// reading (its surface text if that is somehow unavailable).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingTemplate {
    pub lemma: Option<String>,
    pub tag: String,
}

impl ReadingTemplate {
    pub fn new(lemma: Option<&str>, tag: impl Into<String>) -> Self {
        Self { lemma: lemma.map(str::to_string), tag: tag.into() }
    }

    /// A template that keeps the token's own lemma.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self { lemma: None, tag: tag.into() }
    }

    /// Lemma and tag survive a round trip through the sentence text form.
    fn is_printable(&self) -> bool {
        let clean = |s: &str| !s.is_empty() && !s.chars().any(|c| c.is_whitespace() || c == '|');
        self.lemma.as_deref().is_none_or(clean) && clean(&self.tag) && !self.tag.contains('/')
    }

    fn instantiate(&self, token: &AnalyzedToken) -> Reading {
        let lemma = self.lemma.as_deref().unwrap_or_else(|| token.default_lemma());
        Reading::new(lemma, self.tag.clone())
    }
}

impl std::fmt::Display for ReadingTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.lemma.as_deref().unwrap_or(""), self.tag)
    }
}

/// Reading predicate used by `filter-readings` and `remove-readings`.
#[derive(Debug, Clone)]
pub struct ReadingFilter {
    pub tag: Regex,
    pub lemma: Option<Regex>,
}

impl ReadingFilter {
    pub fn tag(tag: Regex) -> Self {
        Self { tag, lemma: None }
    }

    pub fn accepts(&self, reading: &Reading) -> bool {
        self.tag.is_match(reading.tag()) && self.lemma.as_ref().is_none_or(|re| re.is_match(reading.lemma()))
    }
}

/// What a rule does to the readings at its target positions.
#[derive(Debug, Clone)]
pub enum Action {
    ReplaceReadings(Vec<ReadingTemplate>),
    FilterReadings(ReadingFilter),
    AddReading(ReadingTemplate),
    /// Capture group 1 of the regex, searched in the tag, is the feature value.
    Unify(Regex),
    RemoveReadings(ReadingFilter),
}

impl Action {
    pub fn mode(&self) -> MergeMode {
        match self {
            Action::ReplaceReadings(_) => MergeMode::ReplaceReadings,
            Action::FilterReadings(_) => MergeMode::FilterReadings,
            Action::AddReading(_) => MergeMode::AddReading,
            Action::Unify(_) => MergeMode::Unify,
            Action::RemoveReadings(_) => MergeMode::RemoveReadings,
        }
    }
}

/// Reasons a rule cannot be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("pattern has no elements")]
    EmptyPattern,
    #[error("replace-readings needs at least one reading")]
    EmptyReplacement,
    #[error("unify feature regex needs a capture group")]
    FeatureWithoutGroup,
    /// The sentence text form separates tokens by whitespace and readings by
    /// `|`, with `/` before the tag.
    #[error("reading '{0}' cannot be written in the sentence text form")]
    UnprintableReading(String),
}

/// Counters describing one application of a rule to one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Number of windows matched.
    pub matches: usize,
    /// Number of token reading sets that changed.
    pub changed: usize,
    /// Number of times a token kept its readings because the action would
    /// have emptied them.
    pub kept_original: usize,
}

impl RuleOutcome {
    pub fn is_noop(&self) -> bool {
        self.changed == 0
    }
}

/// A single disambiguation rule.
#[derive(Debug, Clone)]
pub struct DisambiguationRule {
    id: String,
    description: Option<String>,
    pattern: Vec<PatternElement>,
    action: Action,
    targets: Vec<usize>,
}

impl DisambiguationRule {
    pub fn new(id: impl Into<String>, pattern: Vec<PatternElement>, action: Action) -> Result<Self, RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        match &action {
            Action::ReplaceReadings(readings) if readings.is_empty() => return Err(RuleError::EmptyReplacement),
            Action::Unify(feature) if feature.captures_len() < 2 => return Err(RuleError::FeatureWithoutGroup),
            _ => {}
        }
        let templates: &[ReadingTemplate] = match &action {
            Action::ReplaceReadings(readings) => readings,
            Action::AddReading(reading) => std::slice::from_ref(reading),
            _ => &[],
        };
        if let Some(bad) = templates.iter().find(|t| !t.is_printable()) {
            return Err(RuleError::UnprintableReading(bad.to_string()));
        }

        let mut targets: Vec<usize> =
            pattern.iter().enumerate().filter(|(_, el)| el.is_marked()).map(|(idx, _)| idx).collect();
        if targets.is_empty() {
            targets = (0..pattern.len()).collect();
        }

        Ok(Self { id: id.into(), description: None, pattern, action, targets })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn pattern(&self) -> &[PatternElement] {
        &self.pattern
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn mode(&self) -> MergeMode {
        self.action.mode()
    }

    /// Window offsets the action applies to.
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Consume a sentence and return it with this rule applied.
    pub fn try_apply(&self, mut sentence: AnalyzedSentence) -> AnalyzedSentence {
        self.apply(&mut sentence);
        sentence
    }

    /// Apply the rule in place, left to right, without overlapping matches.
    pub fn apply(&self, sentence: &mut AnalyzedSentence) -> RuleOutcome {
        let width = self.pattern.len();
        let mut outcome = RuleOutcome::default();
        let mut start = 0;

        while start + width <= sentence.len() {
            if self.matches_at(sentence.tokens(), start) {
                outcome.matches += 1;
                self.perform(&mut sentence.tokens_mut()[start..start + width], &mut outcome);
                start += width;
            } else {
                start += 1;
            }
        }

        outcome
    }

    /// Does the window starting at `start` match the whole pattern?
    pub fn matches_at(&self, tokens: &[AnalyzedToken], start: usize) -> bool {
        tokens
            .get(start..start + self.pattern.len())
            .is_some_and(|window| self.pattern.iter().zip(window).all(|(el, token)| el.matches(token)))
    }

    fn perform(&self, window: &mut [AnalyzedToken], outcome: &mut RuleOutcome) {
        match &self.action {
            Action::ReplaceReadings(templates) => {
                for &idx in &self.targets {
                    let token = &mut window[idx];
                    let readings: Vec<Reading> = templates.iter().map(|t| t.instantiate(token)).collect();
                    if token.readings() != readings.as_slice() && token.set_readings(readings) {
                        outcome.changed += 1;
                    }
                }
            }
            Action::FilterReadings(filter) => {
                for &idx in &self.targets {
                    record(window[idx].retain_readings(|r| filter.accepts(r)), outcome);
                }
            }
            Action::RemoveReadings(filter) => {
                for &idx in &self.targets {
                    record(window[idx].retain_readings(|r| !filter.accepts(r)), outcome);
                }
            }
            Action::AddReading(template) => {
                for &idx in &self.targets {
                    let reading = template.instantiate(&window[idx]);
                    if window[idx].add_reading(reading) {
                        outcome.changed += 1;
                    }
                }
            }
            Action::Unify(feature) => self.unify(feature, window, outcome),
        }
    }

    fn unify(&self, feature: &Regex, window: &mut [AnalyzedToken], outcome: &mut RuleOutcome) {
        // Targets whose readings carry no feature value take no part in unification.
        let profiles: Vec<(usize, HashSet<String>)> = self
            .targets
            .iter()
            .map(|&idx| {
                let values = window[idx].readings().iter().filter_map(|r| feature_value(feature, r)).map(str::to_string);
                (idx, values.collect::<HashSet<String>>())
            })
            .filter(|(_, values)| !values.is_empty())
            .collect();

        let Some(((_, first), rest)) = profiles.split_first() else {
            return;
        };
        let common: HashSet<&String> =
            first.iter().filter(|value| rest.iter().all(|(_, other)| other.contains(*value))).collect();

        if common.is_empty() {
            outcome.kept_original += profiles.len();
            return;
        }

        for (idx, _) in &profiles {
            let kept = window[*idx]
                .retain_readings(|r| feature_value(feature, r).is_some_and(|v| common.iter().any(|c| c.as_str() == v)));
            record(kept, outcome);
        }
    }
}

fn feature_value<'r>(feature: &Regex, reading: &'r Reading) -> Option<&'r str> {
    feature.captures(reading.tag()).and_then(|caps| caps.get(1)).map(|m| m.as_str())
}

fn record(retained: Retained, outcome: &mut RuleOutcome) {
    match retained {
        Retained::Narrowed => outcome.changed += 1,
        Retained::KeptOriginal => outcome.kept_original += 1,
        Retained::Unchanged => {}
    }
}
