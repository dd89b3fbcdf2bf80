//! Reading model: tagged sentences, their tokens and candidate readings.
//!
//! A sentence arrives here already tokenized and tagged: every token carries an
//! ordered list of candidate [`Reading`]s. Disambiguation only ever narrows,
//! replaces or extends that list; it never adds or removes tokens.
//!
//! ## Textual form
//!
//! Sentences have a compact textual form used by the CLI and by tests:
//!
//! ```text
//! He=he/PRP go=go/VB|go/VBP to=to/TO school=school/NN
//! ```
//!
//! Tokens are separated by whitespace. Each token is `surface=readings`, where
//! readings are `lemma/TAG` pairs joined by `|`. The lemma may be omitted
//! (`go=/VB`), in which case the surface text is used.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

/// One candidate interpretation of a token: a lemma and a part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reading {
    lemma: String,
    tag: String,
}

impl Reading {
    pub fn new(lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Self { lemma: lemma.into(), tag: tag.into() }
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.lemma, self.tag)
    }
}

/// A token of a tagged sentence.
///
/// Invariants:
/// - `readings` is never empty once the token has been constructed.
/// - `readings` holds no two structurally equal readings; insertion order is
///   preserved because downstream consumers may treat the first reading as the
///   default choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedToken {
    position: usize,
    text: String,
    readings: Vec<Reading>,
}

impl AnalyzedToken {
    /// Create a token, dropping duplicate readings.
    ///
    /// Returns `None` when `readings` is empty: a token must always carry at
    /// least one reading.
    pub fn new(position: usize, text: impl Into<String>, readings: Vec<Reading>) -> Option<Self> {
        let readings = dedup(readings);
        if readings.is_empty() {
            return None;
        }
        Some(Self { position, text: text.into(), readings })
    }

    /// Character offset of the token in the original text.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn has_reading(&self, reading: &Reading) -> bool {
        self.readings.contains(reading)
    }

    /// True when at least one reading's tag fully matches `tag`.
    pub fn has_tag_matching(&self, tag: &Regex) -> bool {
        self.readings.iter().any(|r| tag.is_match(&r.tag))
    }

    /// Lemma of the first reading, falling back to the surface text.
    pub fn default_lemma(&self) -> &str {
        self.readings.first().map(|r| r.lemma.as_str()).unwrap_or(&self.text)
    }

    /// Append `reading` unless an equal reading is already present.
    ///
    /// Returns `true` when the reading set changed.
    pub fn add_reading(&mut self, reading: Reading) -> bool {
        if self.has_reading(&reading) {
            return false;
        }
        self.readings.push(reading);
        true
    }

    /// Replace the whole reading set at once.
    ///
    /// An empty replacement is refused and leaves the token untouched; the
    /// return value tells whether the replacement was installed.
    pub fn set_readings(&mut self, readings: Vec<Reading>) -> bool {
        let readings = dedup(readings);
        if readings.is_empty() {
            return false;
        }
        self.readings = readings;
        true
    }

    /// Keep only the readings for which `keep` returns true.
    pub fn retain_readings<F>(&mut self, mut keep: F) -> Retained
    where
        F: FnMut(&Reading) -> bool,
    {
        let before = self.readings.len();
        let kept: Vec<Reading> = self.readings.iter().filter(|r| keep(r)).cloned().collect();
        if kept.is_empty() {
            return Retained::KeptOriginal;
        }
        if kept.len() == before {
            return Retained::Unchanged;
        }
        self.readings = kept;
        Retained::Narrowed
    }
}

/// Result of [`AnalyzedToken::retain_readings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retained {
    /// Some readings were dropped.
    Narrowed,
    /// Every reading satisfied the predicate.
    Unchanged,
    /// No reading satisfied the predicate; the original set was kept.
    KeptOriginal,
}

/// An ordered sequence of tagged tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzedSentence {
    tokens: Vec<AnalyzedToken>,
}

impl AnalyzedSentence {
    pub fn new(tokens: Vec<AnalyzedToken>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[AnalyzedToken] {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut [AnalyzedToken] {
        &mut self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_tokens(self) -> Vec<AnalyzedToken> {
        self.tokens
    }

    /// Total number of readings across all tokens.
    pub fn reading_count(&self) -> usize {
        self.tokens.iter().map(|t| t.readings.len()).sum()
    }
}

/// Writes the `surface=lemma/TAG|lemma/TAG ...` form. Lemmas and tags holding
/// whitespace or `|` do not parse back; rules refuse to install such readings.
impl fmt::Display for AnalyzedSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}=", token.text)?;
            for (ridx, reading) in token.readings.iter().enumerate() {
                if ridx > 0 {
                    f.write_str("|")?;
                }
                write!(f, "{reading}")?;
            }
        }
        Ok(())
    }
}

/// Error produced when parsing the textual sentence form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tagged token '{token}': {message}")]
pub struct ParseSentenceError {
    pub token: String,
    pub message: String,
}

impl FromStr for AnalyzedSentence {
    type Err = ParseSentenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Vec::new();
        let mut position = 0;

        for raw in s.split_whitespace() {
            let err = |message: &str| ParseSentenceError { token: raw.to_string(), message: message.to_string() };

            let (surface, readings) = raw.split_once('=').ok_or_else(|| err("expected surface=lemma/TAG"))?;
            if surface.is_empty() {
                return Err(err("empty surface text"));
            }

            let mut parsed = Vec::new();
            for item in readings.split('|') {
                let (lemma, tag) = item.rsplit_once('/').ok_or_else(|| err("reading must be lemma/TAG"))?;
                if tag.is_empty() {
                    return Err(err("empty tag"));
                }
                let lemma = if lemma.is_empty() { surface } else { lemma };
                parsed.push(Reading::new(lemma, tag));
            }

            let token = AnalyzedToken::new(position, surface, parsed).ok_or_else(|| err("token has no readings"))?;
            position += surface.chars().count() + 1;
            tokens.push(token);
        }

        Ok(AnalyzedSentence::new(tokens))
    }
}

fn dedup(readings: Vec<Reading>) -> Vec<Reading> {
    let mut out: Vec<Reading> = Vec::with_capacity(readings.len());
    for reading in readings {
        if !out.contains(&reading) {
            out.push(reading);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(readings: &[(&str, &str)]) -> AnalyzedToken {
        AnalyzedToken::new(0, "go", readings.iter().map(|(l, t)| Reading::new(*l, *t)).collect()).unwrap()
    }

    #[test]
    fn token_requires_a_reading() {
        assert!(AnalyzedToken::new(0, "go", Vec::new()).is_none());
    }

    #[test]
    fn duplicate_readings_are_dropped_in_order() {
        let t = token(&[("go", "VBP"), ("go", "VB"), ("go", "VBP")]);
        assert_eq!(t.readings(), &[Reading::new("go", "VBP"), Reading::new("go", "VB")]);
    }

    #[test]
    fn add_reading_is_idempotent() {
        let mut t = token(&[("go", "VB")]);
        assert!(t.add_reading(Reading::new("go", "VBP")));
        assert!(!t.add_reading(Reading::new("go", "VBP")));
        assert_eq!(t.readings().len(), 2);
    }

    #[test]
    fn set_readings_refuses_empty() {
        let mut t = token(&[("go", "VB")]);
        assert!(!t.set_readings(Vec::new()));
        assert_eq!(t.readings(), &[Reading::new("go", "VB")]);
    }

    #[test]
    fn retain_keeps_original_when_nothing_survives() {
        let mut t = token(&[("go", "VB"), ("go", "VBP")]);
        assert_eq!(t.retain_readings(|r| r.tag() == "NN"), Retained::KeptOriginal);
        assert_eq!(t.readings().len(), 2);

        assert_eq!(t.retain_readings(|r| r.tag() == "VBP"), Retained::Narrowed);
        assert_eq!(t.readings(), &[Reading::new("go", "VBP")]);

        assert_eq!(t.retain_readings(|_| true), Retained::Unchanged);
    }

    #[test]
    fn textual_form_parses_and_prints() {
        let s: AnalyzedSentence = "He=he/PRP go=go/VB|go/VBP school=/NN".parse().unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.tokens()[1].readings().len(), 2);
        assert_eq!(s.tokens()[1].position(), 3);
        assert_eq!(s.tokens()[2].readings()[0], Reading::new("school", "NN"));
        assert_eq!(s.to_string(), "He=he/PRP go=go/VB|go/VBP school=school/NN");
    }

    #[test]
    fn textual_form_rejects_untagged_tokens() {
        let err = "He go=go/VB".parse::<AnalyzedSentence>().unwrap_err();
        assert_eq!(err.token, "He");
        assert!("go=go".parse::<AnalyzedSentence>().is_err());
    }
}
