//! Pattern elements: single-token predicates used inside rule patterns.
//!
//! An element can constrain three things about a token:
//!
//! - its surface text (`text`),
//! - the lemma of one of its readings (`lemma`),
//! - the tag of one of its readings (`tag`).
//!
//! Lemma and tag constraints are checked on the *same* reading: an element with
//! `lemma = "go"` and `tag = "VBP"` matches only a token that has a `go/VBP`
//! reading, not one with `go/VB` plus `went/VBP`.
//!
//! All regexes stored here are fully anchored (see [`anchored`]); element
//! matching is therefore always a full match against the text, lemma or tag.
//!
//! Flags:
//!
//! ```text
//! NEGATE          invert the whole element result
//! NEGATE_TAG      the token must carry NO reading whose tag matches `tag`
//! MARKED          the rule action applies to this position
//! ```

use crate::sentence::AnalyzedToken;
use regex::Regex;

bitflags::bitflags! {
    /// Modifiers attached to a [`PatternElement`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ElementFlags: u8 {
        const NEGATE     = 1 << 0;
        const NEGATE_TAG = 1 << 1;
        const MARKED     = 1 << 2;
    }
}

/// Compile `pattern` as a full-match regex.
///
/// Case-insensitive unless `case_sensitive` is set.
pub fn anchored(pattern: &str, case_sensitive: bool) -> Result<Regex, regex::Error> {
    if case_sensitive { Regex::new(&format!("^(?:{pattern})$")) } else { Regex::new(&format!("(?i)^(?:{pattern})$")) }
}

/// A predicate over one token.
///
/// An element without any constraint matches every token.
#[derive(Debug, Clone, Default)]
pub struct PatternElement {
    text: Option<Regex>,
    lemma: Option<Regex>,
    tag: Option<Regex>,
    flags: ElementFlags,
}

impl PatternElement {
    /// An element that matches any token.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: Regex) -> Self {
        self.text = Some(text);
        self
    }

    pub fn with_lemma(mut self, lemma: Regex) -> Self {
        self.lemma = Some(lemma);
        self
    }

    pub fn with_tag(mut self, tag: Regex) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn with_flags(mut self, flags: ElementFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn negated(self) -> Self {
        self.with_flags(ElementFlags::NEGATE)
    }

    pub fn marked(self) -> Self {
        self.with_flags(ElementFlags::MARKED)
    }

    pub fn flags(&self) -> ElementFlags {
        self.flags
    }

    pub fn is_marked(&self) -> bool {
        self.flags.contains(ElementFlags::MARKED)
    }

    /// Does `token` satisfy this element?
    pub fn matches(&self, token: &AnalyzedToken) -> bool {
        let text_ok = self.text.as_ref().is_none_or(|re| re.is_match(token.text()));
        let hit = text_ok && self.readings_match(token);
        hit != self.flags.contains(ElementFlags::NEGATE)
    }

    fn readings_match(&self, token: &AnalyzedToken) -> bool {
        let lemma_ok = |lemma: &str| self.lemma.as_ref().is_none_or(|re| re.is_match(lemma));

        if self.flags.contains(ElementFlags::NEGATE_TAG) {
            let has_lemma = token.readings().iter().any(|r| lemma_ok(r.lemma()));
            let has_tag = self.tag.as_ref().is_some_and(|re| token.has_tag_matching(re));
            return has_lemma && !has_tag;
        }

        if self.lemma.is_none() && self.tag.is_none() {
            return true;
        }

        token.readings().iter().any(|r| lemma_ok(r.lemma()) && self.tag.as_ref().is_none_or(|re| re.is_match(r.tag())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Reading;

    fn go() -> AnalyzedToken {
        AnalyzedToken::new(3, "Go", vec![Reading::new("go", "VB"), Reading::new("went", "VBP")]).unwrap()
    }

    #[test]
    fn empty_element_matches_anything() {
        assert!(PatternElement::any().matches(&go()));
    }

    #[test]
    fn text_matching_is_case_insensitive_by_default() {
        let insensitive = PatternElement::any().with_text(anchored("go", false).unwrap());
        let sensitive = PatternElement::any().with_text(anchored("go", true).unwrap());
        assert!(insensitive.matches(&go()));
        assert!(!sensitive.matches(&go()));
    }

    #[test]
    fn anchoring_requires_a_full_match() {
        let el = PatternElement::any().with_tag(anchored("VB", true).unwrap());
        let vbz = AnalyzedToken::new(0, "goes", vec![Reading::new("go", "VBZ")]).unwrap();
        assert!(el.matches(&go()));
        assert!(!el.matches(&vbz));
    }

    #[test]
    fn lemma_and_tag_must_hold_on_the_same_reading() {
        let el = PatternElement::any().with_lemma(anchored("go", false).unwrap()).with_tag(anchored("VBP", true).unwrap());
        assert!(!el.matches(&go()));

        let el = PatternElement::any().with_lemma(anchored("went", false).unwrap()).with_tag(anchored("VBP", true).unwrap());
        assert!(el.matches(&go()));
    }

    #[test]
    fn negation_inverts_the_element() {
        let el = PatternElement::any().with_text(anchored("go", false).unwrap()).negated();
        assert!(!el.matches(&go()));
    }

    #[test]
    fn tag_negation_requires_absence_of_the_tag() {
        let not_noun = PatternElement::any().with_tag(anchored("NN.*", true).unwrap()).with_flags(ElementFlags::NEGATE_TAG);
        let not_verb = PatternElement::any().with_tag(anchored("VB.*", true).unwrap()).with_flags(ElementFlags::NEGATE_TAG);
        assert!(not_noun.matches(&go()));
        assert!(!not_verb.matches(&go()));
    }
}
