//! Supported languages and their built-in rule sets.

use crate::engine::{RuleDisambiguator, RuleSet};
use crate::errors::LoadResult;

/// Metadata for one supported language.
#[derive(Debug)]
pub struct Language {
    short_name: &'static str,
    name: &'static str,
    maintainers: &'static [&'static str],
    builtin: fn() -> LoadResult<RuleSet>,
}

/// All languages with built-in rules.
pub static LANGUAGES: &[Language] = &[
    Language {
        short_name: "en",
        name: "English",
        maintainers: &["Marcin Miłkowski", "Daniel Naber"],
        builtin: crate::rules::en::get,
    },
    Language { short_name: "uk", name: "Ukrainian", maintainers: &["Andriy Rysin"], builtin: crate::rules::uk::get },
];

impl Language {
    /// Look a language up by its short code (`"en"`, `"uk"`), ignoring case.
    pub fn for_short_name(code: &str) -> Option<&'static Language> {
        LANGUAGES.iter().find(|l| l.short_name.eq_ignore_ascii_case(code))
    }

    pub fn short_name(&self) -> &'static str {
        self.short_name
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn maintainers(&self) -> &'static [&'static str] {
        self.maintainers
    }

    pub fn builtin_rules(&self) -> LoadResult<RuleSet> {
        (self.builtin)()
    }

    /// A stage applying this language's built-in rules.
    pub fn builtin_disambiguator(&self) -> LoadResult<RuleDisambiguator> {
        Ok(RuleDisambiguator::new(format!("builtin:{}", self.short_name), self.builtin_rules()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Language::for_short_name("EN").map(|l| l.name()), Some("English"));
        assert_eq!(Language::for_short_name("uk").map(|l| l.name()), Some("Ukrainian"));
        assert!(Language::for_short_name("xx").is_none());
    }

    #[test]
    fn every_language_has_loadable_builtin_rules() {
        for language in LANGUAGES {
            let rules = language.builtin_rules().unwrap();
            assert!(!rules.is_empty(), "{} has no built-in rules", language.short_name());
        }
    }
}
