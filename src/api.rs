use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::composer::ComposedDisambiguator;
use crate::engine::{RuleDisambiguator, RuleMetrics};
use crate::errors::{DisambiguationError, LoadResult, Result};
use crate::language::{LANGUAGES, Language};
use crate::pipeline::{Disambiguator, HybridDisambiguator, Stage};
use crate::sentence::AnalyzedSentence;

static BUILTIN: Lazy<HashMap<&'static str, LoadResult<RuleDisambiguator>>> =
    Lazy::new(|| LANGUAGES.iter().map(|l| (l.short_name(), l.builtin_disambiguator())).collect());

/// Options controlling which stages a language pipeline gets.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory holding `disambiguation.json` and `<lang>/disambiguation.json`.
    /// When unset, no custom stage is added.
    pub resource_dir: Option<PathBuf>,
    /// Run the language's built-in rules first.
    pub builtin: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { resource_dir: None, builtin: true }
    }
}

/// Result of [`disambiguate_verbose_with`].
#[derive(Debug, Clone)]
pub struct DisambiguationResult {
    /// The disambiguated sentence.
    pub sentence: AnalyzedSentence,
    /// Total elapsed time.
    pub elapsed: Duration,
    pub details: DisambiguationDetails,
}

/// Compact trace of a pipeline run, meant for debugging rule sets.
#[derive(Debug, Clone)]
pub struct DisambiguationDetails {
    /// Names of the stages that were configured, in order.
    pub stages: Vec<String>,
    /// Per-rule counters in application order.
    pub rules: Vec<RuleMetrics>,
    /// Reading count before and after the run.
    pub readings_before: usize,
    pub readings_after: usize,
    /// Times a rule left a token untouched instead of emptying it.
    pub kept_original: usize,
}

/// Build the pipeline for `language`: built-in rules, then custom rules.
///
/// Custom rules are composed lazily on the first sentence; build the pipeline
/// once and reuse it.
pub fn pipeline(language: &Language, options: &Options) -> LoadResult<HybridDisambiguator> {
    let builtin: Option<Stage> = if options.builtin {
        let stage = match BUILTIN.get(language.short_name()) {
            Some(cached) => cached.clone()?,
            None => language.builtin_disambiguator()?,
        };
        Some(Box::new(stage) as Stage)
    } else {
        None
    };

    let custom: Option<Stage> = options
        .resource_dir
        .as_deref()
        .map(|dir| Box::new(ComposedDisambiguator::from_resource_dir(language.short_name(), dir)) as Stage);

    Ok(HybridDisambiguator::new(vec![builtin, custom]))
}

/// Disambiguate with the built-in rules of the language named `code`.
///
/// # Example
/// ```
/// let sentence = "they=they/PRP go=go/VB|go/VBP".parse().unwrap();
/// let out = lexsift::disambiguate("en", sentence).unwrap();
/// assert_eq!(out.to_string(), "they=they/PRP go=go/VBP");
/// ```
pub fn disambiguate(code: &str, sentence: AnalyzedSentence) -> Result<AnalyzedSentence> {
    disambiguate_with(code, sentence, &Options::default())
}

/// Disambiguate with the pipeline described by `options`.
pub fn disambiguate_with(code: &str, sentence: AnalyzedSentence, options: &Options) -> Result<AnalyzedSentence> {
    build(code, options)?.disambiguate(sentence)
}

/// Like [`disambiguate_with`], also returning per-rule details.
pub fn disambiguate_verbose_with(
    code: &str,
    sentence: AnalyzedSentence,
    options: &Options,
) -> Result<DisambiguationResult> {
    let pipeline = build(code, options)?;
    let stages = pipeline.stage_names().into_iter().map(str::to_string).collect();
    let readings_before = sentence.reading_count();

    let (sentence, metrics) = pipeline.disambiguate_with_metrics(sentence)?;

    let details = DisambiguationDetails {
        stages,
        readings_before,
        readings_after: sentence.reading_count(),
        kept_original: metrics.kept_original(),
        rules: metrics.rules,
    };

    Ok(DisambiguationResult { sentence, elapsed: metrics.total, details })
}

fn build(code: &str, options: &Options) -> Result<HybridDisambiguator> {
    let language = Language::for_short_name(code).ok_or_else(|| DisambiguationError::UnknownLanguage(code.to_string()))?;
    pipeline(language, options)
        .map_err(|source| DisambiguationError::RuleLoad { language: language.short_name().to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_only_by_default() {
        let out = disambiguate("en", "to=to/TO walk=walk/NN|walk/VB".parse().unwrap()).unwrap();
        assert_eq!(out.to_string(), "to=to/TO walk=walk/VB");
    }

    #[test]
    fn unknown_language_is_an_error() {
        let err = disambiguate("xx", "a=a/DT".parse().unwrap()).unwrap_err();
        assert_eq!(err, DisambiguationError::UnknownLanguage("xx".to_string()));
    }

    #[test]
    fn disabling_builtin_leaves_sentence_untouched() {
        let options = Options { resource_dir: None, builtin: false };
        let input: AnalyzedSentence = "to=to/TO walk=walk/NN|walk/VB".parse().unwrap();
        assert_eq!(disambiguate_with("en", input.clone(), &options).unwrap(), input);
    }

    #[test]
    fn verbose_reports_rules_and_reading_counts() {
        let res = disambiguate_verbose_with(
            "en",
            "the=the/DT walk=walk/NN|walk/VB".parse().unwrap(),
            &Options::default(),
        )
        .unwrap();

        assert_eq!(res.details.stages, vec!["builtin:en".to_string()]);
        assert_eq!(res.details.readings_before, 3);
        assert_eq!(res.details.readings_after, 2);
        assert!(res.details.rules.iter().any(|r| r.rule_id == "DETERMINER_NOUN" && r.changed == 1));
    }

    #[test]
    fn pipeline_adds_custom_stage_for_resource_dir() {
        let dir = tempfile::tempdir().unwrap();
        let options = Options { resource_dir: Some(dir.path().to_path_buf()), builtin: true };
        let language = Language::for_short_name("uk").unwrap();
        let pipeline = pipeline(language, &options).unwrap();
        assert_eq!(pipeline.stage_names(), vec!["builtin:uk", "custom:uk"]);
    }
}
