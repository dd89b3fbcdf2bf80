//! Lazily composed global + language-specific rule sets.
//!
//! A [`ComposedDisambiguator`] owns two rule sources for one language:
//!
//! ```text
//! <resources>/disambiguation.json          global, every language
//! <resources>/<lang>/disambiguation.json   this language only
//! ```
//!
//! On first use both sources are loaded and concatenated, global rules first.
//! The result is cached for the lifetime of the instance and never changes
//! afterwards. Initialization goes through `OnceCell::get_or_try_init`, so
//! concurrent first calls compose at most once; a failed load leaves the cell
//! empty and the next call tries again.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;

use crate::engine::{RuleDisambiguator, RuleSet, RunMetrics};
use crate::errors::{DisambiguationError, LoadResult, Result};
use crate::loader::{DISAMBIGUATION_FILE, RuleSource, SourceStatus};
use crate::pipeline::Disambiguator;
use crate::sentence::AnalyzedSentence;

/// How each source contributed to the composed rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionReport {
    pub global: SourceStatus,
    pub language: SourceStatus,
}

#[derive(Debug)]
struct Composed {
    applier: RuleDisambiguator,
    report: CompositionReport,
}

/// Concatenate global and language-specific rules, global first.
pub fn compose(global: RuleSet, language: RuleSet) -> RuleSet {
    global.concat(language)
}

/// A disambiguator whose rules come from a global and a language source.
#[derive(Debug)]
pub struct ComposedDisambiguator {
    language: String,
    name: String,
    global: RuleSource,
    local: RuleSource,
    composed: OnceCell<Composed>,
    compositions: AtomicUsize,
}

impl ComposedDisambiguator {
    pub fn new(language: impl Into<String>, global: RuleSource, local: RuleSource) -> Self {
        let language = language.into();
        let name = format!("custom:{language}");
        Self { language, name, global, local, composed: OnceCell::new(), compositions: AtomicUsize::new(0) }
    }

    /// Use `<dir>/disambiguation.json` and `<dir>/<language>/disambiguation.json`.
    pub fn from_resource_dir(language: impl Into<String>, dir: &Path) -> Self {
        let language = language.into();
        let global = RuleSource::file(dir.join(DISAMBIGUATION_FILE));
        let local = RuleSource::file(dir.join(&language).join(DISAMBIGUATION_FILE));
        Self::new(language, global, local)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The effective rule set, composing it on first call.
    pub fn rules(&self) -> LoadResult<&RuleSet> {
        self.composed().map(|c| c.applier.rules())
    }

    /// Source statuses, once composition has happened.
    pub fn report(&self) -> Option<CompositionReport> {
        self.composed.get().map(|c| c.report)
    }

    pub fn is_composed(&self) -> bool {
        self.composed.get().is_some()
    }

    /// How many times composition ran to completion. At most one.
    pub fn compositions(&self) -> usize {
        self.compositions.load(Ordering::SeqCst)
    }

    fn composed(&self) -> LoadResult<&Composed> {
        self.composed.get_or_try_init(|| {
            let global = self.global.load()?;
            let local = self.local.load()?;

            if crate::engine::debug_rules() {
                for (source, status) in [(&self.global, global.status), (&self.local, local.status)] {
                    if status == SourceStatus::Absent {
                        eprintln!("[{}] optional rule source not found: {source}", self.name);
                    }
                }
            }

            let report = CompositionReport { global: global.status, language: local.status };
            let applier = RuleDisambiguator::new(self.name.clone(), compose(global.rules, local.rules));
            self.compositions.fetch_add(1, Ordering::SeqCst);
            Ok(Composed { applier, report })
        })
    }

    fn applier(&self) -> Result<&RuleDisambiguator> {
        self.composed()
            .map(|c| &c.applier)
            .map_err(|source| DisambiguationError::RuleLoad { language: self.language.clone(), source })
    }
}

impl Disambiguator for ComposedDisambiguator {
    fn name(&self) -> &str {
        &self.name
    }

    fn disambiguate(&self, sentence: AnalyzedSentence) -> Result<AnalyzedSentence> {
        Ok(self.applier()?.run(sentence))
    }

    fn disambiguate_with_metrics(&self, sentence: AnalyzedSentence) -> Result<(AnalyzedSentence, RunMetrics)> {
        Ok(self.applier()?.run_with_metrics(sentence))
    }
}
