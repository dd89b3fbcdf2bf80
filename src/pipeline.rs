//! Disambiguation stages and the pipeline combinator.
//!
//! Every stage implements [`Disambiguator`]: take a sentence by value, return
//! the transformed sentence or an error. Stages are `Send + Sync` so a single
//! pipeline can serve many worker threads, each owning its own sentence.
//!
//! [`HybridDisambiguator`] chains stages in order:
//!
//! ```text
//! slots:  [ None ] [ builtin ] [ None ] [ custom ]
//!            skip      │          skip      │
//! input ───────────────┴─────────────────────┴──> output
//! ```
//!
//! The first failing stage stops the chain. The sentence it was working on is
//! dropped together with the error, so callers never see a half-processed
//! sentence passed off as a result.

use std::time::Instant;

use crate::engine::RunMetrics;
use crate::errors::{DisambiguationError, Result};
use crate::sentence::AnalyzedSentence;

/// A stage that narrows the readings of a sentence.
pub trait Disambiguator: Send + Sync {
    /// Short name used in error messages and metrics.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn disambiguate(&self, sentence: AnalyzedSentence) -> Result<AnalyzedSentence>;

    /// Like [`disambiguate`](Disambiguator::disambiguate), also reporting what
    /// happened. Stages without rule-level detail only report timing.
    fn disambiguate_with_metrics(&self, sentence: AnalyzedSentence) -> Result<(AnalyzedSentence, RunMetrics)> {
        let started = Instant::now();
        let out = self.disambiguate(sentence)?;
        Ok((out, RunMetrics { total: started.elapsed(), stages: 1, rules: Vec::new() }))
    }
}

impl<D: Disambiguator + ?Sized> Disambiguator for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn disambiguate(&self, sentence: AnalyzedSentence) -> Result<AnalyzedSentence> {
        (**self).disambiguate(sentence)
    }

    fn disambiguate_with_metrics(&self, sentence: AnalyzedSentence) -> Result<(AnalyzedSentence, RunMetrics)> {
        (**self).disambiguate_with_metrics(sentence)
    }
}

impl<D: Disambiguator + ?Sized> Disambiguator for std::sync::Arc<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn disambiguate(&self, sentence: AnalyzedSentence) -> Result<AnalyzedSentence> {
        (**self).disambiguate(sentence)
    }

    fn disambiguate_with_metrics(&self, sentence: AnalyzedSentence) -> Result<(AnalyzedSentence, RunMetrics)> {
        (**self).disambiguate_with_metrics(sentence)
    }
}

/// Passes sentences through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDisambiguator;

impl Disambiguator for NoopDisambiguator {
    fn name(&self) -> &str {
        "noop"
    }

    #[inline]
    fn disambiguate(&self, sentence: AnalyzedSentence) -> Result<AnalyzedSentence> {
        Ok(sentence)
    }
}

/// A boxed pipeline stage.
pub type Stage = Box<dyn Disambiguator>;

/// Runs several disambiguators one after another.
#[derive(Default)]
pub struct HybridDisambiguator {
    stages: Vec<Option<Stage>>,
}

impl HybridDisambiguator {
    /// Build from explicit slots; `None` slots are skipped at run time.
    pub fn new(stages: Vec<Option<Stage>>) -> Self {
        Self { stages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a stage.
    pub fn with_stage(mut self, stage: impl Disambiguator + 'static) -> Self {
        self.stages.push(Some(Box::new(stage) as Stage));
        self
    }

    /// Append a slot that may be unset.
    pub fn with_slot(mut self, stage: Option<Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Number of slots, set or not.
    pub fn slots(&self) -> usize {
        self.stages.len()
    }

    /// Names of the set stages, in order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().flatten().map(|s| s.name()).collect()
    }
}

impl std::fmt::Debug for HybridDisambiguator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridDisambiguator").field("slots", &self.stages.len()).field("stages", &self.stage_names()).finish()
    }
}

impl Disambiguator for HybridDisambiguator {
    fn name(&self) -> &str {
        "hybrid"
    }

    fn disambiguate(&self, sentence: AnalyzedSentence) -> Result<AnalyzedSentence> {
        let mut sentence = sentence;
        for (index, stage) in self.stages.iter().enumerate() {
            let Some(stage) = stage else { continue };
            sentence = stage
                .disambiguate(sentence)
                .map_err(|err| DisambiguationError::stage_failed(index, stage.name(), err))?;
        }
        Ok(sentence)
    }

    fn disambiguate_with_metrics(&self, sentence: AnalyzedSentence) -> Result<(AnalyzedSentence, RunMetrics)> {
        let started = Instant::now();
        let mut metrics = RunMetrics::default();
        let mut sentence = sentence;

        for (index, stage) in self.stages.iter().enumerate() {
            let Some(stage) = stage else { continue };
            let (out, stage_metrics) = stage
                .disambiguate_with_metrics(sentence)
                .map_err(|err| DisambiguationError::stage_failed(index, stage.name(), err))?;
            metrics.absorb(stage_metrics);
            sentence = out;
        }

        metrics.total = started.elapsed();
        Ok((sentence, metrics))
    }
}
