//! # lexsift
//!
//! Rule-based disambiguation of morphologically tagged sentences.
//!
//! A tagger hands over a sentence in which every token carries one or more
//! candidate readings (`lemma/TAG`). Disambiguation rules look at runs of
//! tokens and narrow, replace, extend or unify those readings. Rules come from
//! three places and are applied in a fixed order:
//!
//! ```text
//! built-in rules (src/rules/<lang>)        stage 1: RuleDisambiguator
//! <resources>/disambiguation.json      ┐
//! <resources>/<lang>/disambiguation.json┘ stage 2: ComposedDisambiguator
//! ```
//!
//! Stages are chained by a [`HybridDisambiguator`]; every stage implements
//! [`Disambiguator`], so pipelines can be nested or extended with custom
//! stages.
//!
//! ```
//! use lexsift::{AnalyzedSentence, Disambiguator, Language, Options, pipeline};
//!
//! let english = Language::for_short_name("en").unwrap();
//! let pipeline = pipeline(english, &Options::default()).unwrap();
//!
//! let sentence: AnalyzedSentence = "to=to/TO walk=walk/NN|walk/VB".parse().unwrap();
//! let out = pipeline.disambiguate(sentence).unwrap();
//! assert_eq!(out.to_string(), "to=to/TO walk=walk/VB");
//! ```

#[macro_use]
mod macros;
mod api;
mod composer;
mod engine;
mod errors;
mod language;
mod loader;
mod pipeline;
mod rules;
mod sentence;

pub use api::{
    DisambiguationDetails, DisambiguationResult, Options, disambiguate, disambiguate_verbose_with, disambiguate_with,
    pipeline,
};
pub use composer::{CompositionReport, ComposedDisambiguator, compose};
pub use engine::{
    Action, DisambiguationRule, ElementFlags, MergeMode, PatternElement, ReadingFilter, ReadingTemplate,
    RuleDisambiguator, RuleError, RuleMetrics, RuleOutcome, RuleSet, RunMetrics, anchored,
};
pub use errors::{DisambiguationError, LoadResult, Result, RuleLoadError};
pub use language::{LANGUAGES, Language};
pub use loader::{DISAMBIGUATION_FILE, LoadedRules, RuleSource, SourceStatus, load_path, load_reader, load_str};
pub use pipeline::{Disambiguator, HybridDisambiguator, NoopDisambiguator, Stage};
pub use sentence::{AnalyzedSentence, AnalyzedToken, ParseSentenceError, Reading, Retained};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
