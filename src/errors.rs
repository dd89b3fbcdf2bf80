//! Error types for rule loading and pipeline execution.
//!
//! Two families exist:
//!
//! - [`RuleLoadError`]: a rule source was present but could not be turned into
//!   a rule set. Raised while a stage is being set up (or lazily composed).
//! - [`DisambiguationError`]: a pipeline stage failed while processing a
//!   sentence. The caller must treat this as "no disambiguation occurred".
//!
//! An absent optional rule source is not an error at all; see
//! [`SourceStatus::Absent`](crate::loader::SourceStatus::Absent).

use thiserror::Error;

/// Result alias for rule loading.
pub type LoadResult<T> = std::result::Result<T, RuleLoadError>;

/// Result alias for pipeline execution.
pub type Result<T> = std::result::Result<T, DisambiguationError>;

/// A rule source exists but does not describe a valid rule set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleLoadError {
    /// The source is not structurally valid (bad JSON, unknown action mode, ...).
    #[error("malformed rule source {source_name} at line {line}, column {column}: {message}")]
    Malformed { source_name: String, line: usize, column: usize, message: String },

    /// A rule declares no pattern elements and could never match.
    #[error("rule '{rule_id}' in {source_name} has an empty pattern")]
    DegenerateRule { source_name: String, rule_id: String },

    /// A rule is structurally valid but cannot be compiled (bad regex, empty
    /// replacement, feature regex without a capture group).
    #[error("invalid rule '{rule_id}' in {source_name}: {message}")]
    InvalidRule { source_name: String, rule_id: String, message: String },

    /// The source exists but could not be read.
    #[error("could not read rule source {source_name}: {message}")]
    Io { source_name: String, message: String },
}

impl RuleLoadError {
    pub fn malformed(source_name: impl Into<String>, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Malformed { source_name: source_name.into(), line, column, message: message.into() }
    }

    pub fn degenerate(source_name: impl Into<String>, rule_id: impl Into<String>) -> Self {
        Self::DegenerateRule { source_name: source_name.into(), rule_id: rule_id.into() }
    }

    pub fn invalid(source_name: impl Into<String>, rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRule { source_name: source_name.into(), rule_id: rule_id.into(), message: message.into() }
    }

    pub fn io(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io { source_name: source_name.into(), message: message.into() }
    }

    /// Identifier of the offending rule, when the error is tied to one.
    pub fn rule_id(&self) -> Option<&str> {
        match self {
            Self::DegenerateRule { rule_id, .. } | Self::InvalidRule { rule_id, .. } => Some(rule_id),
            Self::Malformed { .. } | Self::Io { .. } => None,
        }
    }
}

/// Failure of a disambiguation stage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisambiguationError {
    /// A lazily composed stage could not load its rules.
    #[error("failed to load disambiguation rules for '{language}': {source}")]
    RuleLoad {
        language: String,
        #[source]
        source: RuleLoadError,
    },

    /// A stage of a [`HybridDisambiguator`](crate::HybridDisambiguator) failed;
    /// the remaining stages were not run.
    #[error("stage {index} ({stage}) failed: {source}")]
    StageFailed {
        index: usize,
        stage: String,
        #[source]
        source: Box<DisambiguationError>,
    },

    /// No language with this short name is registered.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    /// A custom stage reported an error of its own.
    #[error("{stage}: {message}")]
    Custom { stage: String, message: String },
}

impl DisambiguationError {
    pub fn custom(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom { stage: stage.into(), message: message.into() }
    }

    pub fn stage_failed(index: usize, stage: impl Into<String>, source: DisambiguationError) -> Self {
        Self::StageFailed { index, stage: stage.into(), source: Box::new(source) }
    }

    /// Follow `StageFailed` wrappers down to the error that started the failure.
    pub fn root_cause(&self) -> &DisambiguationError {
        match self {
            Self::StageFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
