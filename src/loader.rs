//! Loading rule sets from JSON rule sources.
//!
//! A rule source is a JSON document with an ordered `rules` array:
//!
//! ```json
//! {
//!   "rules": [
//!     {
//!       "id": "HE_GO",
//!       "description": "present tense after 'he'",
//!       "pattern": [ { "text": "he" }, { "tag": "VB|VBP", "mark": true } ],
//!       "action": { "mode": "filter-readings", "tag": "VBP" }
//!     }
//!   ]
//! }
//! ```
//!
//! Loading is all-or-nothing: the first structural problem, degenerate rule or
//! invalid regex fails the whole source and no rule from it is returned.
//!
//! A source that does not exist is *not* an error. Optional override files are
//! expected to be missing most of the time; [`RuleSource::load`] reports them
//! as [`SourceStatus::Absent`] with an empty rule set.

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use crate::engine::{
    Action, DisambiguationRule, ElementFlags, PatternElement, ReadingFilter, ReadingTemplate, RuleError, RuleSet,
    anchored,
};
use crate::errors::{LoadResult, RuleLoadError};

/// File name of a rule source inside a resource directory.
pub const DISAMBIGUATION_FILE: &str = "disambiguation.json";

// --- Source document ----------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default)]
    rules: Vec<RuleDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDef {
    id: String,
    #[serde(default)]
    description: Option<String>,
    pattern: Vec<ElementDef>,
    action: ActionDef,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementDef {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    regexp: bool,
    #[serde(default)]
    lemma: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    negate: bool,
    #[serde(default)]
    negate_tag: bool,
    #[serde(default)]
    case_sensitive: bool,
    #[serde(default)]
    mark: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case", deny_unknown_fields)]
enum ActionDef {
    ReplaceReadings { readings: Vec<ReadingDef> },
    FilterReadings { tag: String, #[serde(default)] lemma: Option<String> },
    AddReading { reading: ReadingDef },
    Unify { feature: String },
    RemoveReadings { tag: String, #[serde(default)] lemma: Option<String> },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReadingDef {
    #[serde(default)]
    lemma: Option<String>,
    tag: String,
}

// --- Public surface -----------------------------------------------------------

/// Whether a source was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    /// The source does not exist; an empty rule set stands in for it.
    Absent,
    /// The source was read and produced `rules` rules.
    Loaded { rules: usize },
}

/// Result of loading one source.
#[derive(Debug, Clone)]
pub struct LoadedRules {
    pub rules: RuleSet,
    pub status: SourceStatus,
}

impl LoadedRules {
    fn absent() -> Self {
        Self { rules: RuleSet::empty(), status: SourceStatus::Absent }
    }

    fn loaded(rules: RuleSet) -> Self {
        let status = SourceStatus::Loaded { rules: rules.len() };
        Self { rules, status }
    }
}

/// Where a rule set comes from.
#[derive(Debug, Clone)]
pub enum RuleSource {
    /// No source configured; behaves like a missing file.
    None,
    /// A JSON file that may or may not exist.
    File(PathBuf),
    /// JSON text held in memory, with a name for diagnostics.
    Text { name: String, text: String },
    /// An already built rule set.
    Rules(RuleSet),
}

impl RuleSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text { name: name.into(), text: text.into() }
    }

    pub fn load(&self) -> LoadResult<LoadedRules> {
        match self {
            RuleSource::None => Ok(LoadedRules::absent()),
            RuleSource::File(path) => load_path(path),
            RuleSource::Text { name, text } => load_str(name, text).map(LoadedRules::loaded),
            RuleSource::Rules(rules) => Ok(LoadedRules::loaded(rules.clone())),
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::None => f.write_str("<none>"),
            RuleSource::File(path) => write!(f, "{}", path.display()),
            RuleSource::Text { name, .. } => f.write_str(name),
            RuleSource::Rules(rules) => write!(f, "<{} built rules>", rules.len()),
        }
    }
}

/// Load a rule file; a missing file yields [`SourceStatus::Absent`].
pub fn load_path(path: &Path) -> LoadResult<LoadedRules> {
    let name = path.display().to_string();
    match std::fs::File::open(path) {
        Ok(file) => load_reader(&name, file).map(LoadedRules::loaded),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(LoadedRules::absent()),
        Err(err) => Err(RuleLoadError::io(name, err.to_string())),
    }
}

/// Load rules from any reader. `source_name` is only used in diagnostics.
pub fn load_reader<R: Read>(source_name: &str, mut reader: R) -> LoadResult<RuleSet> {
    let mut text = String::new();
    reader.read_to_string(&mut text).map_err(|err| RuleLoadError::io(source_name, err.to_string()))?;
    load_str(source_name, &text)
}

/// Load rules from JSON text.
pub fn load_str(source_name: &str, text: &str) -> LoadResult<RuleSet> {
    let file: RuleFile = serde_json::from_str(text)
        .map_err(|err| RuleLoadError::malformed(source_name, err.line(), err.column(), err.to_string()))?;

    file.rules.into_iter().map(|def| compile_rule(source_name, def)).collect::<LoadResult<Vec<_>>>().map(RuleSet::new)
}

// --- Compilation --------------------------------------------------------------

fn compile_rule(source_name: &str, def: RuleDef) -> LoadResult<DisambiguationRule> {
    let invalid = |message: String| RuleLoadError::invalid(source_name, &def.id, message);

    if def.pattern.is_empty() {
        return Err(RuleLoadError::degenerate(source_name, &def.id));
    }

    let pattern = def
        .pattern
        .iter()
        .enumerate()
        .map(|(idx, el)| compile_element(el).map_err(|err| invalid(format!("pattern element {idx}: {err}"))))
        .collect::<LoadResult<Vec<_>>>()?;

    let action = compile_action(&def.action).map_err(|err| invalid(err.to_string()))?;

    let rule = DisambiguationRule::new(def.id.clone(), pattern, action).map_err(|err| match err {
        RuleError::EmptyPattern => RuleLoadError::degenerate(source_name, &def.id),
        other => invalid(other.to_string()),
    })?;

    Ok(match def.description {
        Some(description) => rule.with_description(description),
        None => rule,
    })
}

fn compile_element(def: &ElementDef) -> Result<PatternElement, regex::Error> {
    let mut element = PatternElement::any();
    let mut flags = ElementFlags::empty();

    if let Some(text) = &def.text {
        let pattern = if def.regexp { text.clone() } else { regex::escape(text) };
        element = element.with_text(anchored(&pattern, def.case_sensitive)?);
    }
    if let Some(lemma) = &def.lemma {
        element = element.with_lemma(anchored(lemma, def.case_sensitive)?);
    }
    if let Some(tag) = &def.tag {
        element = element.with_tag(anchored(tag, true)?);
    }

    flags.set(ElementFlags::NEGATE, def.negate);
    flags.set(ElementFlags::NEGATE_TAG, def.negate_tag);
    flags.set(ElementFlags::MARKED, def.mark);

    Ok(element.with_flags(flags))
}

fn compile_action(def: &ActionDef) -> Result<Action, regex::Error> {
    Ok(match def {
        ActionDef::ReplaceReadings { readings } => Action::ReplaceReadings(readings.iter().map(template).collect()),
        ActionDef::FilterReadings { tag, lemma } => Action::FilterReadings(filter(tag, lemma.as_deref())?),
        ActionDef::AddReading { reading } => Action::AddReading(template(reading)),
        ActionDef::Unify { feature } => Action::Unify(Regex::new(feature)?),
        ActionDef::RemoveReadings { tag, lemma } => Action::RemoveReadings(filter(tag, lemma.as_deref())?),
    })
}

fn template(def: &ReadingDef) -> ReadingTemplate {
    ReadingTemplate::new(def.lemma.as_deref(), def.tag.clone())
}

fn filter(tag: &str, lemma: Option<&str>) -> Result<ReadingFilter, regex::Error> {
    Ok(ReadingFilter { tag: anchored(tag, true)?, lemma: lemma.map(|l| anchored(l, false)).transpose()? })
}
