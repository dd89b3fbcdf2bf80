//! Rule matching and application engine.
//!
//! This module is the algorithmic core of the crate: it knows how a single
//! disambiguation rule matches a tagged sentence and how its action rewrites
//! the readings of the matched tokens. Everything above it (loading rules from
//! JSON, composing global and language-specific rule sets, chaining stages)
//! only decides *which* rules run and in which order.
//!
//! ## How the parts work together
//!
//! ```text
//! PatternElement (pattern.rs)       one token predicate: text / lemma / tag
//!        │                           + negation, tag negation, marker flags
//!        v
//! DisambiguationRule (rule.rs)      window scan, leftmost-first, no overlap
//!        │                           + Action applied at marked positions
//!        v
//! RuleSet (rule_set.rs)             ordered rules, application order
//!        │
//!        v
//! RuleDisambiguator (applier.rs)    applies every rule in order, optionally
//!                                    collecting RunMetrics (metrics.rs)
//! ```
//!
//! ## Invariants
//!
//! - A rule pattern is never empty. Constructors reject it; the loader turns
//!   that into a `DegenerateRule` error carrying the rule id.
//! - After any rule application every token still has at least one reading.
//!   Actions that would empty a token leave it untouched and bump the
//!   `kept_original` counter of the rule outcome instead.
//! - Applying rules never fails: once a rule set exists, the apply path is
//!   total.
//!
//! ## Debugging
//!
//! Set `LEXSIFT_DEBUG_RULES=1` to print which rules fire and which optional
//! rule sources were absent.

#[path = "engine/applier.rs"]
mod applier;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/pattern.rs"]
mod pattern;
#[path = "engine/rule.rs"]
mod rule;
#[path = "engine/rule_set.rs"]
mod rule_set;

pub use applier::RuleDisambiguator;
pub use metrics::{RuleMetrics, RunMetrics};
pub use pattern::{ElementFlags, PatternElement, anchored};
pub use rule::{Action, DisambiguationRule, MergeMode, ReadingFilter, ReadingTemplate, RuleError, RuleOutcome};
pub use rule_set::RuleSet;

use once_cell::sync::Lazy;

static DEBUG_RULES: Lazy<bool> = Lazy::new(|| std::env::var_os("LEXSIFT_DEBUG_RULES").is_some());

/// True when `LEXSIFT_DEBUG_RULES` was set when the process first asked.
pub(crate) fn debug_rules() -> bool {
    *DEBUG_RULES
}
