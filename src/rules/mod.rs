//! Built-in disambiguation rules, one module per language.
//!
//! Built-in rules run as the first stage of a language pipeline, before any
//! rules loaded from resource files.

pub(crate) mod en;
pub(crate) mod uk;
