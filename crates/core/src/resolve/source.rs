//! The value source capability.
//!
//! Resolution never talks to a UI directly; it asks a [`ValueSource`]
//! for one value at a time. Interactive prompting, preset `--var`
//! values, and scripted test inputs are all implementations of the
//! same trait, which keeps the engine deterministic and testable.

use thiserror::Error;

use crate::decl::types::VariableSpec;
use crate::value::Value;

/// Errors a value source can surface. Any of these aborts the whole
/// resolution pass; partial environments are never exposed.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("input cancelled")]
    Cancelled,

    #[error("missing required value for '{0}'")]
    Missing(String),

    #[error("input error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supplies concrete values during resolution.
pub trait ValueSource {
    /// Ask for one value of the spec's base kind. `path` is the
    /// display path for nested prompts (`person.name`); the engine
    /// binds results by plain name regardless. `Ok(None)` means "no
    /// answer" and lets the engine fall back to the default.
    fn ask(&mut self, spec: &VariableSpec, path: &str) -> Result<Option<Value>, SourceError>;

    /// After each gathered array element: gather another?
    fn confirm_continue(&mut self, name: &str) -> Result<bool, SourceError>;

    /// Display-only event for section markers.
    fn section(&mut self, _heading: &str) {}
}

/// A source that never answers: every variable falls back to its
/// default (or an empty value), and arrays stop after one element.
/// Useful for fully predefined templates and batch runs.
#[derive(Debug, Default)]
pub struct SilentSource;

impl ValueSource for SilentSource {
    fn ask(&mut self, _spec: &VariableSpec, _path: &str) -> Result<Option<Value>, SourceError> {
        Ok(None)
    }

    fn confirm_continue(&mut self, _name: &str) -> Result<bool, SourceError> {
        Ok(false)
    }
}
