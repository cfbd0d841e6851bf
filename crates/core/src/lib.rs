//! Core library for typefill.
//!
//! A typefill template is a single text document in two halves: a
//! declaration block of typed input variables, then a `---` delimiter
//! line, then a body rendered with Tera once all variables are
//! resolved. This crate covers the whole pipeline:
//!
//! - [`document`] splits raw text into declarations and body.
//! - [`decl`] lexes and parses the declaration DSL into
//!   [`decl::types::VariableSpec`] trees and validates them.
//! - [`resolve`] walks the specs in order, consulting an injected
//!   [`resolve::source::ValueSource`] for concrete values.
//! - [`render`] substitutes the resolved environment into the body.
//! - [`template`] ties the stages together.
//!
//! Interactive prompting, file/network input, and CLI plumbing live in
//! the `typefill` binary crate.

pub mod config;
pub mod decl;
pub mod document;
pub mod render;
pub mod resolve;
pub mod template;
pub mod value;

pub use decl::types::{OptionEntry, VarKind, VariableSpec};
pub use resolve::engine::Environment;
pub use resolve::source::{SilentSource, SourceError, ValueSource};
pub use template::{ParsedTemplate, TemplateError};
pub use value::{Scalar, Value};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
