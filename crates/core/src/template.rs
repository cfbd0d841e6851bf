//! The full pipeline: split, parse, validate, resolve, render.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decl::types::VariableSpec;
use crate::decl::validation::ValidationIssue;
use crate::decl::{self, ParseError};
use crate::document;
use crate::render::{self, RenderError};
use crate::resolve::engine::{Environment, ResolveError};
use crate::resolve::source::ValueSource;

/// Any failure along the pipeline.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("template failed validation with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A parsed template: ordered variable declarations plus the body.
///
/// Templates can be authored in the line DSL (parsed with
/// [`ParsedTemplate::parse`]) or in a structured JSON/YAML form with
/// the same field names; the two round-trip through serde.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedTemplate {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableSpec>,

    /// The body text, rendered once all variables are resolved.
    #[serde(default)]
    pub template: String,
}

impl ParsedTemplate {
    /// Parse a raw template document in the line DSL.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let doc = document::split(text);
        let variables = decl::parse(&doc.declarations)?;
        debug!(variables = variables.len(), body_bytes = doc.body.len(), "template parsed");
        Ok(ParsedTemplate { variables, template: doc.body })
    }

    /// Collect every validation issue in the declaration tree.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        decl::validate(&self.variables)
    }

    /// Resolve all variables against a value source.
    pub fn resolve(&self, source: &mut dyn ValueSource) -> Result<Environment, ResolveError> {
        crate::resolve::resolve(&self.variables, source)
    }

    /// Render the body against an already resolved environment.
    pub fn render(&self, env: &Environment) -> Result<String, RenderError> {
        render::render(&self.template, env)
    }

    /// Run the whole pipeline: validate, resolve, render.
    ///
    /// Validation issues are reported together, before the value
    /// source is consulted at all.
    pub fn execute(&self, source: &mut dyn ValueSource) -> Result<String, TemplateError> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(TemplateError::Validation(issues));
        }
        let env = self.resolve(source)?;
        Ok(self.render(&env)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}
