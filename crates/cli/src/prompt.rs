//! Interactive value source backed by dialoguer prompts.
//!
//! Resolution stays in the core crate; this module only answers its
//! questions. `--var` presets are consulted first, then (outside
//! batch mode) the user is prompted with a widget matching the
//! variable kind: Input for text and numbers, Confirm for booleans,
//! Select/MultiSelect for option kinds, and an external editor for
//! multiline text. An empty answer means "no answer" and lets the
//! engine fall back to the declared default.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Editor, Input, MultiSelect, Select};
use typefill_core::{SourceError, Value, ValueSource, VarKind, VariableSpec};

#[derive(Debug)]
pub enum PresetError {
    /// A --var argument without a '=' separator.
    Malformed(String),
}

impl fmt::Display for PresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetError::Malformed(arg) => {
                write!(f, "malformed --var '{arg}': expected NAME=VALUE")
            }
        }
    }
}

impl std::error::Error for PresetError {}

/// Parse repeated `--var NAME=VALUE` arguments. Values are kept as
/// text; the engine coerces them to the declared kind.
pub fn parse_presets(vars: &[String]) -> Result<HashMap<String, Value>, PresetError> {
    let mut presets = HashMap::new();
    for arg in vars {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| PresetError::Malformed(arg.clone()))?;
        if name.is_empty() {
            return Err(PresetError::Malformed(arg.clone()));
        }
        presets.insert(name.to_string(), Value::text(value));
    }
    Ok(presets)
}

pub struct CliSource {
    theme: ColorfulTheme,
    /// Keyed by prompt path, so `--var person.name=x` reaches nested
    /// fields.
    presets: HashMap<String, Value>,
    batch: bool,
}

impl CliSource {
    pub fn new(presets: HashMap<String, Value>, batch: bool) -> Self {
        CliSource { theme: ColorfulTheme::default(), presets, batch }
    }

    fn input(&self, spec: &VariableSpec, path: &str) -> Result<Option<Value>, SourceError> {
        let mut prompt = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt_text(spec, path))
            .allow_empty(true);
        if let Some(default) = spec.default_value.as_ref().and_then(Value::as_str) {
            prompt = prompt.with_initial_text(default);
        }
        let answer = prompt.interact_text().map_err(map_dialoguer)?;
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(Value::text(answer)))
    }

    fn edit(&self, spec: &VariableSpec, path: &str) -> Result<Option<Value>, SourceError> {
        eprintln!("Opening editor for {}", prompt_text(spec, path));
        let initial = spec.default_value.as_ref().and_then(Value::as_str).unwrap_or("");
        let edited = Editor::new().edit(initial).map_err(map_dialoguer)?;
        match edited {
            Some(text) if !text.is_empty() => Ok(Some(Value::text(text))),
            _ => Ok(None),
        }
    }

    fn confirm(&self, spec: &VariableSpec, path: &str) -> Result<Option<Value>, SourceError> {
        let mut prompt =
            Confirm::with_theme(&self.theme).with_prompt(prompt_text(spec, path));
        if let Some(default) = spec.default_value.as_ref().and_then(Value::as_bool) {
            prompt = prompt.default(default);
        }
        match prompt.interact_opt().map_err(map_dialoguer)? {
            Some(answer) => Ok(Some(Value::bool(answer))),
            None => Ok(None),
        }
    }

    fn select_one(&self, spec: &VariableSpec, path: &str) -> Result<Option<Value>, SourceError> {
        let labels: Vec<&str> = spec.options.iter().map(|o| o.label.as_str()).collect();
        let picked = Select::with_theme(&self.theme)
            .with_prompt(prompt_text(spec, path))
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(map_dialoguer)?;
        Ok(picked.map(|i| Value::text(labels[i])))
    }

    fn select_many(&self, spec: &VariableSpec, path: &str) -> Result<Option<Value>, SourceError> {
        let labels: Vec<&str> = spec.options.iter().map(|o| o.label.as_str()).collect();
        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt_text(spec, path))
            .items(&labels)
            .interact_opt()
            .map_err(map_dialoguer)?;
        match picked {
            Some(indices) if !indices.is_empty() => Ok(Some(Value::Sequence(
                indices.into_iter().map(|i| Value::text(labels[i])).collect(),
            ))),
            _ => Ok(None),
        }
    }
}

impl ValueSource for CliSource {
    fn ask(&mut self, spec: &VariableSpec, path: &str) -> Result<Option<Value>, SourceError> {
        if let Some(preset) = self.presets.get(path) {
            return Ok(Some(preset.clone()));
        }
        if self.batch {
            return Ok(None);
        }
        match spec.kind {
            VarKind::Select => self.select_one(spec, path),
            VarKind::Multiselect => self.select_many(spec, path),
            VarKind::Boolean => self.confirm(spec, path),
            VarKind::Text if spec.multiline => self.edit(spec, path),
            _ => self.input(spec, path),
        }
    }

    fn confirm_continue(&mut self, name: &str) -> Result<bool, SourceError> {
        if self.batch {
            return Ok(false);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(format!("Add another {name}?"))
            .default(false)
            .interact()
            .map_err(map_dialoguer)
    }

    fn section(&mut self, heading: &str) {
        eprintln!("\n{heading}");
    }
}

fn prompt_text(spec: &VariableSpec, path: &str) -> String {
    match spec.description.as_deref() {
        Some(desc) if !desc.is_empty() => format!("{path} ({desc})"),
        _ => path.to_string(),
    }
}

fn map_dialoguer(err: dialoguer::Error) -> SourceError {
    let dialoguer::Error::IO(io) = err;
    if io.kind() == ErrorKind::Interrupted || io.kind() == ErrorKind::UnexpectedEof {
        SourceError::Cancelled
    } else {
        SourceError::Io(io)
    }
}
