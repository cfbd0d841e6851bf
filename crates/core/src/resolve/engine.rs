//! The resolution engine.
//!
//! Walks the spec list in declaration order, producing an
//! [`Environment`]. Each step may consult the value source, so the
//! whole pass is synchronous and sequential: later conditions can
//! depend on earlier answers, never the other way around.

use std::collections::HashMap;

use tera::Context;
use thiserror::Error;
use tracing::{debug, trace};

use super::condition;
use super::source::{SourceError, ValueSource};
use crate::decl::types::{VarKind, VariableSpec};
use crate::value::{Scalar, Value};

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("variable '{name}': reference to undeclared component '{reference}'")]
    UnknownReference { name: String, reference: String },
}

/// The resolved name-to-value bindings, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    entries: Vec<(String, Value)>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into a substitution context: components become nested
    /// objects, arrays become lists.
    pub fn to_context(&self) -> Context {
        let mut ctx = Context::new();
        for (name, value) in &self.entries {
            ctx.insert(name, &value.to_json());
        }
        ctx
    }
}

/// Resolve a spec list against a value source.
///
/// Any source error aborts immediately; the partial environment is
/// discarded, never returned.
pub fn resolve(
    specs: &[VariableSpec],
    source: &mut dyn ValueSource,
) -> Result<Environment, ResolveError> {
    let mut resolver = Resolver { source, structures: HashMap::new() };
    let env = resolver.resolve_list(specs, "", &Context::new())?;
    debug!(variables = env.len(), "resolution complete");
    Ok(env)
}

struct Resolver<'a> {
    source: &'a mut dyn ValueSource,
    /// Component field lists seen so far, for uppercase references.
    structures: HashMap<String, Vec<VariableSpec>>,
}

impl Resolver<'_> {
    /// Resolve one scope (top level or a component instance).
    /// `outer` carries the enclosing scopes' bindings for condition
    /// evaluation; names in the current scope shadow it.
    fn resolve_list(
        &mut self,
        specs: &[VariableSpec],
        prefix: &str,
        outer: &Context,
    ) -> Result<Environment, ResolveError> {
        let mut env = Environment::new();

        for spec in specs {
            if spec.is_section() {
                self.source.section(spec.prompt_label());
                continue;
            }

            if spec.kind == VarKind::Component {
                self.structures.insert(spec.name.clone(), spec.component_fields.clone());
            }

            if let Some(cond) = spec.condition.as_deref() {
                let mut ctx = outer.clone();
                for (name, value) in env.iter() {
                    ctx.insert(name, &value.to_json());
                }
                match condition::evaluate(cond, &ctx) {
                    Ok(true) => {}
                    Ok(false) => {
                        trace!(name = %spec.name, "condition false, skipping");
                        continue;
                    }
                    Err(e) => {
                        debug!(name = %spec.name, error = %e, "condition failed to evaluate, skipping");
                        continue;
                    }
                }
            }

            // Preset values bind without asking.
            if let Some(preset) = &spec.value {
                env.insert(&spec.name, preset.clone());
                continue;
            }

            let path = join_path(prefix, &spec.name);
            let value = if spec.is_array {
                let mut items = Vec::new();
                loop {
                    items.push(self.resolve_one(spec, &path, outer, &env)?);
                    if !self.source.confirm_continue(spec.prompt_label())? {
                        break;
                    }
                }
                Value::Sequence(items)
            } else {
                self.resolve_one(spec, &path, outer, &env)?
            };

            env.insert(&spec.name, value);
        }

        Ok(env)
    }

    /// Resolve a single instance of the spec's base kind.
    fn resolve_one(
        &mut self,
        spec: &VariableSpec,
        path: &str,
        outer: &Context,
        env: &Environment,
    ) -> Result<Value, ResolveError> {
        let fields = match &spec.kind {
            VarKind::Component => Some(spec.component_fields.clone()),
            VarKind::Reference(reference) => Some(
                self.structures
                    .get(reference)
                    .cloned()
                    .ok_or_else(|| ResolveError::UnknownReference {
                        name: spec.name.clone(),
                        reference: reference.clone(),
                    })?,
            ),
            _ => None,
        };

        if let Some(fields) = fields {
            let mut ctx = outer.clone();
            for (name, value) in env.iter() {
                ctx.insert(name, &value.to_json());
            }
            let nested = self.resolve_list(&fields, path, &ctx)?;
            let mapping = nested.entries.into_iter().collect();
            return Ok(Value::Mapping(mapping));
        }

        let answer = self.source.ask(spec, path)?;
        let answered = match answer {
            Some(v) if !v.is_empty_text() => v,
            other => {
                if let Some(default) = &spec.default_value {
                    return Ok(coerce(default.clone(), &spec.kind));
                }
                other.unwrap_or_else(|| Value::text(""))
            }
        };

        Ok(finish_answer(answered, spec))
    }
}

/// Post-process a raw answer: map select labels to their declared
/// values and coerce text into the declared kind.
fn finish_answer(value: Value, spec: &VariableSpec) -> Value {
    match &spec.kind {
        VarKind::Select => match value.as_str() {
            Some(label) => Value::text(spec.option_value_for(label)),
            None => value,
        },
        VarKind::Multiselect => match value {
            Value::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|item| match item.as_str() {
                        Some(label) => Value::text(spec.option_value_for(label)),
                        None => item,
                    })
                    .collect(),
            ),
            Value::Scalar(Scalar::Text(label)) => {
                Value::Sequence(vec![Value::text(spec.option_value_for(&label))])
            }
            other => other,
        },
        kind => coerce(value, kind),
    }
}

/// Coerce text answers into the declared kind where the conversion is
/// unambiguous. Unparseable text passes through untouched.
fn coerce(value: Value, kind: &VarKind) -> Value {
    match (kind, &value) {
        (VarKind::Number, Value::Scalar(Scalar::Text(s))) => {
            s.trim().parse::<f64>().map(Value::number).unwrap_or(value)
        }
        (VarKind::Boolean, Value::Scalar(Scalar::Text(s))) => {
            match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "y" => Value::bool(true),
                "false" | "no" | "n" => Value::bool(false),
                _ => value,
            }
        }
        _ => value,
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
