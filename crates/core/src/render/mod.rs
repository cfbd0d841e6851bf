//! Body rendering.
//!
//! The body is handed to Tera as a black box once variables are
//! resolved. Errors are split into two camps for diagnostics: the body
//! failed to parse as a template at all, or it parsed but execution
//! hit a problem (most commonly a name that was never resolved, e.g.
//! because its condition skipped it).

mod filters;

use tera::Tera;
use thiserror::Error;

use crate::resolve::engine::Environment;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template body failed to parse: {}", flatten(.0))]
    Syntax(#[source] tera::Error),

    #[error("undefined name in template: {name}")]
    Undefined {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("template execution failed: {}", flatten(.0))]
    Execution(#[source] tera::Error),
}

/// Render the body against a resolved environment.
pub fn render(body: &str, env: &Environment) -> Result<String, RenderError> {
    let mut tera = Tera::default();
    filters::register(&mut tera);
    tera.add_raw_template("body", body).map_err(RenderError::Syntax)?;

    let context = env.to_context();
    tera.render("body", &context).map_err(|e| match undefined_name(&e) {
        Some(name) => RenderError::Undefined { name, source: e },
        None => RenderError::Execution(e),
    })
}

/// Tera reports a missing context variable deep in its error chain as
/// ``Variable `x` not found in context``; pull the name back out so
/// the failure is distinguishable from other execution errors.
fn undefined_name(error: &tera::Error) -> Option<String> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(error);
    while let Some(e) = current {
        let message = e.to_string();
        if let Some(rest) = message.strip_prefix("Variable `") {
            if let Some((name, tail)) = rest.split_once('`') {
                if tail.contains("not found in context") {
                    return Some(name.to_string());
                }
            }
        }
        current = e.source();
    }
    None
}

/// Flatten a Tera error chain into one line; Tera's top-level message
/// alone ("Failed to render 'body'") says nothing useful.
fn flatten(error: &tera::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = std::error::Error::source(error);
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}
