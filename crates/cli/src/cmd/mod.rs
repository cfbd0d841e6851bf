pub mod check;
pub mod doctor;
pub mod parse;
pub mod render;

use std::path::Path;

use typefill_core::config::loader::{self, default_config_path};
use typefill_core::config::types::ResolvedConfig;
use typefill_core::ParsedTemplate;

use crate::input::{self, TemplateSource};
use crate::InputArgs;

/// Load configuration or exit with a FAIL report: the cause, and
/// where we looked when no explicit path was given.
pub(crate) fn load_config(cmd: &str, path: Option<&Path>) -> ResolvedConfig {
    match loader::load(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("FAIL tyf {cmd}");
            println!("{e}");
            if path.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}

/// Resolve the input source, fetch the text, and parse it, exiting
/// with a FAIL report on any error along the way.
pub(crate) fn load_template(
    cmd: &str,
    args: &InputArgs,
    cfg: &ResolvedConfig,
) -> ParsedTemplate {
    let source = match input::select(args, cfg) {
        Ok(s) => s,
        Err(e) => fail(cmd, &e),
    };
    let text = match input::read(&source) {
        Ok(t) => t,
        Err(e) => fail(cmd, &e),
    };
    match parse_any(&source, &text) {
        Ok(tpl) => tpl,
        Err(e) => fail(cmd, &e),
    }
}

/// Parse the template text, sniffing the structured JSON/YAML form
/// from the source's file extension.
fn parse_any(
    source: &TemplateSource,
    text: &str,
) -> Result<ParsedTemplate, Box<dyn std::error::Error>> {
    let basename = source.basename();
    if basename.ends_with(".json") {
        Ok(ParsedTemplate::from_json(text)?)
    } else if basename.ends_with(".yaml") || basename.ends_with(".yml") {
        Ok(ParsedTemplate::from_yaml(text)?)
    } else {
        Ok(ParsedTemplate::parse(text)?)
    }
}

pub(crate) fn fail<E: std::fmt::Display>(cmd: &str, err: &E) -> ! {
    println!("FAIL tyf {cmd}");
    println!("{err}");
    std::process::exit(1);
}
