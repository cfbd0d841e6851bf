//! Declaration parser.
//!
//! A state machine over scanned lines. `Top` accepts new declarations
//! (at the document level or inside any number of open component
//! frames, tracked by an explicit stack); `InOptions` collects select
//! entries; `InMultilineDefault` collects a literal default block.
//!
//! The parser is deliberately permissive: a line that does not match
//! the sigil-prefixed declaration form is skipped, never failed.
//! Structure violations that cannot be skipped (an unmatched `}`) are
//! reported with their line number.

use thiserror::Error;
use tracing::debug;

use super::lexer::{self, dedent, Line, LineKind, INDENT_WIDTH};
use super::types::{OptionEntry, VarKind, VariableSpec};
use crate::value::Value;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: unmatched '}}' outside any block")]
    UnmatchedBlockClose { line: usize },
}

/// Parse a declaration block into an ordered list of specs.
pub fn parse(block: &str) -> Result<Vec<VariableSpec>, ParseError> {
    let mut parser = Parser::new();
    for line in lexer::scan(block) {
        // The delimiter terminates scanning wherever it appears;
        // anything mid-construction keeps what it accumulated.
        if line.kind == LineKind::BodyDelimiter {
            break;
        }
        match parser.state {
            State::Top => parser.top_line(&line)?,
            State::InOptions => parser.option_line(&line),
            State::InMultilineDefault => parser.default_line(&line),
        }
    }
    Ok(parser.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Top,
    InOptions,
    InMultilineDefault,
}

struct Parser {
    state: State,
    /// Finished top-level specs, in declaration order.
    top: Vec<VariableSpec>,
    /// Open component frames, innermost last.
    scopes: Vec<VariableSpec>,
    /// Spec currently collecting options or a literal default.
    pending: Option<VariableSpec>,
    /// Literal default accumulator.
    buffer: String,
    /// Dedent width for literal default content.
    literal_indent: usize,
    /// Indent of option labels; continuations sit one unit deeper.
    option_indent: usize,
}

impl Parser {
    fn new() -> Self {
        Parser {
            state: State::Top,
            top: Vec::new(),
            scopes: Vec::new(),
            pending: None,
            buffer: String::new(),
            literal_indent: INDENT_WIDTH,
            option_indent: INDENT_WIDTH,
        }
    }

    fn top_line(&mut self, line: &Line<'_>) -> Result<(), ParseError> {
        match line.kind {
            LineKind::DeclStart => self.declaration(line),
            LineKind::SectionStart => {
                if self.scopes.is_empty() {
                    let heading = line.trimmed().trim_start_matches('#').trim();
                    self.top.push(VariableSpec::section(heading));
                } else {
                    debug!(line = line.number, "section heading inside component ignored");
                }
            }
            LineKind::BlockClose => match self.scopes.pop() {
                Some(completed) => self.finalize(completed),
                None => return Err(ParseError::UnmatchedBlockClose { line: line.number }),
            },
            // Blank lines and anything unparseable are skipped.
            LineKind::Blank | LineKind::Text => {}
            LineKind::BodyDelimiter => unreachable!("delimiter handled by the driver"),
        }
        Ok(())
    }

    /// Parse a `$name[]?: type ...` line in its various forms.
    fn declaration(&mut self, line: &Line<'_>) {
        let trimmed = line.trimmed();
        let Some((name_part, rest)) = trimmed[1..].split_once(':') else {
            debug!(line = line.number, "declaration without ':' skipped");
            return;
        };

        let mut name = name_part.trim();
        let is_array = name.ends_with("[]");
        if is_array {
            name = name[..name.len() - 2].trim_end();
        }

        // `// description` trails everything else on the line.
        let (type_part, description) = match rest.split_once("//") {
            Some((t, d)) => (t.trim(), Some(d.trim()).filter(|d| !d.is_empty())),
            None => (rest.trim(), None),
        };

        let mut spec = VariableSpec::new(name, VarKind::Text);
        spec.is_array = is_array;
        spec.description = description.map(str::to_string);

        if let Some(token) = type_part.strip_suffix('{') {
            spec.kind = VarKind::parse(token.trim());
            match spec.kind {
                VarKind::Select | VarKind::Multiselect => {
                    self.option_indent = line.indent + INDENT_WIDTH;
                    self.pending = Some(spec);
                    self.state = State::InOptions;
                }
                VarKind::Text => {
                    spec.multiline = true;
                    self.literal_indent = line.indent + INDENT_WIDTH;
                    self.buffer.clear();
                    self.pending = Some(spec);
                    self.state = State::InMultilineDefault;
                }
                VarKind::Component => {
                    self.scopes.push(spec);
                }
                // A block on any other type has no meaning; keep the
                // spec, validation reports the type.
                _ => self.finalize(spec),
            }
        } else if let Some((token, literal)) = type_part.split_once('=') {
            spec.kind = VarKind::parse(token.trim());
            spec.default_value = Some(parse_default_literal(&spec.kind, literal.trim()));
            self.finalize(spec);
        } else {
            spec.kind = VarKind::parse(type_part);
            self.finalize(spec);
        }
    }

    fn option_line(&mut self, line: &Line<'_>) {
        match line.kind {
            LineKind::BlockClose => self.close_options(),
            LineKind::Blank => {}
            _ => {
                let continuation = line.indent >= self.option_indent + INDENT_WIDTH;
                let Some(pending) = self.pending.as_mut() else { return };
                if continuation {
                    if let Some(option) = pending.options.last_mut() {
                        let content = dedent(line.raw, self.option_indent + INDENT_WIDTH);
                        match option.value.as_mut() {
                            Some(value) => {
                                value.push('\n');
                                value.push_str(content);
                            }
                            None => option.value = Some(content.to_string()),
                        }
                        return;
                    }
                }
                pending.options.push(OptionEntry::new(line.trimmed()));
            }
        }
    }

    fn close_options(&mut self) {
        if let Some(mut spec) = self.pending.take() {
            for option in &mut spec.options {
                if let Some(value) = option.value.as_mut() {
                    *value = value.trim().to_string();
                }
            }
            self.finalize(spec);
        }
        self.state = State::Top;
    }

    fn default_line(&mut self, line: &Line<'_>) {
        match line.kind {
            LineKind::BlockClose => self.close_literal_default(),
            _ => {
                self.buffer.push_str(dedent(line.raw, self.literal_indent));
                self.buffer.push('\n');
            }
        }
    }

    fn close_literal_default(&mut self) {
        if let Some(mut spec) = self.pending.take() {
            spec.default_value = Some(Value::text(trim_blank_edges(&self.buffer)));
            self.finalize(spec);
        }
        self.buffer.clear();
        self.state = State::Top;
    }

    /// Append a finished spec to its owning scope: the innermost open
    /// component, or the top-level list.
    fn finalize(&mut self, spec: VariableSpec) {
        match self.scopes.last_mut() {
            Some(frame) => frame.component_fields.push(spec),
            None => self.top.push(spec),
        }
    }

    /// Finalize whatever is mid-construction and return the spec list.
    fn finish(mut self) -> Vec<VariableSpec> {
        match self.state {
            State::InOptions => self.close_options(),
            State::InMultilineDefault => self.close_literal_default(),
            State::Top => {}
        }
        while let Some(completed) = self.scopes.pop() {
            self.finalize(completed);
        }
        debug!(count = self.top.len(), "parsed declaration block");
        self.top
    }
}

/// Parse a `= literal` default according to the declared type. Typed
/// literals that fail to parse are kept as raw text for validation to
/// report.
fn parse_default_literal(kind: &VarKind, literal: &str) -> Value {
    match kind {
        VarKind::Boolean => match literal.to_ascii_lowercase().as_str() {
            "true" => Value::bool(true),
            "false" => Value::bool(false),
            _ => Value::text(literal),
        },
        VarKind::Number => literal
            .parse::<f64>()
            .map(Value::number)
            .unwrap_or_else(|_| Value::text(literal)),
        _ => Value::text(literal),
    }
}

fn trim_blank_edges(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).map_or(start, |i| i + 1);
    lines[start..end].join("\n")
}
