//! Line scanner for the declaration block.
//!
//! Splits the block into classified lines, preserving original
//! indentation. Classification here is purely lexical; what a `Text`
//! line means (option label, continuation, literal default content)
//! depends on the parser state, so the lexer never errors.

/// Indentation unit for option continuations, literal default blocks,
/// and nested component fields.
pub const INDENT_WIDTH: usize = 4;

/// Lexical classification of one declaration-block line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with the `$` sigil: a variable declaration.
    DeclStart,
    /// Starts with the `#` sigil: a section heading.
    SectionStart,
    /// Exactly a closing brace.
    BlockClose,
    /// Exactly the reserved `---` delimiter.
    BodyDelimiter,
    /// Whitespace only.
    Blank,
    /// Anything else; interpreted by the parser in context.
    Text,
}

/// One scanned line with its source position and indentation.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// 1-based line number within the declaration block.
    pub number: usize,
    /// Original line, without the trailing newline.
    pub raw: &'a str,
    /// Leading whitespace in columns (a tab counts as one indent unit).
    pub indent: usize,
    pub kind: LineKind,
}

impl<'a> Line<'a> {
    pub fn trimmed(&self) -> &'a str {
        self.raw.trim()
    }
}

/// Scan the declaration block into classified lines.
pub fn scan(block: &str) -> Vec<Line<'_>> {
    block
        .lines()
        .enumerate()
        .map(|(idx, raw)| {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            Line { number: idx + 1, raw, indent: indent_columns(raw), kind: classify(raw) }
        })
        .collect()
}

fn classify(raw: &str) -> LineKind {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed == "---" {
        LineKind::BodyDelimiter
    } else if trimmed == "}" {
        LineKind::BlockClose
    } else if trimmed.starts_with('$') {
        LineKind::DeclStart
    } else if trimmed.starts_with('#') {
        LineKind::SectionStart
    } else {
        LineKind::Text
    }
}

fn indent_columns(raw: &str) -> usize {
    let mut columns = 0;
    for c in raw.chars() {
        match c {
            ' ' => columns += 1,
            '\t' => columns += INDENT_WIDTH,
            _ => break,
        }
    }
    columns
}

/// Strip up to `columns` columns of leading whitespace, used to dedent
/// option continuations and literal default content.
pub fn dedent(raw: &str, columns: usize) -> &str {
    let mut remaining = columns;
    let mut offset = 0;
    for c in raw.chars() {
        let width = match c {
            ' ' => 1,
            '\t' => INDENT_WIDTH,
            _ => break,
        };
        if width > remaining {
            break;
        }
        remaining -= width;
        offset += c.len_utf8();
    }
    &raw[offset..]
}
