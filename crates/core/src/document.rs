//! Template document splitting.
//!
//! A template document is split once on the first standalone `---`
//! line into a declaration block and a body. Any later `---` lines
//! belong to the body verbatim.

/// A raw template document, split but not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    /// Everything above the first standalone `---` line.
    pub declarations: String,
    /// Everything below it.
    pub body: String,
}

/// Split raw template text on the first standalone `---` line.
///
/// Line endings are normalized (`\r\n` to `\n`) before splitting. A
/// document without a delimiter has no declarations; the whole text is
/// treated as body so plain files still render.
pub fn split(content: &str) -> TemplateDocument {
    let normalized = content.replace("\r\n", "\n");

    if let Some(pos) = find_delimiter(&normalized) {
        let declarations = normalized[..pos].to_string();
        // Skip the delimiter line itself and its trailing newline.
        let after = &normalized[pos..];
        let body = after
            .split_once('\n')
            .map(|(_, rest)| rest.to_string())
            .unwrap_or_default();
        TemplateDocument { declarations, body }
    } else {
        TemplateDocument { declarations: String::new(), body: normalized }
    }
}

/// Byte offset of the start of the first line whose trimmed content is
/// exactly `---`.
fn find_delimiter(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == "---" {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_basic_document() {
        let doc = split("$name: text\n---\nHello {{ name }}!");
        assert_eq!(doc.declarations, "$name: text\n");
        assert_eq!(doc.body, "Hello {{ name }}!");
    }

    #[test]
    fn split_without_delimiter_is_all_body() {
        let doc = split("just some text\nwith lines");
        assert!(doc.declarations.is_empty());
        assert_eq!(doc.body, "just some text\nwith lines");
    }

    #[test]
    fn split_normalizes_crlf() {
        let doc = split("$a: text\r\n---\r\nbody\r\n");
        assert_eq!(doc.declarations, "$a: text\n");
        assert_eq!(doc.body, "body\n");
    }

    #[test]
    fn split_only_first_delimiter_counts() {
        let doc = split("$a: text\n---\nfront\n---\nback");
        assert_eq!(doc.declarations, "$a: text\n");
        assert_eq!(doc.body, "front\n---\nback");
    }

    #[test]
    fn split_delimiter_with_surrounding_whitespace() {
        let doc = split("$a: text\n  ---  \nbody");
        assert_eq!(doc.declarations, "$a: text\n");
        assert_eq!(doc.body, "body");
    }

    #[test]
    fn split_delimiter_on_last_line() {
        let doc = split("$a: text\n---");
        assert_eq!(doc.declarations, "$a: text\n");
        assert_eq!(doc.body, "");
    }
}
