//! Variable specification types.
//!
//! A parsed declaration block is an ordered list of [`VariableSpec`]
//! nodes. Order matters twice over: it is the prompting order, and a
//! later variable's condition may reference earlier variables but
//! never later ones.

use std::fmt;

use serde::de::{Deserialize, Deserializer, Error as DeError};
use serde::ser::{Serialize, Serializer};

use crate::value::Value;

/// The kind of a declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarKind {
    Text,
    Number,
    Boolean,
    Select,
    Multiselect,
    Component,
    /// Display-only heading produced by a `# Heading` line.
    Section,
    /// Uppercase type token: a reference to a component declared
    /// earlier in the document, resolved at resolution time.
    Reference(String),
    /// Unrecognized lowercase type token. Accepted structurally by the
    /// parser and reported by validation.
    Unknown(String),
}

impl VarKind {
    /// Parse a type token from a declaration line.
    ///
    /// Recognizes the aliases the original grammar accepts
    /// (`string` for text, `int`/`integer`/`float` for number,
    /// `bool` for boolean).
    pub fn parse(token: &str) -> VarKind {
        match token {
            "text" | "string" => VarKind::Text,
            "number" | "int" | "integer" | "float" => VarKind::Number,
            "bool" | "boolean" => VarKind::Boolean,
            "select" => VarKind::Select,
            "multiselect" => VarKind::Multiselect,
            "component" => VarKind::Component,
            "section" => VarKind::Section,
            _ => {
                if token.chars().next().is_some_and(char::is_uppercase) {
                    VarKind::Reference(token.to_string())
                } else {
                    VarKind::Unknown(token.to_string())
                }
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VarKind::Text => "text",
            VarKind::Number => "number",
            VarKind::Boolean => "boolean",
            VarKind::Select => "select",
            VarKind::Multiselect => "multiselect",
            VarKind::Component => "component",
            VarKind::Section => "section",
            VarKind::Reference(name) => name,
            VarKind::Unknown(token) => token,
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for VarKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VarKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        if token.is_empty() {
            return Err(D::Error::custom("variable type must not be empty"));
        }
        Ok(VarKind::parse(&token))
    }
}

/// One entry of a select or multiselect option list.
///
/// When `value` is absent the label doubles as the value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OptionEntry {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl OptionEntry {
    pub fn new(label: impl Into<String>) -> Self {
        OptionEntry { label: label.into(), value: None }
    }

    pub fn with_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        OptionEntry { label: label.into(), value: Some(value.into()) }
    }

    /// The value this option resolves to.
    pub fn resolved_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.label)
    }
}

/// One declared variable, section marker, or component.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VariableSpec {
    /// Identifier, unique within its scope. Empty for section markers,
    /// which carry their display text in `description`.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: VarKind,

    /// Array variables gather repeated values of the base kind.
    #[serde(default, rename = "array", skip_serializing_if = "std::ops::Not::not")]
    pub is_array: bool,

    /// Multiline text, set by a `text { ... }` default block.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiline: bool,

    /// Prompt label; falls back to `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Boolean expression over previously resolved variables. When it
    /// evaluates false (or fails), the variable is skipped entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    /// Preset value; bound without consulting the value source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Fallback when the value source yields no answer.
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// Numeric lower bound (number kind only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Numeric upper bound (number kind only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Match constraint (text kind only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,

    /// Ordered options (select kinds only); insertion order is display
    /// and resolution order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionEntry>,

    /// Nested field declarations (component kind only).
    #[serde(default, rename = "fields", skip_serializing_if = "Vec::is_empty")]
    pub component_fields: Vec<VariableSpec>,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, kind: VarKind) -> Self {
        VariableSpec {
            name: name.into(),
            kind,
            is_array: false,
            multiline: false,
            description: None,
            condition: None,
            value: None,
            default_value: None,
            min: None,
            max: None,
            regex: None,
            options: Vec::new(),
            component_fields: Vec::new(),
        }
    }

    /// Section marker carrying only display text.
    pub fn section(heading: impl Into<String>) -> Self {
        let mut spec = VariableSpec::new("", VarKind::Section);
        spec.description = Some(heading.into());
        spec
    }

    /// Prompt label: the description when present, the name otherwise.
    pub fn prompt_label(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => &self.name,
        }
    }

    pub fn is_section(&self) -> bool {
        self.kind == VarKind::Section
    }

    /// Map a select answer back to the declared option value.
    ///
    /// Returns the option's value when the answer matches a declared
    /// label; unmatched answers pass through untouched, so sources may
    /// supply option values directly.
    pub fn option_value_for(&self, answer: &str) -> String {
        self.options
            .iter()
            .find(|o| o.label == answer)
            .map(|o| o.resolved_value().to_string())
            .unwrap_or_else(|| answer.to_string())
    }
}
