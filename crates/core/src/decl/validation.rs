//! Declaration validation.
//!
//! Validation is separate from parsing and never fails fast: every
//! violation in a document is collected so authors see them all at
//! once, before any prompting begins.

use std::collections::HashSet;

use thiserror::Error;

use super::types::{VarKind, VariableSpec};
use crate::value::{Scalar, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("variable '{name}': options are required for {kind} variables")]
    MissingOptions { name: String, kind: String },

    #[error("variable '{name}': options are only applicable to select and multiselect variables")]
    UnexpectedOptions { name: String },

    #[error("variable '{name}': min and max are only applicable to number variables")]
    BoundsOnNonNumber { name: String },

    #[error("variable '{name}': min must be less than or equal to max")]
    MinAboveMax { name: String },

    #[error("variable '{name}': regex is only applicable to text variables")]
    RegexOnNonText { name: String },

    #[error("variable '{name}': invalid regex: {message}")]
    InvalidRegex { name: String, message: String },

    #[error("variable '{name}': multiline is only applicable to text variables")]
    MultilineOnNonText { name: String },

    #[error("variable '{name}': default must be a {expected}")]
    DefaultTypeMismatch { name: String, expected: String },

    #[error("variable '{name}': value must be a {expected}")]
    ValueTypeMismatch { name: String, expected: String },

    #[error("variable '{name}': value must be between {min} and {max}")]
    ValueOutOfBounds { name: String, min: f64, max: f64 },

    #[error("variable '{name}': value does not match regex")]
    ValueRegexMismatch { name: String },

    #[error("variable '{name}': value '{value}' is not one of the declared options")]
    ValueNotInOptions { name: String, value: String },

    #[error("variable '{name}': declared more than once in the same scope")]
    DuplicateName { name: String },

    #[error("variable declaration has an empty name")]
    EmptyName,

    #[error("variable '{name}': unknown type '{token}'")]
    UnknownType { name: String, token: String },

    #[error("variable '{name}': reference to undeclared component '{token}'")]
    UnknownReference { name: String, token: String },
}

/// Validate a parsed spec list, returning every violation found.
pub fn validate(specs: &[VariableSpec]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut components = HashSet::new();
    validate_scope(specs, &mut components, &mut issues);
    issues
}

fn validate_scope(
    specs: &[VariableSpec],
    components: &mut HashSet<String>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    for spec in specs {
        if spec.is_section() {
            continue;
        }

        if spec.name.is_empty() {
            issues.push(ValidationIssue::EmptyName);
        } else if !seen.insert(spec.name.clone()) {
            issues.push(ValidationIssue::DuplicateName { name: spec.name.clone() });
        }

        validate_spec(spec, components, issues);

        // A component becomes referable once declared; nested fields
        // form their own naming scope.
        if spec.kind == VarKind::Component {
            validate_scope(&spec.component_fields, components, issues);
            components.insert(spec.name.clone());
        }
    }
}

fn validate_spec(
    spec: &VariableSpec,
    components: &HashSet<String>,
    issues: &mut Vec<ValidationIssue>,
) {
    let name = spec.name.clone();

    match &spec.kind {
        VarKind::Unknown(token) => {
            issues.push(ValidationIssue::UnknownType { name: name.clone(), token: token.clone() });
        }
        VarKind::Reference(token) => {
            if !components.contains(token) {
                issues.push(ValidationIssue::UnknownReference {
                    name: name.clone(),
                    token: token.clone(),
                });
            }
        }
        _ => {}
    }

    // Structural constraints per kind.
    match spec.kind {
        VarKind::Select | VarKind::Multiselect => {
            if spec.options.is_empty() {
                issues.push(ValidationIssue::MissingOptions {
                    name: name.clone(),
                    kind: spec.kind.to_string(),
                });
            }
        }
        _ => {
            if !spec.options.is_empty() {
                issues.push(ValidationIssue::UnexpectedOptions { name: name.clone() });
            }
        }
    }

    if (spec.min.is_some() || spec.max.is_some()) && spec.kind != VarKind::Number {
        issues.push(ValidationIssue::BoundsOnNonNumber { name: name.clone() });
    }
    if let (Some(min), Some(max)) = (spec.min, spec.max) {
        if min > max {
            issues.push(ValidationIssue::MinAboveMax { name: name.clone() });
        }
    }

    if spec.regex.is_some() && spec.kind != VarKind::Text {
        issues.push(ValidationIssue::RegexOnNonText { name: name.clone() });
    }
    if spec.multiline && spec.kind != VarKind::Text {
        issues.push(ValidationIssue::MultilineOnNonText { name: name.clone() });
    }

    let compiled_regex = match spec.regex.as_deref() {
        Some(pattern) => match regex::Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                issues.push(ValidationIssue::InvalidRegex {
                    name: name.clone(),
                    message: e.to_string(),
                });
                None
            }
        },
        None => None,
    };

    if let Some(default) = &spec.default_value {
        check_scalar_type(&name, default, &spec.kind, true, issues);
    }

    if let Some(value) = &spec.value {
        if spec.is_array {
            match value {
                Value::Sequence(items) => {
                    for item in items {
                        check_preset(&name, item, spec, compiled_regex.as_ref(), issues);
                    }
                }
                _ => issues.push(ValidationIssue::ValueTypeMismatch {
                    name: name.clone(),
                    expected: "sequence".into(),
                }),
            }
        } else {
            check_preset(&name, value, spec, compiled_regex.as_ref(), issues);
        }
    }
}

/// Check a preset value against the variable's kind and constraints.
fn check_preset(
    name: &str,
    value: &Value,
    spec: &VariableSpec,
    regex: Option<&regex::Regex>,
    issues: &mut Vec<ValidationIssue>,
) {
    check_scalar_type(name, value, &spec.kind, false, issues);

    match &spec.kind {
        VarKind::Number => {
            if let Some(n) = value.as_number() {
                let min = spec.min.unwrap_or(f64::NEG_INFINITY);
                let max = spec.max.unwrap_or(f64::INFINITY);
                if (spec.min.is_some() || spec.max.is_some()) && (n < min || n > max) {
                    issues.push(ValidationIssue::ValueOutOfBounds {
                        name: name.to_string(),
                        min: spec.min.unwrap_or(f64::NEG_INFINITY),
                        max: spec.max.unwrap_or(f64::INFINITY),
                    });
                }
            }
        }
        VarKind::Text => {
            if let (Some(re), Some(s)) = (regex, value.as_str()) {
                if !re.is_match(s) {
                    issues.push(ValidationIssue::ValueRegexMismatch { name: name.to_string() });
                }
            }
        }
        VarKind::Multiselect => {
            let chosen: Vec<&Value> = match value {
                Value::Sequence(items) => items.iter().collect(),
                other => vec![other],
            };
            for item in chosen {
                if let Some(s) = item.as_str() {
                    let known = spec
                        .options
                        .iter()
                        .any(|o| o.resolved_value() == s || o.label == s);
                    if !known {
                        issues.push(ValidationIssue::ValueNotInOptions {
                            name: name.to_string(),
                            value: s.to_string(),
                        });
                    }
                }
            }
        }
        _ => {}
    }
}

/// Check that a scalar matches the declared kind. `is_default` selects
/// the issue variant so defaults and presets report separately.
fn check_scalar_type(
    name: &str,
    value: &Value,
    kind: &VarKind,
    is_default: bool,
    issues: &mut Vec<ValidationIssue>,
) {
    let expected = match kind {
        VarKind::Number => {
            matches!(value, Value::Scalar(Scalar::Number(_))).then_some(()).ok_or("number")
        }
        VarKind::Boolean => {
            matches!(value, Value::Scalar(Scalar::Bool(_))).then_some(()).ok_or("boolean")
        }
        VarKind::Text | VarKind::Select => {
            matches!(value, Value::Scalar(Scalar::Text(_))).then_some(()).ok_or("string")
        }
        VarKind::Multiselect => match value {
            Value::Scalar(Scalar::Text(_)) | Value::Sequence(_) => Ok(()),
            _ => Err("string or sequence of strings"),
        },
        _ => Ok(()),
    };

    if let Err(expected) = expected {
        if is_default {
            issues.push(ValidationIssue::DefaultTypeMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
            });
        } else {
            issues.push(ValidationIssue::ValueTypeMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::types::OptionEntry;

    fn number_spec(name: &str, min: Option<f64>, max: Option<f64>) -> VariableSpec {
        let mut spec = VariableSpec::new(name, VarKind::Number);
        spec.min = min;
        spec.max = max;
        spec
    }

    #[test]
    fn valid_document_has_no_issues() {
        let mut select = VariableSpec::new("animal", VarKind::Select);
        select.options.push(OptionEntry::new("Cat"));
        let specs = vec![number_spec("age", Some(0.0), Some(120.0)), select];
        assert!(validate(&specs).is_empty());
    }

    #[test]
    fn select_without_options_fails() {
        let specs = vec![VariableSpec::new("animal", VarKind::Select)];
        let issues = validate(&specs);
        assert!(matches!(issues[0], ValidationIssue::MissingOptions { .. }));
    }

    #[test]
    fn bounds_on_text_fail() {
        let mut spec = VariableSpec::new("name", VarKind::Text);
        spec.min = Some(1.0);
        let issues = validate(&[spec]);
        assert!(issues.contains(&ValidationIssue::BoundsOnNonNumber { name: "name".into() }));
    }

    #[test]
    fn preset_number_out_of_bounds_fails() {
        let mut spec = number_spec("count", Some(1.0), Some(10.0));
        spec.value = Some(Value::number(11.0));
        let issues = validate(&[spec]);
        assert!(issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::ValueOutOfBounds { .. })));
    }

    #[test]
    fn preset_number_in_bounds_passes() {
        let mut spec = number_spec("count", Some(1.0), Some(10.0));
        spec.value = Some(Value::number(5.0));
        assert!(validate(&[spec]).is_empty());
    }

    #[test]
    fn min_above_max_fails() {
        let spec = number_spec("n", Some(10.0), Some(1.0));
        let issues = validate(&[spec]);
        assert!(issues.contains(&ValidationIssue::MinAboveMax { name: "n".into() }));
    }

    #[test]
    fn regex_preset_mismatch_fails() {
        let mut spec = VariableSpec::new("slug", VarKind::Text);
        spec.regex = Some("^[a-z-]+$".into());
        spec.value = Some(Value::text("Not A Slug"));
        let issues = validate(&[spec]);
        assert!(issues.contains(&ValidationIssue::ValueRegexMismatch { name: "slug".into() }));
    }

    #[test]
    fn invalid_regex_reported() {
        let mut spec = VariableSpec::new("slug", VarKind::Text);
        spec.regex = Some("(unclosed".into());
        let issues = validate(&[spec]);
        assert!(issues.iter().any(|i| matches!(i, ValidationIssue::InvalidRegex { .. })));
    }

    #[test]
    fn multiselect_preset_must_be_declared_option() {
        let mut spec = VariableSpec::new("langs", VarKind::Multiselect);
        spec.options.push(OptionEntry::with_value("Rust", "rs"));
        spec.value = Some(Value::Sequence(vec![Value::text("rs"), Value::text("go")]));
        let issues = validate(&[spec]);
        assert_eq!(
            issues,
            vec![ValidationIssue::ValueNotInOptions {
                name: "langs".into(),
                value: "go".into()
            }]
        );
    }

    #[test]
    fn duplicate_names_in_scope_fail_but_nested_scopes_are_separate() {
        let mut component = VariableSpec::new("person", VarKind::Component);
        component.component_fields.push(VariableSpec::new("name", VarKind::Text));
        let specs = vec![
            VariableSpec::new("name", VarKind::Text),
            VariableSpec::new("name", VarKind::Text),
            component,
        ];
        let issues = validate(&specs);
        assert_eq!(issues, vec![ValidationIssue::DuplicateName { name: "name".into() }]);
    }

    #[test]
    fn all_violations_collected_together() {
        let mut bad_select = VariableSpec::new("s", VarKind::Select);
        bad_select.regex = Some(".*".into());
        let mut bad_number = number_spec("n", Some(5.0), Some(1.0));
        bad_number.default_value = Some(Value::text("oops"));
        let issues = validate(&[bad_select, bad_number]);
        assert_eq!(issues.len(), 4);
    }

    #[test]
    fn reference_to_later_component_fails() {
        let mut component = VariableSpec::new("Address", VarKind::Component);
        component.component_fields.push(VariableSpec::new("street", VarKind::Text));
        let specs = vec![
            VariableSpec::new("home", VarKind::Reference("Address".into())),
            component,
        ];
        let issues = validate(&specs);
        assert!(issues.iter().any(|i| matches!(i, ValidationIssue::UnknownReference { .. })));

        let specs_ok = {
            let mut component = VariableSpec::new("Address", VarKind::Component);
            component.component_fields.push(VariableSpec::new("street", VarKind::Text));
            vec![component, VariableSpec::new("home", VarKind::Reference("Address".into()))]
        };
        assert!(validate(&specs_ok).is_empty());
    }

    #[test]
    fn unknown_lowercase_type_reported() {
        let specs = vec![VariableSpec::new("x", VarKind::Unknown("widget".into()))];
        let issues = validate(&specs);
        assert_eq!(
            issues,
            vec![ValidationIssue::UnknownType { name: "x".into(), token: "widget".into() }]
        );
    }
}
