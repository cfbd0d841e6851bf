//! Condition evaluation.
//!
//! A condition string is a boolean expression over the variables
//! resolved so far. Evaluation is delegated to the substitution
//! engine itself: the expression is wrapped in an `{% if %}` tag and
//! rendered against the partial environment, so conditions share the
//! body's expression syntax exactly.

use tera::{Context, Tera};

/// Evaluate a condition against the environment resolved so far.
pub fn evaluate(condition: &str, context: &Context) -> Result<bool, tera::Error> {
    let wrapped = format!("{{% if {} %}}1{{% endif %}}", condition.trim());
    let mut tera = Tera::default();
    tera.add_raw_template("__condition__", &wrapped)?;
    let rendered = tera.render("__condition__", context)?;
    Ok(rendered.trim() == "1")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, serde_json::Value)]) -> Context {
        let mut c = Context::new();
        for (k, v) in pairs {
            c.insert(*k, v);
        }
        c
    }

    #[test]
    fn numeric_comparison() {
        let c = ctx(&[("age", serde_json::json!(20))]);
        assert!(evaluate("age > 17", &c).unwrap());
        let c = ctx(&[("age", serde_json::json!(10))]);
        assert!(!evaluate("age > 17", &c).unwrap());
    }

    #[test]
    fn boolean_variable() {
        let c = ctx(&[("enabled", serde_json::json!(true))]);
        assert!(evaluate("enabled", &c).unwrap());
        assert!(!evaluate("not enabled", &c).unwrap());
    }

    #[test]
    fn string_equality() {
        let c = ctx(&[("mode", serde_json::json!("fast"))]);
        assert!(evaluate("mode == \"fast\"", &c).unwrap());
        assert!(!evaluate("mode == \"slow\"", &c).unwrap());
    }

    #[test]
    fn unresolved_name_is_an_error() {
        let c = Context::new();
        assert!(evaluate("missing > 3", &c).is_err());
    }

    #[test]
    fn malformed_expression_is_an_error() {
        let c = Context::new();
        assert!(evaluate(">>>", &c).is_err());
    }
}
