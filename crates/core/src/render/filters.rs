//! Extra Tera filters for text scaffolding: slug and case helpers.

use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase};
use tera::{Tera, Value};

pub(crate) fn register(tera: &mut Tera) {
    tera.register_filter("slugify", slugify);
    tera.register_filter("snake_case", snake_case);
    tera.register_filter("pascal_case", pascal_case);
    tera.register_filter("camel_case", camel_case);
    tera.register_filter("kebab_case", kebab_case);
}

fn expect_str<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{filter} filter expects a string")))
}

/// URL-friendly slug: lowercase, hyphen-separated, alphanumerics only.
fn slugify(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = expect_str(value, "slugify")?;
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if (c == ' ' || c == '_' || c == '-') && !out.ends_with('-') {
            out.push('-');
        }
    }
    Ok(Value::String(out.trim_matches('-').to_string()))
}

fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(expect_str(value, "snake_case")?.to_snake_case()))
}

fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(expect_str(value, "pascal_case")?.to_pascal_case()))
}

fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(expect_str(value, "camel_case")?.to_lower_camel_case()))
}

fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(expect_str(value, "kebab_case")?.to_kebab_case()))
}
