//! Template rendering for the collection runner
//!
//! Request templates carry `{{name}}` placeholders in any string: the URL,
//! header values, the method, and every string leaf of a JSON body. Rendering
//! walks the value recursively and replaces each placeholder with the matching
//! environment variable. Lookup is case-insensitive.
//!
//! Rendering never mutates the environment, and the same `(value, env)` pair
//! always renders to the same output.

use super::VarError;
use crate::environment::EnvironmentStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

/// Matches a single-brace `{name}` after double braces have been collapsed.
static VARIABLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("Failed to compile variable regex"));

/// Renders every string inside `value` against `env`
///
/// - strings have their placeholders substituted
/// - objects keep every key and key order; values are rendered
/// - arrays keep element order; elements are rendered
/// - numbers, booleans and null are returned unchanged
///
/// # Examples
///
/// ```
/// use collection_runner::environment::EnvironmentStore;
/// use collection_runner::variables::render;
/// use serde_json::json;
///
/// let mut env = EnvironmentStore::new();
/// env.set("host", "a.com");
/// env.set("v", "1");
///
/// let template = json!({"url": "{{host}}/x", "headers": {"A": "{{v}}"}});
/// let rendered = render(&template, &env).unwrap();
/// assert_eq!(rendered, json!({"url": "a.com/x", "headers": {"A": "1"}}));
/// ```
pub fn render(value: &Value, env: &EnvironmentStore) -> Result<Value, VarError> {
    match value {
        Value::String(text) => Ok(Value::String(substitute_variables(text, env)?)),
        Value::Object(map) => {
            let mut rendered = Map::with_capacity(map.len());
            for (key, item) in map {
                rendered.insert(key.clone(), render(item, env)?);
            }
            Ok(Value::Object(rendered))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| render(item, env))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

/// Substitutes every placeholder in a single string
///
/// Literal `{{` and `}}` are first collapsed to single braces, then every
/// `{name}` is replaced. Whitespace around the name is ignored. Non-string
/// values are inserted as their JSON text.
///
/// # Errors
///
/// [`VarError::MissingVariable`] naming the first placeholder that has no
/// value, together with every key the environment does hold.
pub fn substitute_variables(text: &str, env: &EnvironmentStore) -> Result<String, VarError> {
    // Fast path: no braces, nothing to substitute
    if !text.contains('{') {
        return Ok(text.to_string());
    }

    let text = text.replace("{{", "{").replace("}}", "}");

    let mut result = String::with_capacity(text.len());
    let mut last_match_end = 0;

    for cap in VARIABLE_REGEX.captures_iter(&text) {
        let (Some(full_match), Some(name)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let name = name.as_str().trim();

        result.push_str(&text[last_match_end..full_match.start()]);
        last_match_end = full_match.end();

        if name.is_empty() {
            result.push_str(full_match.as_str());
            continue;
        }

        let value = env.lookup(name).ok_or_else(|| VarError::MissingVariable {
            name: name.to_string(),
            available: env.keys(),
        })?;
        push_value(&mut result, value);
    }

    result.push_str(&text[last_match_end..]);
    Ok(result)
}

fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(s),
        other => out.push_str(&other.to_string()),
    }
}
