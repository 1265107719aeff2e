//! Script binding extraction for the collection runner
//!
//! Requests may carry pre-request and test scripts. The runner does not
//! execute them; it recognizes a fixed catalog of environment-setter calls and
//! turns each one into a [`Binding`].
//!
//! # Syntax
//!
//! ```text
//! pm.environment.set("token", "abc");
//! var jsonData = pm.response.json();
//! pm.environment.set("userId", jsonData.user.id);
//! ```
//!
//! Extraction runs in two phases:
//!
//! 1. Before the request is sent, every binding is taken literally: the value
//!    is the second argument's text with quotes stripped.
//! 2. After the response arrives, bindings whose value is a response accessor
//!    (`jsonData.<path>` or `pm.response.json().<path>`) are replaced by the
//!    matching field of the decoded response body.
//!
//! Anything outside the catalog is ignored, as are catalog calls with the
//! wrong number of arguments.

pub mod tokenizer;

use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tokenizer::{scan_calls, unquote};

/// Errors raised while resolving bindings against a response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// An accessor referenced a field the decoded response body does not have
    #[error("Response body has no field `{0}`")]
    MissingResponseField(String),
}

/// When a script runs relative to its request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Before the request is sent
    PreRequest,
    /// After the response is received
    Test,
}

impl Trigger {
    /// Parses a document `listen` value
    pub fn from_listen(listen: &str) -> Option<Self> {
        match listen {
            "prerequest" => Some(Trigger::PreRequest),
            "test" => Some(Trigger::Test),
            _ => None,
        }
    }

    /// Returns the document `listen` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::PreRequest => "prerequest",
            Trigger::Test => "test",
        }
    }
}

/// A script attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEvent {
    /// When the script runs
    pub trigger: Trigger,
    /// Source lines in order
    pub lines: Vec<String>,
}

impl ScriptEvent {
    /// Creates a new ScriptEvent
    pub fn new(trigger: Trigger, lines: Vec<String>) -> Self {
        Self { trigger, lines }
    }

    /// Extracts this script's bindings (phase 1)
    pub fn bindings(&self) -> Bindings {
        extract_bindings(self.lines.iter().map(String::as_str))
    }
}

/// An environment-setter call recognized in scripts
#[derive(Debug, Clone, Copy)]
struct Setter {
    namespace: &'static str,
    function: &'static str,
    arity: usize,
}

impl Setter {
    fn matches(&self, callee: &str) -> bool {
        match callee.rsplit_once('.') {
            Some((namespace, function)) => {
                namespace == self.namespace && function == self.function
            }
            None => self.namespace.is_empty() && callee == self.function,
        }
    }
}

const SETTERS: &[Setter] = &[
    Setter { namespace: "pm.environment", function: "set", arity: 2 },
    Setter { namespace: "pm.collectionVariables", function: "set", arity: 2 },
    Setter { namespace: "pm.variables", function: "set", arity: 2 },
    Setter { namespace: "pm.globals", function: "set", arity: 2 },
    Setter { namespace: "postman", function: "setEnvironmentVariable", arity: 2 },
    Setter { namespace: "postman", function: "setGlobalVariable", arity: 2 },
    Setter { namespace: "", function: "setvar", arity: 2 },
];

/// Prefixes that read from the decoded response body
const ACCESSOR_PREFIXES: &[&str] = &["jsonData.", "pm.response.json()."];

/// Dotted path into a decoded response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Parses an accessor expression, e.g. `jsonData.user.id`
    pub fn from_accessor(expression: &str) -> Option<Self> {
        let rest = ACCESSOR_PREFIXES
            .iter()
            .find_map(|prefix| expression.strip_prefix(prefix))?;

        let segments: Vec<String> = rest.split('.').map(str::to_string).collect();
        let valid = segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        });

        valid.then_some(FieldPath(segments))
    }

    /// Looks the path up in `body`; numeric segments index arrays
    pub fn lookup<'a>(&self, body: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(body, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Value side of a binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingValue {
    /// Plain text, used as-is
    Literal(String),
    /// A response accessor, resolved once a response is available
    Response {
        /// The accessor as written
        expression: String,
        /// Path into the response body
        path: FieldPath,
    },
}

impl BindingValue {
    fn parse(text: String) -> Self {
        match FieldPath::from_accessor(&text) {
            Some(path) => BindingValue::Response {
                expression: text,
                path,
            },
            None => BindingValue::Literal(text),
        }
    }

    /// The captured text, before any response resolution
    pub fn as_literal(&self) -> &str {
        match self {
            BindingValue::Literal(text) => text,
            BindingValue::Response { expression, .. } => expression,
        }
    }
}

/// A variable assignment captured from a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Variable name (first argument)
    pub name: String,
    /// Assigned value (second argument)
    pub value: BindingValue,
}

/// Bindings keyed by name, in first-seen order; a later assignment to the same
/// name replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<Binding>,
}

impl Bindings {
    /// Inserts or replaces a binding
    pub fn insert(&mut self, binding: Binding) {
        match self.entries.iter_mut().find(|b| b.name == binding.name) {
            Some(existing) => existing.value = binding.value,
            None => self.entries.push(binding),
        }
    }

    /// Gets a binding by name
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.iter().find(|b| b.name == name)
    }

    /// Iterates bindings in order
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.entries.iter()
    }

    /// Returns the number of bindings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if there are no bindings
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any binding needs the response body
    pub fn needs_response(&self) -> bool {
        self.entries
            .iter()
            .any(|b| matches!(b.value, BindingValue::Response { .. }))
    }

    /// Phase 1 values: every binding as literal text
    pub fn literals(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .map(|b| (b.name.clone(), Value::String(b.value.as_literal().to_string())))
            .collect()
    }
}

/// Extracts bindings from script lines (phase 1)
///
/// # Examples
///
/// ```
/// use collection_runner::scripts::extract_bindings;
///
/// let bindings = extract_bindings([r#"setvar("token", "abc")"#, "console.log(1)"]);
/// assert_eq!(bindings.len(), 1);
/// assert_eq!(bindings.get("token").unwrap().value.as_literal(), "abc");
/// ```
pub fn extract_bindings<'a, I>(lines: I) -> Bindings
where
    I: IntoIterator<Item = &'a str>,
{
    let mut bindings = Bindings::default();

    for line in lines {
        for call in scan_calls(line) {
            let Some(setter) = SETTERS.iter().find(|s| s.matches(call.callee)) else {
                continue;
            };

            if call.args.len() != setter.arity {
                log::warn!(
                    "ignoring `{}` with {} argument(s): {}",
                    call.callee,
                    call.args.len(),
                    line.trim()
                );
                continue;
            }

            let binding = Binding {
                name: unquote(call.args[0]),
                value: BindingValue::parse(unquote(call.args[1])),
            };
            log::trace!("script binding {} = {}", binding.name, binding.value.as_literal());
            bindings.insert(binding);
        }
    }

    bindings
}

/// Resolves bindings against a decoded response body (phase 2)
///
/// Literal bindings keep their text; accessor bindings take the referenced
/// field's value.
///
/// # Errors
///
/// [`ScriptError::MissingResponseField`] if an accessor path is absent from
/// `body`.
pub fn resolve_bindings(
    bindings: &Bindings,
    body: &Value,
) -> Result<Vec<(String, Value)>, ScriptError> {
    bindings
        .iter()
        .map(|binding| {
            let value = match &binding.value {
                BindingValue::Literal(text) => Value::String(text.clone()),
                BindingValue::Response { path, .. } => path
                    .lookup(body)
                    .cloned()
                    .ok_or_else(|| ScriptError::MissingResponseField(path.to_string()))?,
            };
            Ok((binding.name.clone(), value))
        })
        .collect()
}
