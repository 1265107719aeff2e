//! The callable request.
//!
//! Calling a [`Request`] runs one full invocation:
//!
//! 1. snapshot the collection's shared environment
//! 2. merge the pre-request script's literal bindings into the snapshot
//! 3. merge explicit overrides into the snapshot (they win over everything)
//! 4. render the template against the snapshot
//! 5. send it through the transport
//! 6. resolve the test script's bindings against the response and merge them
//!    into the shared environment
//! 7. return the response
//!
//! Step 6 is the only write to shared state. A failure at any step aborts the
//! invocation and leaves the shared environment untouched.

use crate::environment::SharedEnvironment;
use crate::error::Error;
use crate::executor::Transport;
use crate::models::{HttpResponse, RequestTemplate};
use crate::scripts::{extract_bindings, resolve_bindings, ScriptEvent, Trigger};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A templated HTTP call with its scripts.
///
/// The request holds a handle to its collection's environment: it aliases the
/// collection's store and only copies it for the per-call snapshot.
#[derive(Clone)]
pub struct Request {
    name: String,
    display_name: String,
    events: Vec<ScriptEvent>,
    template: RequestTemplate,
    environment: SharedEnvironment,
    transport: Arc<dyn Transport>,
}

impl Request {
    /// Creates a request bound to `environment` and `transport`
    pub fn new(
        display_name: impl Into<String>,
        events: Vec<ScriptEvent>,
        template: RequestTemplate,
        environment: SharedEnvironment,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let display_name = display_name.into();
        Self {
            name: crate::parser::names::normalize_func_name(&display_name),
            display_name,
            events,
            template,
            environment,
            transport,
        }
    }

    /// Normalized identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name as written in the document
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The unrendered request
    pub fn template(&self) -> &RequestTemplate {
        &self.template
    }

    /// Attached scripts
    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    /// The shared environment this request reads and writes
    pub fn environment(&self) -> &SharedEnvironment {
        &self.environment
    }

    /// True if a script with `trigger` is attached
    pub fn has_script(&self, trigger: Trigger) -> bool {
        self.events.iter().any(|event| event.trigger == trigger)
    }

    /// Lines of every script with `trigger`, in document order
    pub fn script_lines(&self, trigger: Trigger) -> impl Iterator<Item = &str> {
        self.events
            .iter()
            .filter(move |event| event.trigger == trigger)
            .flat_map(|event| event.lines.iter().map(String::as_str))
    }

    /// Invokes the request with no overrides
    pub fn call(&self) -> Result<HttpResponse, Error> {
        self.call_with(std::iter::empty::<(&str, Value)>())
    }

    /// Invokes the request; `overrides` take precedence over every other
    /// variable source for this call only.
    ///
    /// # Errors
    ///
    /// - [`Error::Variable`] if the template references an unknown variable
    /// - [`Error::Transport`] with the transport's own error
    /// - [`Error::Decode`] if a test script reads a body that is not JSON
    /// - [`Error::Script`] if a test script reads a missing response field
    pub fn call_with<I, K, V>(&self, overrides: I) -> Result<HttpResponse, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut snapshot = self.environment.snapshot();

        if self.has_script(Trigger::PreRequest) {
            let bindings = extract_bindings(self.script_lines(Trigger::PreRequest));
            log::trace!(
                "{}: {} pre-request binding(s)",
                self.name,
                bindings.len()
            );
            snapshot.update(bindings.literals());
        }

        snapshot.update(overrides);

        let prepared = self.template.render(&snapshot)?;
        log::debug!(
            "{}: {} {} [{}]",
            self.name,
            prepared.method,
            prepared.url,
            prepared.id
        );

        let response = self.transport.send(&prepared)?;
        log::debug!(
            "{}: {} {} in {:?} [{}]",
            self.name,
            response.status_code,
            response.status_text,
            response.duration,
            prepared.id
        );

        if self.has_script(Trigger::Test) {
            let bindings = extract_bindings(self.script_lines(Trigger::Test));
            let body = if bindings.needs_response() {
                response.json()?
            } else {
                Value::Null
            };
            let resolved = resolve_bindings(&bindings, &body)?;
            log::trace!("{}: storing {} test binding(s)", self.name, resolved.len());
            self.environment.update(resolved);
        }

        Ok(response)
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .field("events", &self.events)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}
