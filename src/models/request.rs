//! HTTP request data models.
//!
//! A [`RequestTemplate`] is what the collection document describes: method,
//! URL, headers and an optional JSON body, any string of which may hold
//! `{{placeholders}}`. Rendering a template against an environment produces a
//! [`PreparedRequest`], the concrete parameters handed to the transport.

use crate::environment::EnvironmentStore;
use crate::variables::{render, substitute_variables, VarError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unrendered request as written in the collection document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// HTTP method, e.g. `GET`
    pub method: String,

    /// Target URL, may contain placeholders
    pub url: String,

    /// Request headers in document order.
    ///
    /// Values may contain placeholders; names are sent as written.
    pub headers: Vec<(String, String)>,

    /// Optional JSON body; any string leaf may contain placeholders
    pub body: Option<Value>,
}

impl RequestTemplate {
    /// Creates a template with no headers and no body
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Sets a header, replacing an earlier one with the same name
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.headers.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    /// Substitutes every placeholder against `env`
    ///
    /// Header names are kept verbatim; method, URL, header values and the
    /// body are rendered. Each call gets a fresh request id.
    pub fn render(&self, env: &EnvironmentStore) -> Result<PreparedRequest, VarError> {
        let headers = self
            .headers
            .iter()
            .map(|(name, value)| Ok((name.clone(), substitute_variables(value, env)?)))
            .collect::<Result<Vec<_>, VarError>>()?;

        let json = match &self.body {
            Some(body) => Some(render(body, env)?),
            None => None,
        };

        Ok(PreparedRequest {
            id: Uuid::new_v4().to_string(),
            method: substitute_variables(&self.method, env)?,
            url: substitute_variables(&self.url, env)?,
            headers,
            json,
        })
    }
}

/// Concrete request parameters passed to a transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedRequest {
    /// Unique identifier for correlating log lines.
    pub id: String,

    /// HTTP method
    pub method: String,

    /// Target URL
    pub url: String,

    /// Request headers in document order
    pub headers: Vec<(String, String)>,

    /// JSON body, sent with `Content-Type: application/json`
    pub json: Option<Value>,
}

impl PreparedRequest {
    /// Gets a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Checks if the request carries a body
    pub fn has_body(&self) -> bool {
        self.json.is_some()
    }
}
