//! HTTP response data models.
//!
//! This module defines the response object every transport returns. Test
//! scripts read from it through [`HttpResponse::json`], and execution queues
//! return the last response's decoded body.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found", "Internal Server Error").
    pub status_text: String,

    /// Response headers as key-value pairs.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    ///
    /// Kept as bytes so binary responses survive; decode with
    /// [`HttpResponse::json`] or [`HttpResponse::body_as_string`].
    pub body: Vec<u8>,

    /// Total request duration from start to completion.
    pub duration: Duration,
}

impl HttpResponse {
    /// Creates a new HttpResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Creates a 200 response whose body is `value` serialized as JSON.
    pub fn with_json(value: &Value) -> Self {
        let mut response = Self::new(200, "OK".to_string());
        response.add_header("Content-Type".to_string(), "application/json".to_string());
        response.set_body(value.to_string().into_bytes());
        response
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Checks if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Checks if the response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Attempts to parse the response body as UTF-8 text.
    pub fn body_as_string(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Decodes the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error unchanged when the body is not valid JSON
    /// (an empty body included).
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Adds a header to the response.
    pub fn add_header(&mut self, name: String, value: String) {
        self.headers.insert(name, value);
    }

    /// Sets the response body.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.body = body;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_response_new() {
        let response = HttpResponse::new(200, "OK".to_string());

        assert_eq!(response.status_code, 200);
        assert_eq!(response.status_text, "OK");
        assert!(response.headers.is_empty());
        assert!(response.body.is_empty());
    }

    #[test]
    fn test_http_response_status_checks() {
        let success = HttpResponse::new(200, "OK".to_string());
        assert!(success.is_success());
        assert!(!success.is_client_error());
        assert!(!success.is_server_error());

        let client_error = HttpResponse::new(404, "Not Found".to_string());
        assert!(client_error.is_client_error());
        assert!(!client_error.is_success());

        let server_error = HttpResponse::new(500, "Internal Server Error".to_string());
        assert!(server_error.is_server_error());
    }

    #[test]
    fn test_http_response_content_type() {
        let mut response = HttpResponse::new(200, "OK".to_string());
        assert_eq!(response.content_type(), None);

        response.add_header("content-type".to_string(), "text/html".to_string());
        assert_eq!(response.content_type(), Some("text/html"));
    }

    #[test]
    fn test_http_response_json() {
        let response = HttpResponse::with_json(&json!({"id": 42, "tags": ["a"]}));
        assert_eq!(response.json().unwrap(), json!({"id": 42, "tags": ["a"]}));
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[test]
    fn test_http_response_json_invalid() {
        let mut response = HttpResponse::new(200, "OK".to_string());
        response.set_body(b"<html></html>".to_vec());
        assert!(response.json().is_err());

        response.set_body(Vec::new());
        assert!(response.json().is_err());
    }

    #[test]
    fn test_http_response_body_as_string() {
        let mut response = HttpResponse::new(200, "OK".to_string());
        response.set_body("Hello, World!".as_bytes().to_vec());
        assert_eq!(response.body_as_string().unwrap(), "Hello, World!");

        response.set_body(vec![0xFF, 0xFE, 0xFD]);
        assert!(response.body_as_string().is_err());
    }
}
