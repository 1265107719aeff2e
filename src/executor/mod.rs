//! HTTP request executor.
//!
//! Requests are sent through a [`Transport`], injected when a collection is
//! built. The runner calls it synchronously, once per invocation, and hands
//! back whatever it returns: failures are not retried or reclassified, and
//! non-2xx responses are ordinary responses.
//!
//! With the `http` feature enabled, [`HttpTransport`] sends requests over the
//! network with a blocking `reqwest` client. Any
//! `Fn(&PreparedRequest) -> Result<HttpResponse, RequestError>` closure is a
//! transport too, which keeps tests free of network access.

pub mod config;
pub mod error;

#[cfg(feature = "http")]
pub mod native;

pub use config::ExecutionConfig;
pub use error::RequestError;

#[cfg(feature = "http")]
pub use native::HttpTransport;

use crate::models::{HttpResponse, PreparedRequest};

/// Sends a prepared request and returns the response.
pub trait Transport: Send + Sync {
    /// Executes `request`, blocking until a response or failure.
    fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, RequestError>;
}

impl<F> Transport for F
where
    F: Fn(&PreparedRequest) -> Result<HttpResponse, RequestError> + Send + Sync,
{
    fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, RequestError> {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prepared(url: &str) -> PreparedRequest {
        PreparedRequest {
            id: "req-1".to_string(),
            method: "GET".to_string(),
            url: url.to_string(),
            headers: Vec::new(),
            json: None,
        }
    }

    #[test]
    fn test_closure_is_a_transport() {
        let transport = |request: &PreparedRequest| -> Result<HttpResponse, RequestError> {
            Ok(HttpResponse::with_json(&json!({"url": request.url})))
        };

        let response = transport.send(&prepared("https://a.com")).unwrap();
        assert_eq!(response.json().unwrap(), json!({"url": "https://a.com"}));
    }

    #[test]
    fn test_transport_error_passes_through() {
        let transport = |_: &PreparedRequest| -> Result<HttpResponse, RequestError> {
            Err(RequestError::Timeout)
        };

        let boxed: Box<dyn Transport> = Box::new(transport);
        assert!(matches!(
            boxed.send(&prepared("https://a.com")),
            Err(RequestError::Timeout)
        ));
    }
}
