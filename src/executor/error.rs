//! HTTP request execution error types.
//!
//! This module defines the errors a transport reports. The runner passes them
//! to the caller untouched.

use thiserror::Error;

/// Errors that can occur during HTTP request execution.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network error occurred during request execution.
    ///
    /// This includes connection failures, DNS resolution errors,
    /// and other network-level issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out before completion.
    #[error("Request timed out")]
    Timeout,

    /// Invalid URL provided in the request.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// TLS/SSL error occurred during HTTPS connection.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// HTTP protocol error, such as a malformed response.
    #[error("HTTP protocol error: {0}")]
    ProtocolError(String),

    /// The request could not be built from the prepared parameters
    /// (unknown method, invalid header name or value).
    #[error("Request build error: {0}")]
    BuildError(String),

    /// Only HTTP and HTTPS URLs are supported.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),
}

/// Convert reqwest errors to RequestError.
#[cfg(feature = "http")]
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_connect() || err.is_request() {
            RequestError::NetworkError(err.to_string())
        } else if err.is_builder() {
            RequestError::BuildError(err.to_string())
        } else if err.to_string().contains("certificate")
            || err.to_string().contains("TLS")
            || err.to_string().contains("SSL")
        {
            RequestError::TlsError(err.to_string())
        } else {
            RequestError::NetworkError(err.to_string())
        }
    }
}

/// Convert URL parsing errors to RequestError.
impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
