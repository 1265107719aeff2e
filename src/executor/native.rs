//! Native HTTP transport using reqwest.
//!
//! Only available with the `http` feature. The client is blocking: each call
//! returns once the full response body has been read.

use super::{ExecutionConfig, RequestError, Transport};
use crate::models::{HttpResponse, PreparedRequest};
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::collections::HashMap;
use std::time::Instant;

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ExecutionConfig,
}

impl HttpTransport {
    /// Builds a transport from an execution configuration.
    pub fn new(config: ExecutionConfig) -> Result<Self, RequestError> {
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects as usize)
        } else {
            Policy::none()
        };

        let client = Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Builds a transport from the global configuration.
    pub fn from_global_config() -> Result<Self, RequestError> {
        Self::new(ExecutionConfig::from_global_config())
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, RequestError> {
        let url = url::Url::parse(&request.url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RequestError::UnsupportedProtocol(url.scheme().to_string()));
        }

        let method = reqwest::Method::from_bytes(request.method.to_uppercase().as_bytes())
            .map_err(|e| RequestError::BuildError(format!("{}: {}", request.method, e)))?;

        let start_time = Instant::now();
        let mut req_builder = self.client.request(method, url);

        // Request headers win over configured defaults
        for (name, value) in &self.config.default_headers {
            if request.header(name).is_none() {
                req_builder = req_builder.header(name, value);
            }
        }
        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(json) = &request.json {
            req_builder = req_builder.json(json);
        }

        let response = req_builder.send()?;

        let status_code = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value_str) = value.to_str() {
                headers.insert(name.as_str().to_string(), value_str.to_string());
            }
        }

        let body = response.bytes()?.to_vec();

        Ok(HttpResponse {
            status_code,
            status_text,
            headers,
            body,
            duration: start_time.elapsed(),
        })
    }
}
