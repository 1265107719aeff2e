//! HTTP request execution configuration.
//!
//! This module defines the options a transport applies to every request,
//! derived from the global [`RunnerConfig`](crate::config::RunnerConfig).

use crate::config::get_config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Whether redirects are followed.
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow.
    pub max_redirects: u32,

    /// Whether TLS certificates are validated.
    pub validate_ssl: bool,

    /// Headers added to every request unless the request sets them itself.
    pub default_headers: BTreeMap<String, String>,
}

impl ExecutionConfig {
    /// Creates a new ExecutionConfig with the given timeout and no default headers.
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            timeout_ms,
            follow_redirects: true,
            max_redirects: 10,
            validate_ssl: true,
            default_headers: BTreeMap::new(),
        }
    }

    /// Returns the timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Creates an ExecutionConfig from the global runner configuration.
    pub fn from_global_config() -> Self {
        let global_config = get_config();
        Self {
            timeout_ms: global_config.timeout,
            follow_redirects: global_config.follow_redirects,
            max_redirects: global_config.max_redirects,
            validate_ssl: global_config.validate_ssl,
            default_headers: global_config.default_headers,
        }
    }
}

impl Default for ExecutionConfig {
    /// Reads the global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}
