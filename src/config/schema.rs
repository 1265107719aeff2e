//! Configuration schema for the collection runner.
//!
//! This module defines the configuration structure and validation logic for
//! every user-configurable setting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Main configuration structure for the collection runner.
///
/// Settings are read from the `"collection-runner"` key of a settings
/// document. Missing settings fall back to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnerConfig {
    /// Request timeout in milliseconds.
    ///
    /// Defaults to 30000ms (30 seconds). Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow.
    ///
    /// Only used when `follow_redirects` is true. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate SSL/TLS certificates. Defaults to true.
    ///
    /// **Warning:** Disabling SSL validation can expose you to security risks.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Default headers to include in all requests.
    ///
    /// A request header with the same name wins. Defaults to a User-Agent
    /// header only.
    #[serde(default = "default_headers")]
    pub default_headers: BTreeMap<String, String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            default_headers: default_headers(),
        }
    }
}

impl RunnerConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        for (name, value) in &self.default_headers {
            if name.trim().is_empty() {
                return Err("defaultHeaders must not contain an empty header name".to_string());
            }
            if value.contains('\n') || value.contains('\r') {
                return Err(format!(
                    "defaultHeaders value for '{}' must not contain line breaks",
                    name
                ));
            }
        }

        Ok(())
    }

    /// Merges user settings over this configuration.
    ///
    /// Scalar settings are taken from `other`; default headers are combined,
    /// with `other` winning on name clashes.
    pub fn merge(&self, other: &RunnerConfig) -> RunnerConfig {
        let mut default_headers = self.default_headers.clone();
        default_headers.extend(
            other
                .default_headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        RunnerConfig {
            timeout: other.timeout,
            follow_redirects: other.follow_redirects,
            max_redirects: other.max_redirects,
            validate_ssl: other.validate_ssl,
            default_headers,
        }
    }
}

fn default_timeout() -> u64 {
    30000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(
        "User-Agent".to_string(),
        format!("collection-runner/{}", env!("CARGO_PKG_VERSION")),
    );
    headers
}
