//! Environment file loader for the collection runner
//!
//! Reads Postman environment exports so their variables can be merged into a
//! collection's shared environment before requests run.
//!
//! Two shapes are accepted:
//!
//! ```text
//! {"name": "dev", "values": [{"key": "host", "value": "a.com", "enabled": true}]}
//! {"host": "a.com", "port": 8080}
//! ```

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during environment loading
#[derive(Debug, Error)]
pub enum EnvError {
    /// IO error occurred while reading file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON content
    #[error("Failed to parse environment file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid format or structure in the environment file
    #[error("Invalid environment format: {0}")]
    InvalidFormat(String),
}

/// One entry of a Postman environment export
#[derive(Debug, Deserialize)]
struct ExportedValue {
    key: String,
    #[serde(default)]
    value: Value,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Loads environment variables from a file on disk
///
/// # Returns
///
/// The enabled `(key, value)` pairs in file order, ready for
/// [`SharedEnvironment::update`](super::SharedEnvironment::update).
pub fn load_environment_file(path: &Path) -> Result<Vec<(String, Value)>, EnvError> {
    let content = fs::read_to_string(path)?;
    let variables = parse_environment(&content)?;
    log::debug!(
        "loaded {} environment variables from {}",
        variables.len(),
        path.display()
    );
    Ok(variables)
}

/// Parses environment variables from JSON text
pub fn parse_environment(text: &str) -> Result<Vec<(String, Value)>, EnvError> {
    let raw: Value = serde_json::from_str(text)?;
    let obj = raw
        .as_object()
        .ok_or_else(|| EnvError::InvalidFormat("Root must be a JSON object".to_string()))?;

    // Postman export
    if let Some(values) = obj.get("values") {
        let entries: Vec<ExportedValue> = serde_json::from_value(values.clone())?;
        return Ok(entries
            .into_iter()
            .filter(|entry| entry.enabled)
            .map(|entry| (entry.key, entry.value))
            .collect());
    }

    // Flat key/value object
    Ok(obj
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}
