//! Configuration management for the collection runner.
//!
//! This module provides configuration loading, validation, and access through a
//! singleton. Configuration is read from the `"collection-runner"` key of a
//! settings document and merged with defaults.

pub mod schema;

pub use schema::RunnerConfig;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::RwLock;

/// Settings key holding the runner configuration.
pub const SETTINGS_KEY: &str = "collection-runner";

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<RunnerConfig>> = Lazy::new(|| RwLock::new(RunnerConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// Reads the `"collection-runner"` settings, merges them with defaults,
/// validates the result, and updates the global configuration. Settings that
/// fail to deserialize are logged and the defaults are used.
///
/// # Example
///
/// ```no_run
/// use collection_runner::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "collection-runner": {
///         "timeout": 60000,
///         "validateSsl": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<RunnerConfig, String> {
    let mut config = RunnerConfig::default();

    if let Some(runner_settings) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<RunnerConfig>(runner_settings.clone()) {
            Ok(user_config) => {
                config = config.merge(&user_config);
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY,
                    e
                );
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Loads configuration from a JSON settings file.
pub fn load_config_from_path(path: &Path) -> Result<RunnerConfig, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let settings: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    load_config(Some(settings))
}

/// Gets the current global configuration.
///
/// If configuration has not been loaded yet, returns the default configuration.
pub fn get_config() -> RunnerConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| RunnerConfig::default())
}

/// Updates the global configuration in place.
///
/// If the result fails validation the configuration reverts to defaults.
///
/// # Example
///
/// ```no_run
/// use collection_runner::config::update_config;
///
/// update_config(|config| {
///     config.timeout = 60000;
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut RunnerConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = RunnerConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = RunnerConfig::default();
    }
}
