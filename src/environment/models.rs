//! Environment data model for the collection runner
//!
//! An [`EnvironmentStore`] is a flat table of runtime variables. Keys are
//! case-insensitive: they are canonicalized to upper case on every access, so
//! `"Token"` and `"TOKEN"` name the same entry.

use crate::variables::VarError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Case-insensitive key/value table of runtime variables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentStore {
    /// Canonical (upper-cased) key to value
    variables: BTreeMap<String, Value>,
}

/// Returns the canonical form of a variable name
pub fn canonical_key(key: &str) -> String {
    key.to_uppercase()
}

impl EnvironmentStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a variable value by name
    ///
    /// # Errors
    ///
    /// Returns [`VarError::UndefinedVariable`] with the canonical key when the
    /// variable is absent.
    pub fn get(&self, key: &str) -> Result<&Value, VarError> {
        let key = canonical_key(key);
        self.variables
            .get(&key)
            .ok_or(VarError::UndefinedVariable(key))
    }

    /// Gets a variable value by name, or `None` if absent
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        self.variables.get(&canonical_key(key))
    }

    /// Sets a variable value, replacing any entry that differs only in case
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.variables.insert(canonical_key(key), value.into());
    }

    /// Merges every pair from `entries` into the store; later pairs win
    pub fn update<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.set(key.as_ref(), value);
        }
    }

    /// Removes a variable, returning its previous value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.variables.remove(&canonical_key(key))
    }

    /// Checks if a variable exists
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(&canonical_key(key))
    }

    /// Canonical keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }

    /// Iterates over canonical keys and values
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.variables.iter()
    }

    /// Returns the number of variables
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Checks if the store has no variables
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
