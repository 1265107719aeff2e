//! Environment management module for the collection runner
//!
//! A collection owns exactly one [`EnvironmentStore`], wrapped in a
//! [`SharedEnvironment`] handle. Every request built from that collection holds
//! a clone of the handle, so they all alias the same table: a variable captured
//! by one request's test script is visible to every later request.
//!
//! # Example
//!
//! ```
//! use collection_runner::environment::SharedEnvironment;
//! use serde_json::json;
//!
//! let env = SharedEnvironment::new();
//! let alias = env.clone();
//!
//! env.set("Token", "abc");
//! assert_eq!(alias.get("TOKEN").unwrap(), json!("abc"));
//! ```

pub mod loader;
pub mod models;

use crate::variables::VarError;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use loader::{load_environment_file, parse_environment, EnvError};
pub use models::{canonical_key, EnvironmentStore};

/// Shared handle to a collection's environment store.
///
/// Cloning the handle aliases the store; it never copies the variables. Use
/// [`SharedEnvironment::snapshot`] to obtain an independent copy.
///
/// Invocation reads a snapshot and later writes captured bindings back. The
/// lock makes each of those steps atomic on its own but does not serialize
/// whole invocations; callers running requests from one collection on several
/// threads must order them themselves.
#[derive(Debug, Clone, Default)]
pub struct SharedEnvironment {
    store: Arc<RwLock<EnvironmentStore>>,
}

impl SharedEnvironment {
    /// Creates a handle to a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle that owns the given store
    pub fn from_store(store: EnvironmentStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Read access to the underlying store
    pub fn read(&self) -> RwLockReadGuard<'_, EnvironmentStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the underlying store
    pub fn write(&self) -> RwLockWriteGuard<'_, EnvironmentStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns an independent copy of the current variables
    pub fn snapshot(&self) -> EnvironmentStore {
        self.read().clone()
    }

    /// Gets a clone of a variable value by name (case-insensitive)
    pub fn get(&self, key: &str) -> Result<Value, VarError> {
        self.read().get(key).cloned()
    }

    /// Sets a variable value (case-insensitive)
    pub fn set(&self, key: &str, value: impl Into<Value>) {
        self.write().set(key, value);
    }

    /// Merges every pair from `entries` into the store
    pub fn update<I, K, V>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.write().update(entries);
    }

    /// Checks if a variable exists
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains(key)
    }

    /// Canonical keys currently held
    pub fn keys(&self) -> Vec<String> {
        self.read().keys()
    }

    /// Returns true if both handles point at the same store
    pub fn ptr_eq(&self, other: &SharedEnvironment) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}
