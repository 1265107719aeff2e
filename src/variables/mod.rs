//! Variables module for the collection runner
//!
//! This module provides placeholder rendering for request templates and the
//! error type shared by every variable lookup.

pub mod substitution;

pub use substitution::{render, substitute_variables};

use thiserror::Error;

/// Errors that can occur during variable resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarError {
    /// Direct lookup of a key the environment does not hold
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    /// A `{{placeholder}}` in a template could not be resolved.
    ///
    /// `available` is a snapshot of every key that was resolvable at render
    /// time, for diagnostics only.
    #[error(
        "Expected value `{name}` in environment variables. Environment variables are: [{}]",
        .available.join(", ")
    )]
    MissingVariable {
        /// Name as written in the template
        name: String,
        /// Keys present in the environment
        available: Vec<String>,
    },
}
