//! Crate-level error type.

use crate::collection::LookupError;
use crate::executor::RequestError;
use crate::parser::DocumentError;
use crate::scripts::ScriptError;
use crate::variables::VarError;
use thiserror::Error;

/// Any failure surfaced by the runner.
///
/// Each variant wraps the owning module's error unchanged, so callers can
/// match on the exact transport or lookup failure.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Variable(#[from] VarError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Transport(#[from] RequestError),

    /// The response body could not be decoded as JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
