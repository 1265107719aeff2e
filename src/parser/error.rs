//! Error types for collection document parsing.

use thiserror::Error;

/// Errors that can occur while reading a collection document.
///
/// All of them are fatal: no collection is built.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("Failed to read collection document: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON or a required field is absent or has
    /// the wrong type.
    #[error("Invalid collection document: {0}")]
    Invalid(#[from] serde_json::Error),

    /// An item is neither a request nor a folder.
    #[error("Item '{item}' has neither a `request` nor an `item` field")]
    UnknownItem {
        /// Name of the offending item
        item: String,
    },
}
