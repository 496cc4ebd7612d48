//! Error types for presentation import.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while importing a presentation package.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not a readable ZIP package, or it holds no slide parts.
    #[error("Failed to read presentation package: {0}")]
    PackageRead(String),

    /// A single slide could not be walked. Never surfaced by the importer.
    #[error("Slide extraction error: {0}")]
    SlideExtraction(String),

    /// A document store write failed.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// A referenced document does not exist in the store.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Document kind ("slide" or "presentation").
        kind: &'static str,
        /// The missing identifier.
        id: String,
    },

    /// Filesystem error from a disk-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or decode a stored document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Fold store-level failures into a persistence error, keeping the message.
    pub fn into_persistence(self) -> Self {
        match self {
            Error::Persistence(_) => self,
            other => Error::Persistence(other.to_string()),
        }
    }
}
