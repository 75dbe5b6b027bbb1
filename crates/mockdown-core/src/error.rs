//! Error types for mockdown operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all mockdown crates. Uses `thiserror` for derive macros.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in mockdown operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {}: {source}", path.display())]
    IoWithPath {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Parse error (front matter, YAML, markdown).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A higher-level operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),

    /// Minting gave up after exhausting its retry budget.
    #[error("Identifier space exhausted for '{candidate}' after {attempts} attempt(s)")]
    IdentifierSpaceExhausted {
        /// Base candidate that kept colliding.
        candidate: String,
        /// Number of suffixed attempts made.
        attempts: u32,
    },

    /// An identifier that must be inserted verbatim is already registered.
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// A placeholder word list is missing, malformed, or empty.
    #[error("Failed to load placeholder list '{name}': {reason}")]
    PlaceholderLoad {
        /// Name of the word list (e.g. `title_words`).
        name: String,
        /// What went wrong.
        reason: String,
    },
}

impl Error {
    /// Create an I/O error.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Create an I/O error carrying the offending path.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            path: path.as_ref().to_path_buf(),
            source: err,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// Create a placeholder load error for the named list.
    pub fn placeholder_load(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PlaceholderLoad {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for failures that should abort a whole batch.
    ///
    /// Write failures of a single document are not fatal under the
    /// skip policy; identifier and vocabulary failures always are.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::IdentifierSpaceExhausted { .. }
                | Self::DuplicateIdentifier(_)
                | Self::PlaceholderLoad { .. }
                | Self::Config(_)
        )
    }

    /// Returns true if this is an I/O error (with or without a path).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::IoWithPath { .. })
    }
}

/// Result type alias using mockdown's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_with_path_display() {
        let err = Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            "/tmp/out/a.md",
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/out/a.md"));
        assert!(msg.contains("denied"));
        assert!(err.is_io());
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_exhausted_is_fatal() {
        let err = Error::IdentifierSpaceExhausted {
            candidate: "alpha".into(),
            attempts: 3,
        };
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Identifier space exhausted for 'alpha' after 3 attempt(s)"
        );
    }

    #[test]
    fn test_placeholder_load_display() {
        let err = Error::placeholder_load("tags", "list is empty");
        assert!(err.is_fatal());
        assert_eq!(
            err.to_string(),
            "Failed to load placeholder list 'tags': list is empty"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::other("boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
