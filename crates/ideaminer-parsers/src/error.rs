//! Error types for the export parsers

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or parsing an export
#[derive(Error, Debug)]
pub enum ParserError {
    /// File or directory could not be read
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Export file is not valid JSON of the expected shape
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// Path that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A CSS selector failed to compile
    #[error("Invalid selector: {0}")]
    Selector(String),
}

impl ParserError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ParserError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error is a missing file or directory
    pub fn is_not_found(&self) -> bool {
        matches!(self, ParserError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
