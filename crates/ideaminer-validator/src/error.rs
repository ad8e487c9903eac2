//! Validator error types

use std::path::PathBuf;
use thiserror::Error;

/// Conditions that prevent validation from running
///
/// Each of these means the file fails validation.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// File does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// File could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File is not valid JSON
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        /// File involved
        path: PathBuf,
        /// Parse error
        source: serde_json::Error,
    },

    /// Document has no `ideas` array
    #[error("No ideas array found in the file")]
    MissingIdeas,
}
