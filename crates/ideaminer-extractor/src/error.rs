//! Error types for the Extractor

use ideaminer_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Unusable model replies are not errors; they yield zero candidates.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Completion service failed
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
