//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ideaminer_pipeline::ConfigError),

    /// Extraction run failed
    #[error(transparent)]
    Pipeline(#[from] ideaminer_pipeline::PipelineError),

    /// Completion service could not be set up
    #[error("LLM error: {0}")]
    Llm(#[from] ideaminer_llm::LlmError),

    /// Store file could not be validated
    #[error(transparent)]
    Validator(#[from] ideaminer_validator::ValidatorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation found problems
    #[error("Validation failed")]
    ValidationFailed,
}
