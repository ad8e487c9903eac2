//! Pipeline error types

use crate::ConfigError;
use ideaminer_extractor::ExtractorError;
use ideaminer_llm::LlmError;
use ideaminer_parsers::ParserError;
use ideaminer_store::StoreError;
use thiserror::Error;

/// Errors that can occur during a run
///
/// Returned from [`Pipeline::run`](crate::Pipeline::run) only for fatal
/// conditions; per-file failures are logged and the file stays pending.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Completion service unreachable or model not installed
    #[error("LLM not ready: {0}")]
    NotReady(String),

    /// Store could not be read or written
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Export directory could not be listed, or a file could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParserError),

    /// Extraction failed
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractorError),

    /// Completion service could not be set up
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
