//! Configuration for a pipeline run
//!
//! Loaded from TOML; every field has a default so a partial file (or no
//! file at all) works.
//!
//! ```toml
//! imessage_dir = "./data/imessage"
//! apple_notes_dir = "./data/notes"
//! # omit a directory to skip that kind
//! output_file = "./data/ideas.json"
//! model = "deepseek-r1"
//! ollama_url = "http://localhost:11434/api"
//!
//! [extractor]
//! chunk_size = 4000
//! ```

use ideaminer_extractor::ExtractorConfig;
use ideaminer_llm::{LlmError, OllamaProvider, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "deepseek-r1";

/// Characters of source text kept as an idea's context
pub const DEFAULT_CONTEXT_CHARS: usize = 500;

/// Pipeline configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// A configured path could not be made absolute
    #[error("Cannot resolve path {}: {source}", path.display())]
    Path {
        /// Path as configured
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Pipeline configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// iMessage HTML export directory (`None` skips iMessage)
    pub imessage_dir: Option<PathBuf>,

    /// Apple Notes markdown export directory (`None` skips notes)
    pub apple_notes_dir: Option<PathBuf>,

    /// Skype JSON export directory (`None` skips Skype)
    pub skype_dir: Option<PathBuf>,

    /// Store file
    pub output_file: PathBuf,

    /// Model name passed to the completion service
    pub model: String,

    /// Completion service API base
    pub ollama_url: String,

    /// Per-request timeout in seconds (no timeout when unset)
    pub request_timeout_secs: Option<u64>,

    /// Characters of source text kept as an idea's context
    pub context_chars: usize,

    /// Chunking settings
    pub extractor: ExtractorConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            imessage_dir: Some(PathBuf::from("./data/imessage")),
            apple_notes_dir: Some(PathBuf::from("./data/notes")),
            skype_dir: Some(PathBuf::from("./data/skype")),
            output_file: PathBuf::from("./data/ideas.json"),
            model: DEFAULT_MODEL.to_string(),
            ollama_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            context_chars: DEFAULT_CONTEXT_CHARS,
            extractor: ExtractorConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: PipelineConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.extractor.validate().map_err(ConfigError::Invalid)?;

        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if self.ollama_url.trim().is_empty() {
            return Err(ConfigError::Invalid("ollama_url must not be empty".to_string()));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output_file must not be empty".to_string()));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve every configured path against the working directory
    pub fn into_absolute(self) -> Result<Self, ConfigError> {
        Ok(Self {
            imessage_dir: self.imessage_dir.as_deref().map(absolute).transpose()?,
            apple_notes_dir: self.apple_notes_dir.as_deref().map(absolute).transpose()?,
            skype_dir: self.skype_dir.as_deref().map(absolute).transpose()?,
            output_file: absolute(&self.output_file)?,
            ..self
        })
    }

    /// Configured request timeout, if any
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Build the Ollama provider described by this configuration
    pub fn ollama_provider(&self) -> Result<OllamaProvider, LlmError> {
        let provider = OllamaProvider::new(self.ollama_url.as_str());
        match self.request_timeout() {
            Some(timeout) => provider.with_timeout(timeout),
            None => Ok(provider),
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Path {
        path: path.to_path_buf(),
        source,
    })
}
