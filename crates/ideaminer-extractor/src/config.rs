//! Configuration for the Extractor

use serde::{Deserialize, Serialize};

/// Default maximum chunk size (characters)
pub const DEFAULT_CHUNK_SIZE: usize = 4000;

/// Chunks shorter than this are not worth a model call
pub const DEFAULT_MIN_CHUNK_CHARS: usize = 50;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum chunk size (characters)
    pub chunk_size: usize,

    /// Minimum chunk length (characters) that is sent to the model
    pub min_chunk_chars: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_chunk_chars: DEFAULT_MIN_CHUNK_CHARS,
        }
    }
}
