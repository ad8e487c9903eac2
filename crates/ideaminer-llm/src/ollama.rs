//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API.
//!
//! # Features
//!
//! - Async HTTP communication with Ollama API
//! - Readiness check against the model listing (`GET /tags`)
//! - Non-streaming generation (`POST /generate`)
//! - Optional request timeout (off by default; local models can be slow)
//!
//! # Examples
//!
//! ```no_run
//! use ideaminer_llm::{CompletionProvider, OllamaProvider};
//!
//! # async fn example() -> Result<(), ideaminer_llm::LlmError> {
//! let provider = OllamaProvider::new("http://localhost:11434/api");
//! if provider.check_status("deepseek-r1").await.is_ready() {
//!     let reply = provider.generate("deepseek-r1", "Say hello").await?;
//!     println!("{}", reply);
//! }
//! # Ok(())
//! # }
//! ```

use crate::{model_matches, CompletionProvider, LlmError, ModelStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Ollama API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/api";

/// Ollama API provider for local LLM inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

/// Response from Ollama tags API
#[derive(Deserialize, Default)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Deserialize)]
struct OllamaModel {
    name: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: Ollama API base, including the `/api` prefix
    ///   (e.g., "http://localhost:11434/api")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Create a provider for the default local endpoint
    pub fn default_endpoint() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Bound every request by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// API base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Names of the models installed on the service
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = format!("{}/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(LlmError::Communication(format!("HTTP {}", response.status())));
        }

        // A listing without a usable `models` array means nothing is installed
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;
        let tags: OllamaTagsResponse = serde_json::from_str(&body).unwrap_or_default();

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::default_endpoint()
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    /// Generate text using Ollama API
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Response format is invalid
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/generate", self.base_url);

        let request_body = OllamaGenerateRequest {
            model,
            prompt,
            stream: false,
        };

        debug!("POST {} (model {}, prompt {} chars)", url, model, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let ollama_response = response
            .json::<OllamaGenerateResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(ollama_response.response)
    }

    async fn check_status(&self, model: &str) -> ModelStatus {
        let models = match self.list_models().await {
            Ok(models) => models,
            Err(e) => {
                debug!("Ollama status check failed: {}", e);
                return ModelStatus::not_running(
                    "Ollama is not running. Please start it with \"ollama serve\".",
                );
            }
        };

        if models.iter().any(|listed| model_matches(listed, model)) {
            ModelStatus::ready()
        } else {
            ModelStatus::model_missing(format!(
                "Model {} is not available. Please run 'ollama pull {}'",
                model, model
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/api/");
        assert_eq!(provider.base_url(), "http://localhost:11434/api");
        assert!(provider.timeout().is_none());
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint();
        assert_eq!(provider.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_ollama_provider_with_timeout() {
        let provider = OllamaProvider::default_endpoint()
            .with_timeout(Duration::from_secs(600))
            .unwrap();
        assert_eq!(provider.timeout(), Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_generate_request_shape() {
        let body = OllamaGenerateRequest {
            model: "deepseek-r1",
            prompt: "hi",
            stream: false,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value, serde_json::json!({"model": "deepseek-r1", "prompt": "hi", "stream": false}));
    }

    #[tokio::test]
    async fn test_ollama_unreachable_is_not_running() {
        // Nothing listens on port 9 locally
        let provider = OllamaProvider::new("http://127.0.0.1:9/api");
        let status = provider.check_status("deepseek-r1").await;
        assert!(!status.running);
        assert!(!status.model_available);
        assert!(status.error.is_some());
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        let provider = OllamaProvider::new("http://127.0.0.1:9/api");
        let result = provider.generate("deepseek-r1", "test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
