//! Idea Miner LLM Provider Layer
//!
//! Text-completion providers used by the extractor.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use ideaminer_llm::{CompletionProvider, MockProvider};
//!
//! # async fn example() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("deepseek-r1", "test prompt").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::{OllamaProvider, DEFAULT_BASE_URL};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Readiness of the completion service for a given model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatus {
    /// Whether the service answered
    pub running: bool,

    /// Whether the requested model is installed
    pub model_available: bool,

    /// Operator-facing explanation when not ready
    pub error: Option<String>,
}

impl ModelStatus {
    /// Service is up and the model is installed
    pub fn ready() -> Self {
        Self {
            running: true,
            model_available: true,
            error: None,
        }
    }

    /// Service could not be reached
    pub fn not_running(error: impl Into<String>) -> Self {
        Self {
            running: false,
            model_available: false,
            error: Some(error.into()),
        }
    }

    /// Service is up but the model is missing
    pub fn model_missing(error: impl Into<String>) -> Self {
        Self {
            running: true,
            model_available: false,
            error: Some(error.into()),
        }
    }

    /// Both running and model available
    pub fn is_ready(&self) -> bool {
        self.running && self.model_available
    }
}

/// A text-completion service
///
/// Calls are awaited one at a time by the pipeline; implementations do not
/// need to support concurrent requests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generate a completion for `prompt` with `model`
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError>;

    /// Check that the service is reachable and `model` is installed
    async fn check_status(&self, model: &str) -> ModelStatus;
}

/// Whether a model name from the service listing satisfies `wanted`
///
/// Listings carry tags, so `deepseek-r1` matches `deepseek-r1`,
/// `deepseek-r1:latest` and `deepseek-r1:7b`.
pub fn model_matches(listed: &str, wanted: &str) -> bool {
    listed == wanted
        || listed == format!("{}:latest", wanted)
        || listed.starts_with(&format!("{}:", wanted))
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Lookup order for each call: queued responses, then responses keyed by a
/// prompt fragment, then the default response.
///
/// # Examples
///
/// ```
/// use ideaminer_llm::{CompletionProvider, MockProvider};
///
/// # async fn example() {
/// let mut provider = MockProvider::new("[]");
/// provider.add_response("pet sitters", "[{\"title\": \"Sitter\"}]");
///
/// let reply = provider.generate("m", "text about pet sitters").await.unwrap();
/// assert!(reply.contains("Sitter"));
/// assert_eq!(provider.generate("m", "other").await.unwrap(), "[]");
/// assert_eq!(provider.call_count(), 2);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<Vec<(String, String)>>>,
    queued: Arc<Mutex<VecDeque<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    status: Arc<Mutex<HashMap<String, ModelStatus>>>,
    default_status: ModelStatus,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(Vec::new())),
            queued: Arc::new(Mutex::new(VecDeque::new())),
            errors: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            status: Arc::new(Mutex::new(HashMap::new())),
            default_status: ModelStatus::ready(),
        }
    }

    /// Respond with `response` whenever the prompt contains `fragment`
    pub fn add_response(&mut self, fragment: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push((fragment.into(), response.into()));
    }

    /// Queue a response for the next call, ahead of any other lookup
    pub fn push_response(&self, response: impl Into<String>) {
        self.queued.lock().unwrap().push_back(response.into());
    }

    /// Fail whenever the prompt contains `fragment`
    pub fn add_error(&mut self, fragment: impl Into<String>) {
        self.errors.lock().unwrap().push(fragment.into());
    }

    /// Report `status` when `model` is checked
    pub fn set_status(&self, model: impl Into<String>, status: ModelStatus) {
        self.status.lock().unwrap().insert(model.into(), status);
    }

    /// Report `status` for every model without an explicit status
    pub fn with_default_status(mut self, status: ModelStatus) -> Self {
        self.default_status = status;
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.prompts.lock().unwrap().clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn generate(&self, _model: &str, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if self
            .errors
            .lock()
            .unwrap()
            .iter()
            .any(|fragment| prompt.contains(fragment.as_str()))
        {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        if let Some(response) = self.queued.lock().unwrap().pop_front() {
            return Ok(response);
        }

        let responses = self.responses.lock().unwrap();
        if let Some((_, response)) = responses
            .iter()
            .find(|(fragment, _)| prompt.contains(fragment.as_str()))
        {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }

    async fn check_status(&self, model: &str) -> ModelStatus {
        self.status
            .lock()
            .unwrap()
            .get(model)
            .cloned()
            .unwrap_or_else(|| self.default_status.clone())
    }
}
