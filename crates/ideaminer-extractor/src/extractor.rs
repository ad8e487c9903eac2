//! Core Extractor implementation

use crate::chunking::TextChunker;
use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{parse_llm_response, ReplyParse};
use crate::prompt::PromptBuilder;
use crate::types::IdeaCandidate;
use ideaminer_llm::{CompletionProvider, ModelStatus};
use tracing::{debug, info, warn};

/// The Extractor turns free text into idea candidates
pub struct IdeaExtractor<P: CompletionProvider> {
    provider: P,
    config: ExtractorConfig,
}

impl<P: CompletionProvider> IdeaExtractor<P> {
    /// Create a new Extractor
    pub fn new(provider: P, config: ExtractorConfig) -> Self {
        Self { provider, config }
    }

    /// Completion provider in use
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Whether the service is up and `model` is installed
    pub async fn check_status(&self, model: &str) -> ModelStatus {
        self.provider.check_status(model).await
    }

    /// Extract ideas using the configured chunk size
    pub async fn extract(&self, text: &str, model: &str) -> Result<Vec<IdeaCandidate>, ExtractorError> {
        self.chunk_and_extract(text, self.config.chunk_size, model).await
    }

    /// Split `text` into chunks of at most `chunk_size` characters and
    /// extract ideas from each, in order
    ///
    /// # Errors
    ///
    /// Fails on a zero `chunk_size` or when the completion service cannot be
    /// reached. Chunks whose reply cannot be parsed contribute no ideas.
    pub async fn chunk_and_extract(
        &self,
        text: &str,
        chunk_size: usize,
        model: &str,
    ) -> Result<Vec<IdeaCandidate>, ExtractorError> {
        if chunk_size == 0 {
            return Err(ExtractorError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        let chunks = TextChunker::new(chunk_size).chunk(text);
        info!(
            "Extracting from {} chars in {} chunk(s)",
            text.chars().count(),
            chunks.len()
        );

        let mut ideas = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("Processing chunk {}/{}", idx + 1, chunks.len());
            ideas.extend(self.extract_chunk(chunk, model).await?);
        }

        Ok(ideas)
    }

    /// Extract ideas from a single chunk
    ///
    /// Chunks shorter than `min_chunk_chars` are skipped without a call.
    pub async fn extract_chunk(
        &self,
        chunk: &str,
        model: &str,
    ) -> Result<Vec<IdeaCandidate>, ExtractorError> {
        if chunk.chars().count() < self.config.min_chunk_chars {
            debug!("Text is too short to extract ideas from");
            return Ok(Vec::new());
        }

        let prompt = PromptBuilder::new(chunk).build();
        debug!("Prompt length: {} chars", prompt.len());

        let reply = self.provider.generate(model, &prompt).await?;
        debug!("LLM response length: {} chars", reply.len());

        let ideas = match parse_llm_response(&reply) {
            ReplyParse::Ideas(ideas) => ideas,
            ReplyParse::NoJsonArray => {
                info!("No ideas found in the text");
                Vec::new()
            }
            ReplyParse::Malformed(e) => {
                warn!("Error parsing model response: {}", e);
                Vec::new()
            }
        };

        debug!("Parsed {} idea candidates", ideas.len());
        Ok(ideas)
    }
}
