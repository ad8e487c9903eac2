//! Idea Miner Extractor
//!
//! Turns free text into startup-idea candidates using a local LLM.
//!
//! # Overview
//!
//! Text is split into bounded chunks, each chunk is embedded in a fixed
//! instructional prompt, and the model's reply is searched for the first
//! JSON array of objects. Replies are treated as untrusted text: anything
//! that does not parse yields zero ideas for that chunk rather than an
//! error.
//!
//! # Architecture
//!
//! ```text
//! Text → Chunker → Prompt → LLM → Reply parser → IdeaCandidates
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use ideaminer_extractor::{ExtractorConfig, IdeaExtractor};
//! use ideaminer_llm::OllamaProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = IdeaExtractor::new(OllamaProvider::default_endpoint(), ExtractorConfig::default());
//!
//! let transcript = "alice: we should build a marketplace for renting camping gear\n...";
//! let candidates = extractor.chunk_and_extract(transcript, 4000, "deepseek-r1").await?;
//!
//! for idea in &candidates {
//!     println!("{} ({}/10)", idea.title, idea.confidence_score);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use chunking::TextChunker;
pub use config::{ExtractorConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MIN_CHUNK_CHARS};
pub use error::ExtractorError;
pub use extractor::IdeaExtractor;
pub use parser::{find_json_array, parse_llm_response, ReplyParse};
pub use prompt::PromptBuilder;
pub use types::{IdeaCandidate, MAX_CONFIDENCE, MIN_CONFIDENCE};
