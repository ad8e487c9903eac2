//! Idea Miner Pipeline
//!
//! Drives a full extraction run: discover export files, work out which
//! ones still need processing, extract ideas from each and checkpoint the
//! store after every file.
//!
//! # Run lifecycle
//!
//! ```text
//! readiness check → discovery → load store → plan sources
//!     → per kind, per pending source: parse → extract → materialize → checkpoint
//!     → final checkpoint → RunStats
//! ```
//!
//! A file that fails (parse error, service error) is logged and stays
//! pending for the next run. The run itself aborts when the model is not
//! ready, the store cannot be read, a directory cannot be listed, or the
//! final checkpoint cannot be written.
//!
//! # Examples
//!
//! ```no_run
//! use ideaminer_pipeline::{Pipeline, PipelineConfig};
//!
//! # async fn example() -> Result<(), ideaminer_pipeline::PipelineError> {
//! let config = PipelineConfig::default();
//! let provider = config.ollama_provider()?;
//! let outcome = Pipeline::new(config, provider)?.run().await?;
//! println!("Extracted {} ideas", outcome.stats.total_ideas);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod describe;
mod error;
mod pipeline;

pub use config::{ConfigError, PipelineConfig, DEFAULT_CONTEXT_CHARS, DEFAULT_MODEL};
pub use describe::describe_source;
pub use error::PipelineError;
pub use pipeline::{context_excerpt, Pipeline, PipelineState, RunOutcome, RunStats};
