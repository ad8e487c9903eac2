//! Idea Miner Storage Layer
//!
//! Persists ideas and source-processing state as a single JSON document.
//!
//! # Format
//!
//! ```json
//! { "ideas": [ ... ], "sources": [ ... ] }
//! ```
//!
//! Both arrays default to empty when absent. Checkpoints rewrite the whole
//! file in place; there is no locking.
//!
//! # Examples
//!
//! ```no_run
//! use ideaminer_store::JsonStore;
//!
//! # async fn example() -> Result<(), ideaminer_store::StoreError> {
//! let store = JsonStore::new("./data/ideas.json");
//! let mut state = store.load().await?;
//! state.ideas.clear();
//! store.checkpoint(&state).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

use ideaminer_domain::{Idea, Source};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// File could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// File exists but is not a valid store document
    #[error("Malformed store file {}: {source}", path.display())]
    Malformed {
        /// File involved
        path: PathBuf,
        /// Parse error
        source: serde_json::Error,
    },

    /// State could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Everything persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeaStore {
    /// Extracted ideas, in extraction order
    #[serde(default)]
    pub ideas: Vec<Idea>,

    /// Processing state per source file
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl IdeaStore {
    /// Index of sources by path
    pub fn sources_by_path(&self) -> HashMap<&str, &Source> {
        self.sources.iter().map(|s| (s.path.as_str(), s)).collect()
    }

    /// Mean confidence score over all ideas, 0 when there are none
    pub fn average_confidence(&self) -> f64 {
        if self.ideas.is_empty() {
            return 0.0;
        }
        let total: u64 = self.ideas.iter().map(|i| u64::from(i.confidence_score)).sum();
        total as f64 / self.ideas.len() as f64
    }
}

/// JSON file backed store
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for the file at `path`
    ///
    /// Nothing is read or written until [`load`](Self::load) or
    /// [`checkpoint`](Self::checkpoint) is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state
    ///
    /// A missing file is an empty store. A file that exists but does not
    /// parse is an error; it is never silently replaced.
    pub async fn load(&self) -> Result<IdeaStore, StoreError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No existing store at {}, starting empty", self.path.display());
                return Ok(IdeaStore::default());
            }
            Err(e) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let state: IdeaStore = serde_json::from_str(&json).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(
            "Loaded {} ideas and {} sources from {}",
            state.ideas.len(),
            state.sources.len(),
            self.path.display()
        );
        Ok(state)
    }

    /// Write the full state, creating the parent directory if needed
    pub async fn checkpoint(&self, state: &IdeaStore) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))?;

        debug!(
            "Checkpointed {} ideas and {} sources",
            state.ideas.len(),
            state.sources.len()
        );
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
