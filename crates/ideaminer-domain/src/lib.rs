//! Idea Miner Domain Layer
//!
//! Core data model shared by every other crate in the workspace. Nothing in
//! here performs I/O: parsers produce [`Message`]s and [`ParsedNote`]s, the
//! pipeline turns extraction results into [`Idea`]s and tracks input files
//! as [`Source`]s.
//!
//! ## Key Concepts
//!
//! - **Source**: one input file and its processing state
//! - **Idea**: one structured startup-idea record extracted from a source
//! - **SourceType**: the closed set of supported export formats

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod idea;
pub mod message;
pub mod source;
pub mod source_type;

// Re-exports for convenience
pub use id::RecordId;
pub use idea::{normalize_title, Idea};
pub use message::{Conversation, Message, ParsedNote, SELF_RECIPIENT};
pub use source::Source;
pub use source_type::SourceType;
