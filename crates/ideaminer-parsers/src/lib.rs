//! Idea Miner Export Parsers
//!
//! Turns personal message archives into the normalized message model from
//! `ideaminer-domain`.
//!
//! # Formats
//!
//! - [`imessage`]: iMessage conversations exported as HTML (`.html`)
//! - [`apple_notes`]: Apple Notes exported as markdown (`.md`)
//! - [`skype`]: Skype JSON exports (`.json`)
//!
//! Each format exposes the same two capabilities: list the files it
//! recognizes in a directory, and parse one recognized file. Directory
//! helpers that parse every file skip (and log) files that fail instead of
//! aborting.
//!
//! # Examples
//!
//! ```no_run
//! use ideaminer_parsers::imessage;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), ideaminer_parsers::ParserError> {
//! let dir = Path::new("./data/imessage");
//! for file in imessage::discover(dir).await? {
//!     let conversation = imessage::parse_file(&dir.join(&file)).await?;
//!     println!("{}: {} messages", file, conversation.messages.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
pub mod timestamp;

pub mod apple_notes;
pub mod imessage;
pub mod skype;

pub use discovery::list_files;
pub use error::ParserError;
pub use timestamp::{parse_timestamp, try_parse_timestamp};
