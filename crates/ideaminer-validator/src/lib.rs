//! Idea Miner Validator
//!
//! Integrity checks for a persisted idea store.
//!
//! The validator reads the store as untyped JSON so it can report on files
//! the typed loader would reject. It checks:
//! - Every idea has an id
//! - No id is used twice
//! - Titles are unique after normalization (warning only)
//!
//! # Examples
//!
//! ```no_run
//! use ideaminer_validator::validate_file;
//!
//! # async fn example() -> Result<(), ideaminer_validator::ValidatorError> {
//! let report = validate_file("./data/ideas.json").await?;
//! report.log_report();
//! if !report.passed() {
//!     std::process::exit(1);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod validator;

pub use error::ValidatorError;
pub use validator::{
    validate_file, validate_value, DuplicateGroup, IdeaSummary, ValidationReport,
    ValidationStatus,
};
