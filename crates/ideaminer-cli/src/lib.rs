//! Idea Miner CLI library.
//!
//! Argument parsing, configuration merging and output formatting shared by
//! the `ideaminer-extract` and `ideaminer-validate` binaries.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::{ExtractArgs, ValidateArgs};
pub use error::{CliError, Result};
