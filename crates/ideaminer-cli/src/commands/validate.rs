//! Store validation.

use crate::cli::ValidateArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use ideaminer_validator::{validate_file, ValidationReport};

/// Validate the store file, log the findings and print a verdict.
///
/// Fails with [`CliError::ValidationFailed`] when ids are duplicated or
/// missing.
pub async fn execute_validate(args: &ValidateArgs, formatter: &Formatter) -> Result<ValidationReport> {
    let path = args.resolved_ideas_file()?;
    let report = validate_file(&path).await?;

    report.log_report();
    println!("{}", formatter.format_validation(&report));

    if report.passed() {
        Ok(report)
    } else {
        Err(CliError::ValidationFailed)
    }
}
