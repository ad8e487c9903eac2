//! Extraction run.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;
use ideaminer_pipeline::{Pipeline, RunStats};
use tracing::info;

/// Execute a full extraction run and print its summary.
pub async fn execute_extract(args: &ExtractArgs, formatter: &Formatter) -> Result<RunStats> {
    let config = args.to_config()?;

    info!("Starting idea extraction process...");
    for (label, dir) in [
        ("iMessage", &config.imessage_dir),
        ("Apple Notes", &config.apple_notes_dir),
        ("Skype", &config.skype_dir),
    ] {
        match dir {
            Some(dir) => info!("{} directory: {}", label, dir.display()),
            None => info!("Skipping {} extraction", label),
        }
    }
    info!("Output file: {}", config.output_file.display());
    info!("Using model: {}", config.model);

    let provider = config.ollama_provider()?;
    let output_file = config.output_file.clone();
    let outcome = Pipeline::new(config, provider)?.run().await?;

    println!();
    println!("{}", formatter.format_run_summary(&outcome.stats, &output_file));
    Ok(outcome.stats)
}
