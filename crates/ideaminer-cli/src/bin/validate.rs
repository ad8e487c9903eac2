//! ideaminer-validate - check an idea store for duplicate or missing ids.

use clap::Parser;
use ideaminer_cli::commands;
use ideaminer_cli::logging::init_tracing;
use ideaminer_cli::output::Formatter;
use ideaminer_cli::{CliError, ValidateArgs};

#[tokio::main]
async fn main() {
    init_tracing();

    let args = ValidateArgs::parse();
    let formatter = Formatter::new(!args.no_color);

    match commands::execute_validate(&args, &formatter).await {
        Ok(_) => {}
        Err(CliError::ValidationFailed) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", formatter.format_error(&e.to_string()));
            std::process::exit(1);
        }
    }
}
