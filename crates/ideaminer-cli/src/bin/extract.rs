//! ideaminer-extract - mine startup ideas from message and note exports.

use clap::Parser;
use ideaminer_cli::commands;
use ideaminer_cli::logging::init_tracing;
use ideaminer_cli::output::Formatter;
use ideaminer_cli::ExtractArgs;

#[tokio::main]
async fn main() {
    init_tracing();

    let args = ExtractArgs::parse();
    let formatter = Formatter::new(!args.no_color);

    if let Err(e) = commands::execute_extract(&args, &formatter).await {
        eprintln!("{}", formatter.format_error(&e.to_string()));
        std::process::exit(1);
    }
}
