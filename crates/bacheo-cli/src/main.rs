//! Bacheo CLI - Command-line interface
//!
//! Field tooling over the bache geometry engine: preview a measurement
//! text, place it on the map, estimate asphalt, and inspect configuration.

mod cli;
mod commands;
mod config_loader;
mod output;
mod output_types;

use clap::Parser;
use cli::Cli;
use output::OutputWriter;

fn main() {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = OutputWriter::new(cli.json);

    if let Err(e) = commands::execute(cli, &output) {
        output.error(format!("{:#}", e));
        std::process::exit(1);
    }
}
