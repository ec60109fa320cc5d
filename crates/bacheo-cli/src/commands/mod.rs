//! Command implementations

mod calc;
mod config;
mod preview;
mod project;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use std::io::Read;

/// Execute a CLI command
pub fn execute(cli: Cli, output: &OutputWriter) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Preview(args) => preview::execute(args, config_path, output),
        Commands::Project(args) => project::execute(args, config_path, output),
        Commands::Calc(args) => calc::execute(args, config_path, output),
        Commands::Config => config::execute(config_path, output),
    }
}

/// Measurement text from the argument, or from stdin for "-".
///
/// A literal `\n` in the argument counts as a line break so measurements
/// can be passed on one shell line.
fn read_medidas(arg: &str) -> Result<String> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read measurements from stdin")?;
        return Ok(text);
    }
    Ok(arg.replace("\\n", "\n"))
}
