//! Command implementations

mod config;
mod constants;
mod geometry;
mod quote;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let layered = crate::config::load(&cli)?;

    match cli.command {
        Commands::Quote(args) => quote::execute(args, &layered, &output).await,
        Commands::Geometry(args) => geometry::execute(args, &layered, &output).await,
        Commands::Constants(args) => constants::execute(args, &layered, &output).await,
        Commands::Config => config::execute(&layered, &output),
    }
}
