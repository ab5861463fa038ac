//! Tokyon CLI: backend for the Tokyon agency site.
//!
//! Serves the lead-capture and consultant APIs, and offers one-shot lead
//! submission and an interactive consultant session from the terminal.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
