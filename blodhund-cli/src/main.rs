//! ## blodhund-cli
//! **Operational entrypoint**
//! Blodhund device discovery runtime with live (btmon-based) capture mode
//! and recorded-trace replay.

use clap::Parser;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::run_command(cli).await
}
