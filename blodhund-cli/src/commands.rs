use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use validator::Validate;

use blodhund_config::BlodhundConfig;
use blodhund_engine::{Runner, ShellExecutor};
use blodhund_store::MemoryStore;
use blodhund_telemetry::EventLogger;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file overriding the default search path.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run in live mode (adapter capture plus active probing)
    Run(RunArgs),
    /// Replay a recorded monitor trace (passive, no probing)
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Bluetooth adapter, overriding the configured one.
    #[arg(short, long)]
    pub interface: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Trace file to replay (plain or xz-compressed).
    pub file: PathBuf,
}

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => BlodhundConfig::load_from_path(path)?,
        None => BlodhundConfig::load()?,
    };

    match cli.command {
        Commands::Run(args) => {
            config.capture.mode = "live".into();
            if let Some(interface) = args.interface {
                config.capture.interface = interface;
            }
        }
        Commands::Replay(args) => {
            config.capture.mode = "replay".into();
            config.capture.file = Some(args.file);
        }
    }
    config.validate().context("invalid configuration")?;

    EventLogger::init(&config.telemetry.log_filter);

    let store = Arc::new(MemoryStore::new());
    let mut runner = Runner::new(config, store.clone(), Arc::new(ShellExecutor));
    runner.start()?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("Shutdown signal received");

    runner.stop().await;
    info!(devices = store.len(), "Final device count");

    if let Ok(metrics) = runner.metrics().gather_metrics() {
        print!("{metrics}");
    }

    Ok(())
}
