//! Gold price feed CLI
//!
//! Fetches every configured source, prints the aggregate report with per-brand
//! headlines and trends as JSON on stdout, and records the headline snapshot
//! for the next run.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use gold_price_feed_lib::application;
use gold_price_feed_lib::infrastructure::{init_logging_with_config, load_config, log_system_info};

#[derive(Parser)]
#[command(name = "gold-price-feed")]
#[command(about = "Schema-resilient gold price feed with cross-run trends")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "GOLD_FEED_CONFIG")]
    config: Option<PathBuf>,

    /// Snapshot file, overriding the configured path
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Do not save the snapshot
    #[arg(long)]
    dry_run: bool,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(path) = cli.snapshot {
        config.snapshot.path = path;
    }

    init_logging_with_config(&config.logging)?;
    log_system_info();
    info!("Snapshot file: {:?}", config.snapshot.path);

    let outcome = application::execute(&config, cli.dry_run).await?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&outcome)
    } else {
        serde_json::to_string(&outcome)
    }
    .context("Failed to encode report")?;
    println!("{json}");

    Ok(())
}
