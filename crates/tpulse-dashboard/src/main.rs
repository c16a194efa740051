//! Main entry point for the tpulse dashboard.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tpulse_charts::ChartId;
use tpulse_common::{init_logging, LocationField};
use tpulse_config::ConfigLoader;
use tpulse_dashboard::{load_dataset, Dashboard, OutputFormat};
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (YAML or TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset snapshot path, overriding the configuration
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Topic shown in the daily sentiment chart ("All Topics" for every topic)
    #[arg(short, long)]
    topic: Option<String>,

    /// Location column for the top locations chart (country or city)
    #[arg(long)]
    location: Option<LocationField>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Build a single chart instead of the whole view
    #[arg(long)]
    chart: Option<ChartId>,

    /// Log level or filter directives, overriding the configuration
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(path) = args.dataset {
        config.dataset.path = path;
    }

    let _guard = init_logging(&config.logging).context("Failed to initialise logging")?;
    info!("Starting tpulse dashboard");

    let dataset = load_dataset(&config.dataset.path)
        .await
        .with_context(|| format!("Failed to load dataset {}", config.dataset.path.display()))?;
    let dashboard = Dashboard::new(dataset, config)?;

    let request = dashboard.request(args.topic.as_deref(), args.location);
    let output = dashboard.render(args.format, args.chart, &request)?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}
