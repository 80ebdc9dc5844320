//! DINEOF experiment initialiser.
//!
//! Reads the sampled parameter record and writes the init file DINEOF runs
//! with, plus an archived copy of the record.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dineof_init::{resolve_config, run};

#[derive(Parser, Debug)]
#[command(name = "dineof-init")]
#[command(about = "Generate DINEOF init files for one region and experiment")]
struct Args {
    /// Experiment identifier
    #[arg(long)]
    exp: String,

    /// Region number
    #[arg(long)]
    region: u32,

    /// YAML configuration file; falls back to GAPFILL_CONFIG, then defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!(region = args.region, experiment = %args.exp, "Starting dineof-init");

    let config = resolve_config(args.config.as_deref())?;
    run(&config, args.region, &args.exp)?;

    Ok(())
}
