use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use newswords::{load_config, run, ConfigOverrides};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// News Category Dataset Processor
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the news category dataset file
    file_path: PathBuf,
    /// Where to write the HTML report
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Number of words reported per category
    #[arg(long)]
    top_n: Option<usize>,
    /// JSON5 configuration file, falls back to `CONFIG_PATH`
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create log directory {:?}", parent))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {:?}", path))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        config_path: cli.config,
        input: Some(cli.file_path),
        output: cli.output,
        top_n: cli.top_n,
    };
    let config_source = overrides.config_source();

    let config = match load_config(overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:?}", e);
            return Err(anyhow!("Failed to load configuration"));
        }
    };

    init_tracing(config.log_file())?;
    match config_source {
        Some(path) => info!("Configuration read from {:?}", path),
        None => info!("No configuration file, using defaults and environment"),
    }
    info!("Configuration: {:?}", config);

    let summary = run(config).await?;

    info!(
        "{} records in {} categories, {} lines skipped",
        summary.records, summary.categories, summary.skipped_lines
    );
    if !summary.failed_categories.is_empty() {
        warn!(
            "Categories reported empty after a failure: {}",
            summary.failed_categories.join(", ")
        );
    }

    Ok(())
}
