use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use heuristic_analytics::config::AnalysisConfig;
use heuristic_analytics::experiment::RecordStore;
use heuristic_analytics::AnalysisEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Aggregate MLR vs SA experiment runs into quality, scalability and
/// comparison tables.
#[derive(Debug, Parser)]
#[command(name = "heuristic-analytics", version, about)]
struct Cli {
    /// Raw results file (defaults: result.txt, then results/raw_result.txt)
    input: Option<PathBuf>,

    /// Directory for the output tables
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level (includes skipped unmatched SA runs)
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize tracing subscriber on stderr
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_json_file(path).context("loading configuration")?,
        None => AnalysisConfig::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir;
    }

    let path = RecordStore::discover_input(cli.input.as_deref(), &config.input_candidates)
        .context("locating raw results")?;
    info!(path = %path.display(), "Reading raw results");
    let store = RecordStore::load(&path).context("loading experiment records")?;

    let report = AnalysisEngine::from_config(&config)
        .run(&store)
        .context("running analysis")?;
    report
        .write_csv(&config.output)
        .context("writing reports")?;

    info!(dir = %config.output.dir.display(), "Analysis finished");
    Ok(())
}
