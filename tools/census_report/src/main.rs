use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use census_core::{
    load_grid_config_from_env, load_records, run_census, CensusReport, GridConfig,
    SyntheticPopulation,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Display population stats per zone and per age", long_about = None)]
struct Args {
    /// Path to source JSON agents file
    #[arg(required_unless_present = "synthetic", conflicts_with = "synthetic")]
    src: Option<PathBuf>,

    /// Generate this many synthetic agents instead of reading a file
    #[arg(long)]
    synthetic: Option<usize>,

    /// Seed for the synthetic population
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Census config JSON (defaults to CENSUS_CONFIG_PATH, then the builtin config)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write charts here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GridConfig::from_file(path)
            .with_context(|| format!("Failed to load census config at {}", path.display()))?,
        None => load_grid_config_from_env().0,
    };

    let records = match (&args.src, args.synthetic) {
        (Some(path), _) => load_records(path)
            .with_context(|| format!("Failed to load agents from {}", path.display()))?,
        (None, Some(count)) => SyntheticPopulation::new(args.seed, count).records(),
        (None, None) => anyhow::bail!("Provide an agents file or --synthetic"),
    };

    let report = run_census(&config, records).with_context(|| "Census run failed")?;
    info!(
        records = report.summary.records,
        occupied_zones = report.summary.occupied_zones,
        charts = report.charts.len(),
        "census_report.ready"
    );

    write_report(&report, args.output.as_ref(), args.pretty)
}

fn write_report(report: &CensusReport, output: Option<&PathBuf>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(&report.charts)?
    } else {
        serde_json::to_string(&report.charts)?
    };
    match output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write charts to {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
