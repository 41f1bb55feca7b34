//! House Builder Simulation
//!
//! Runs the simulation from a tuning file and command-line overrides, then
//! appends the final agent table to the configured sinks.

use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use house_core::output::{export_records, write_summary};
use house_core::{scheduler, EventLogger, SimConfig, SimulationContext};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "house_sim")]
#[command(about = "Evolving house builders competing over a shared material market")]
struct Args {
    /// Tuning file (defaults to tuning.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of days to simulate
    #[arg(long)]
    days: Option<u32>,

    /// CSV sink for the final agent table
    #[arg(long)]
    csv: Option<PathBuf>,

    /// JSONL sink for the final agent table
    #[arg(long)]
    jsonl: Option<PathBuf>,

    /// Write every simulation event to this JSONL file
    #[arg(long)]
    events: Option<PathBuf>,

    /// Write run statistics as JSON to this file
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Skip the final agent table export
    #[arg(long)]
    no_export: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_or_default(),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(days) = args.days {
        config.simulation.days = days;
    }
    if let Some(csv) = args.csv {
        config.output.csv_path = csv;
    }
    if let Some(jsonl) = args.jsonl {
        config.output.jsonl_path = jsonl;
    }

    let mut ctx = SimulationContext::new(config)?;
    let mut logger = match &args.events {
        Some(path) => EventLogger::new(path)?,
        None => EventLogger::null(),
    };

    scheduler::run(&mut ctx, &mut logger)?;

    let records = ctx.records();
    for (rank, record) in records.iter().enumerate() {
        info!(
            rank = rank + 1,
            name = %record.name,
            fitness = record.fitness,
            houses = record.houses_built,
            money = record.money,
            excess = record.total_excess,
            build_order = %record.build_order,
            "final standing"
        );
    }

    if !args.no_export {
        export_records(&records, &ctx.config.output.csv_path, &ctx.config.output.jsonl_path)?;
    }
    if let Some(path) = &args.summary {
        write_summary(path, &ctx.summarize())?;
        info!(path = %path.display(), "wrote run summary");
    }

    Ok(())
}
