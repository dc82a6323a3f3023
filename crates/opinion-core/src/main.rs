//! OpDisc command line runner
//!
//! Loads a configuration, runs the simulation, and writes the time series
//! and run summary to the output directory.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use opinion_core::config::Config;
use opinion_core::output::{write_summary, TimeSeriesWriter, SUMMARY_FILE, TIMESERIES_FILE};
use opinion_core::{Mode, SimError, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "opdisc")]
#[command(about = "Opinion dynamics with discrimination between social groups")]
struct Args {
    /// Configuration file (defaults to ./opdisc.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of interactions to perform
    #[arg(long)]
    steps: Option<u64>,

    /// Interaction mode, e.g. conflict_dir or ageing
    #[arg(long)]
    mode: Option<String>,

    /// Directory for the time series and summary
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Interval between time-series writes
    #[arg(long)]
    write_every: Option<u64>,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("opdisc=info,opinion_core=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    apply_overrides(&mut config, &args)?;
    config.validate()?;

    tracing::info!(
        seed = config.simulation.seed,
        steps = config.simulation.num_steps,
        mode = %config.model.mode,
        "Starting OpDisc run"
    );

    let output_dir = config.simulation.output_dir.clone();
    fs::create_dir_all(&output_dir)?;

    let mut simulation = Simulation::new(config)?;
    let mut writer = TimeSeriesWriter::new(output_dir.join(TIMESERIES_FILE))?;
    let summary = simulation.run(&mut writer)?;
    write_summary(&summary, output_dir.join(SUMMARY_FILE))?;

    tracing::info!(
        "Wrote {} frames to {}",
        summary.frames_written,
        output_dir.display()
    );
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) -> Result<(), SimError> {
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(steps) = args.steps {
        config.simulation.num_steps = steps;
    }
    if let Some(mode) = &args.mode {
        config.model.mode = mode.parse::<Mode>()?;
    }
    if let Some(dir) = &args.output_dir {
        config.simulation.output_dir = dir.clone();
    }
    if let Some(write_every) = args.write_every {
        config.simulation.write_every = write_every;
    }
    Ok(())
}
