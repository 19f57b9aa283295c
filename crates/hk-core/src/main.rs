//! Bounded-confidence opinion dynamics runner
//!
//! Loads a run configuration, performs one seeded run and prints its
//! summary as JSON on stdout.

use clap::Parser;
use hk_core::config::{default_config_toml, SimulationConfig};
use hk_core::error::HkResult;
use hk_core::runner::{run_simulation, RunSummary};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Command line arguments for a single run
#[derive(Parser, Debug)]
#[command(name = "hk_sim")]
#[command(about = "Hegselmann-Krause opinion dynamics simulator")]
struct Args {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn run(args: &Args) -> HkResult<RunSummary> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    run_simulation(&config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.print_default_config {
        print!("{}", default_config_toml());
        return ExitCode::SUCCESS;
    }

    let summary = match run(&args) {
        Ok(summary) => summary,
        Err(e) => {
            error!(parameter = ?e.parameter(), "run failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("could not serialize summary: {}", e);
            ExitCode::FAILURE
        }
    }
}
