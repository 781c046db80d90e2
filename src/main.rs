//! Trolley Chain headless runner
//!
//! Usage: `trolley-chain [CONFIG] [--search ATTEMPTS] [--seed SEED]`
//!
//! Without `--search`, plays the rest-pose setup and prints the outcome.
//! With it, looks for a trolley/wedge placement that wins.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use trolley_chain::SimConfig;
use trolley_chain::sim::{Scene, find_winning_placement, run_to_end};

/// Ten simulated minutes at 60 Hz
const MAX_TICKS: u64 = 60 * 60 * 10;

/// Headless trolley/hammer/lever chain reaction
#[derive(Parser, Debug)]
#[command(name = "trolley-chain")]
#[command(about = "Play out the chain reaction or search for a winning setup", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config file (missing fields take defaults)
    config: Option<PathBuf>,

    /// Try this many random trolley/wedge placements
    #[arg(long, value_name = "ATTEMPTS")]
    search: Option<u32>,

    /// RNG seed for the placement search
    #[arg(long, default_value_t = 0, requires = "search")]
    seed: u64,
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    if let Some(attempts) = cli.search {
        let seed = cli.seed;
        match find_winning_placement(&config, seed, attempts, MAX_TICKS)? {
            Some(p) => println!("WIN: trolley x = {:.1}, wedge x = {:.1}", p.trolley_x, p.wedge_x),
            None => println!("No winning placement in {attempts} attempts (seed {seed})"),
        }
        return Ok(());
    }

    let mut scene = Scene::new(&config)?;
    match run_to_end(&mut scene, &config, MAX_TICKS) {
        Some(outcome) => println!("{outcome:?} after {} ticks", scene.time_ticks),
        None => println!("Still running after {MAX_TICKS} ticks"),
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Trolley Chain (headless) starting...");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
