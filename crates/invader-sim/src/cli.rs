//! Command-line arguments.
//!
//! Flags left unset fall back to the config file, and from there to the
//! built-in defaults (`map.txt`, 10 aliens, 10000 steps).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use invader_core::config::SimulationConfig;

/// Invader Sim: Alien Invasion Simulator
#[derive(Parser, Debug)]
#[command(name = "invader-sim", version)]
#[command(about = "Drop aliens onto a map of cities and watch them destroy it")]
pub struct Args {
    /// Map file describing the cities and their links
    #[arg(short = 'f', long)]
    pub filepath: Option<PathBuf>,

    /// Number of alien invaders
    #[arg(short = 'a', long)]
    pub aliens: Option<u64>,

    /// Maximum number of steps, the initial landing counting as the first
    #[arg(short = 's', long)]
    pub steps: Option<u64>,

    /// Random seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML config file (defaults to `invader-config.yaml` when present)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How the run is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Initial map, destruction lines, final map.
    Text,
    /// A JSON document with both maps and the run report.
    Json,
}

impl Args {
    /// Overwrite config values with any flags given on the command line.
    pub fn apply(&self, config: &mut SimulationConfig) {
        if let Some(path) = &self.filepath {
            config.map.path.clone_from(path);
        }
        if let Some(aliens) = self.aliens {
            config.invasion.aliens = aliens;
        }
        if let Some(steps) = self.steps {
            config.invasion.steps = steps;
        }
        if self.seed.is_some() {
            config.invasion.seed = self.seed;
        }
    }
}
