//! Command-line runner for the Invader Sim simulation.
//!
//! Loads a map of cities, drops aliens onto it, walks them around until
//! the step budget runs out or nothing is left to destroy, and prints the
//! result.
//!
//! # Startup Sequence
//!
//! 1. Parse command-line flags
//! 2. Load configuration from `invader-config.yaml` (if present) and apply
//!    flag overrides
//! 3. Initialize structured logging (tracing, to stderr)
//! 4. Load the map file into a city graph
//! 5. Run the invasion with a once-seeded random selector
//! 6. Write the initial map, destructions, and final map to stdout

mod cli;
mod error;
mod output;

use std::io;
use std::path::Path;

use clap::Parser;
use invader_core::config::SimulationConfig;
use invader_core::{RandomSelector, SimulationEngine};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, OutputFormat};
use crate::error::AppError;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "invader-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the config or map cannot be loaded, the simulation
/// fails, or the output cannot be written.
fn main() -> Result<(), AppError> {
    // 1. Parse flags.
    let args = Args::parse();

    // 2. Load configuration.
    let (mut config, config_source) = load_config(&args)?;
    args.apply(&mut config);

    // 3. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    info!("invader-sim starting");
    info!(
        config = config_source.unwrap_or("defaults"),
        map = %config.map.path.display(),
        aliens = config.invasion.aliens,
        steps = config.invasion.steps,
        seed = ?config.invasion.seed,
        "Configuration loaded"
    );

    // 4. Load the map.
    let graph = invader_world::load_map(&config.map.path)?;
    let initial_map = graph.render_lines();

    // 5. Run the invasion.
    let selector = RandomSelector::new(config.invasion.seed);
    let mut engine = SimulationEngine::new(graph, selector);
    let report = engine.run(config.invasion.aliens, config.invasion.steps)?;
    let (final_graph, _) = engine.into_parts();
    let final_map = final_graph.render_lines();

    // 6. Write the result.
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => output::write_text(&mut out, &initial_map, &report, &final_map)?,
        OutputFormat::Json => output::write_json(&mut out, &initial_map, &report, &final_map)?,
    }

    info!(
        end_reason = ?report.end_reason,
        steps_run = report.steps_run,
        "invader-sim shutdown complete"
    );
    Ok(())
}

/// Load the simulation configuration.
///
/// An explicit `--config` path must exist. Without one, the default file is
/// read when present and built-in defaults are used otherwise. Returns the
/// config along with where it came from, for logging once tracing is up.
fn load_config(args: &Args) -> Result<(SimulationConfig, Option<&str>), AppError> {
    if let Some(path) = &args.config {
        let config = SimulationConfig::from_file(path)?;
        return Ok((config, path.to_str()));
    }
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        let config = SimulationConfig::from_file(default_path)?;
        Ok((config, Some(DEFAULT_CONFIG_PATH)))
    } else {
        Ok((SimulationConfig::default(), None))
    }
}
