//! Error types for the simulation binary.
//!
//! [`AppError`] is the top-level error type that wraps all possible
//! failure modes during startup, the run itself, and output.

/// Top-level error for the simulation binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: invader_core::config::ConfigError,
    },

    /// The map file could not be loaded.
    #[error("map error: {source}")]
    Map {
        /// The underlying map load error.
        #[from]
        source: invader_world::MapLoadError,
    },

    /// The simulation hit a fatal error.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: invader_core::SimulationError,
    },

    /// Writing the output failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing the JSON report failed.
    #[error("json error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
