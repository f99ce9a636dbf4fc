//! Error types for the `invader-world` crate.
//!
//! Graph operations return [`WorldError`]; the map loader wraps those in
//! [`MapLoadError`] together with the offending line number.

use std::path::PathBuf;

use invader_types::CityId;

/// Errors that can occur during city-graph operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No city with this name was ever added to the graph.
    #[error("unknown city: {0}")]
    UnknownCity(String),

    /// The city existed but has since been destroyed.
    #[error("city has been destroyed: {0}")]
    DestroyedCity(String),

    /// A live city with this name already exists.
    #[error("duplicate city name: {0}")]
    DuplicateCity(String),

    /// The arena slot for this id is empty (tombstoned) or out of range.
    #[error("stale city id: {0}")]
    StaleCity(CityId),

    /// A city was connected to itself.
    #[error("city cannot neighbor itself: {0}")]
    SelfLoop(String),

    /// City names must contain at least one character.
    #[error("city name must not be empty")]
    EmptyCityName,

    /// The arena has no room for another city id.
    #[error("city graph is full")]
    ArenaFull,
}

/// Errors that can occur while loading a map file.
#[derive(Debug, thiserror::Error)]
pub enum MapLoadError {
    /// The map file could not be read.
    #[error("failed to read map file {}: {source}", path.display())]
    Io {
        /// Path of the map file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A line carried no city name.
    #[error("line {line}: empty line has no city name")]
    EmptyLine {
        /// 1-based line number.
        line: usize,
    },

    /// A connection token lacked the `=` separator.
    #[error("line {line}: connection {token:?} is missing '='")]
    MissingSeparator {
        /// 1-based line number.
        line: usize,
        /// The malformed token.
        token: String,
    },

    /// A connection token named something other than north/south/east/west.
    #[error("line {line}: unknown direction in {token:?}")]
    UnknownDirection {
        /// 1-based line number.
        line: usize,
        /// The malformed token.
        token: String,
    },

    /// A connection token had nothing after the `=`.
    #[error("line {line}: connection {token:?} has no neighbor name")]
    EmptyNeighbor {
        /// 1-based line number.
        line: usize,
        /// The malformed token.
        token: String,
    },

    /// The graph rejected a city or connection from this line.
    #[error("line {line}: {source}")]
    Graph {
        /// 1-based line number.
        line: usize,
        /// The underlying graph error.
        source: WorldError,
    },
}
