//! Map file loading.
//!
//! A map file holds one city per line, followed by zero or more links:
//!
//! ```text
//! Foo north=Bar west=Baz south=Qu-ux
//! Bar south=Foo west=Bee
//! ```
//!
//! Cities are created the first time they are mentioned, either as a line's
//! subject or as a neighbor. Names cannot contain whitespace. Any malformed
//! line aborts the load; no partially built graph is returned.

use std::path::Path;

use invader_types::Direction;
use tracing::{debug, info};

use crate::error::MapLoadError;
use crate::graph::CityGraph;

/// Read and parse the map file at `path`.
///
/// # Errors
///
/// Returns [`MapLoadError::Io`] if the file cannot be read, or any parse
/// error from [`parse_map`].
pub fn load_map(path: &Path) -> Result<CityGraph, MapLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| MapLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_map(&contents)?;
    info!(
        path = %path.display(),
        cities = graph.city_count(),
        "Map loaded"
    );
    Ok(graph)
}

/// Parse map text into a [`CityGraph`].
///
/// # Errors
///
/// Returns a [`MapLoadError`] naming the first malformed line.
pub fn parse_map(text: &str) -> Result<CityGraph, MapLoadError> {
    let mut graph = CityGraph::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index.saturating_add(1);
        let mut tokens = raw.split_whitespace();
        let Some(subject) = tokens.next() else {
            return Err(MapLoadError::EmptyLine { line });
        };
        ensure_city(&mut graph, subject, line)?;

        for token in tokens {
            let Some((direction, neighbor)) = token.split_once('=') else {
                return Err(MapLoadError::MissingSeparator {
                    line,
                    token: token.to_owned(),
                });
            };
            let Ok(direction) = direction.parse::<Direction>() else {
                return Err(MapLoadError::UnknownDirection {
                    line,
                    token: token.to_owned(),
                });
            };
            if neighbor.is_empty() {
                return Err(MapLoadError::EmptyNeighbor {
                    line,
                    token: token.to_owned(),
                });
            }
            ensure_city(&mut graph, neighbor, line)?;
            graph
                .connect(subject, neighbor, direction)
                .map_err(|source| MapLoadError::Graph { line, source })?;
        }
        debug!(line, city = subject, "Parsed map line");
    }

    Ok(graph)
}

/// Add `name` to the graph unless it is already there.
fn ensure_city(graph: &mut CityGraph, name: &str, line: usize) -> Result<(), MapLoadError> {
    if graph.is_live(name) {
        return Ok(());
    }
    graph
        .add_city(name)
        .map(|_| ())
        .map_err(|source| MapLoadError::Graph { line, source })
}
