//! Cities, adjacency, and occupancy for the Invader Sim simulation.
//!
//! This crate models the physical world the invasion plays out on: cities
//! as nodes of a four-way directional graph, the set of aliens standing in
//! each city, and the text format maps are loaded from.
//!
//! # Modules
//!
//! - [`city`] -- [`City`], the name-keyed identity of a node.
//! - [`error`] -- Error types for graph operations and map loading.
//! - [`graph`] -- [`CityGraph`], an arena of cities with symmetric
//!   north/south/east/west links and identity-preserving removal.
//! - [`loader`] -- Parser for the `<city> <direction>=<neighbor> ...` map format.
//! - [`occupancy`] -- [`OccupancyTracker`], the aliens present in each city.

pub mod city;
pub mod error;
pub mod graph;
pub mod loader;
pub mod occupancy;

// Re-export primary types at crate root.
pub use city::City;
pub use error::{MapLoadError, WorldError};
pub use graph::{CityGraph, Links};
pub use loader::{load_map, parse_map};
pub use occupancy::OccupancyTracker;
