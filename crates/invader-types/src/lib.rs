//! Shared type definitions for the Invader Sim simulation.
//!
//! This crate is the single source of truth for the identifiers and
//! enumerations used across the workspace.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe integer wrappers for cities and aliens
//! - [`enums`] -- The four compass directions of the city graph

pub mod enums;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use enums::{Direction, ParseDirectionError};
pub use ids::{AlienId, CityId};
