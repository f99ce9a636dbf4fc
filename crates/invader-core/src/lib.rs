//! Engine, randomness, and configuration for the Invader Sim simulation.
//!
//! This crate owns the invasion itself: the scatter phase that drops
//! aliens onto random cities, the step loop that walks them across the
//! city graph, and the destroy-on-collision rule.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `invader-config.yaml` into
//!   strongly-typed structs.
//! - [`engine`] -- [`SimulationEngine`], the scatter + step state machine.
//! - [`event`] -- Destruction events and the end-of-run report.
//! - [`selector`] -- [`RandomSelector`], uniform picks from a seeded RNG.
//!
//! [`SimulationEngine`]: engine::SimulationEngine
//! [`RandomSelector`]: selector::RandomSelector

pub mod config;
pub mod engine;
pub mod event;
pub mod selector;

pub use engine::{Movement, Phase, SimulationEngine, SimulationError, StepSummary};
pub use event::{DestructionEvent, EndReason, SimulationReport};
pub use selector::{RandomSelector, SelectionError};
