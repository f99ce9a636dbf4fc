//! Destruction events and the end-of-run report.
//!
//! Every collision produces a [`DestructionEvent`]; its `Display` form is
//! the line the invasion narrates:
//!
//! ```text
//! Foo has been destroyed by alien 3 and alien 7!
//! ```
//!
//! When the engine finishes it hands back a [`SimulationReport`] carrying
//! the event log alongside the final alien and city tallies.

use core::fmt;

use invader_types::AlienId;
use serde::Serialize;

/// A city destroyed by two aliens meeting in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestructionEvent {
    /// The step the collision happened in (step 1 is the scatter).
    pub step: u64,
    /// Name of the destroyed city.
    pub city: String,
    /// The two aliens destroyed with it, in ascending order.
    pub aliens: [AlienId; 2],
}

impl fmt::Display for DestructionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.aliens;
        write!(
            f,
            "{} has been destroyed by alien {first} and alien {second}!",
            self.city
        )
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The run was started with zero aliens.
    NoAliens,
    /// The map had no cities to invade.
    NoCities,
    /// Every alien was destroyed.
    AllAliensDestroyed,
    /// Every city was destroyed.
    AllCitiesDestroyed,
    /// The configured number of steps was reached.
    StepLimitReached,
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimulationReport {
    /// Why the run stopped.
    pub end_reason: EndReason,
    /// The last step that executed (0 if nothing ran, 1 for scatter only).
    pub steps_run: u64,
    /// Number of aliens the run started with.
    pub aliens_initial: u64,
    /// Aliens still alive, whether or not they ever landed.
    pub aliens_surviving: u64,
    /// Aliens destroyed in collisions.
    pub aliens_destroyed: u64,
    /// Live aliens currently standing in a city.
    pub aliens_in_cities: u64,
    /// Cities still standing.
    pub cities_remaining: u64,
    /// Cities destroyed during the run.
    pub cities_destroyed: u64,
    /// Every destruction, in the order it happened.
    pub events: Vec<DestructionEvent>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn destruction_line_format() {
        let event = DestructionEvent {
            step: 4,
            city: "Foo".to_owned(),
            aliens: [AlienId::new(3), AlienId::new(7)],
        };
        assert_eq!(event.to_string(), "Foo has been destroyed by alien 3 and alien 7!");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = SimulationReport {
            end_reason: EndReason::StepLimitReached,
            steps_run: 10,
            aliens_initial: 2,
            aliens_surviving: 0,
            aliens_destroyed: 2,
            aliens_in_cities: 0,
            cities_remaining: 1,
            cities_destroyed: 1,
            events: vec![DestructionEvent {
                step: 1,
                city: "Bar".to_owned(),
                aliens: [AlienId::new(1), AlienId::new(2)],
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["end_reason"], "step_limit_reached");
        assert_eq!(json["events"][0]["city"], "Bar");
        assert_eq!(json["events"][0]["aliens"][1], 2);
    }
}
