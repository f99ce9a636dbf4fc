//! The invasion engine: scatter, then step until something runs out.
//!
//! A run moves through these phases:
//!
//! 1. **Scatter** (step 1) -- aliens `1..=n` are dropped one at a time onto
//!    uniformly random live cities.
//!
//! 2. **Step** (steps 2..=`num_steps`) -- every alien standing in a city
//!    with at least one live neighbor walks to a uniformly random neighbor.
//!    No alien moves twice in one step.
//!
//! 3. **Finished** -- the run stops early once no cities or no aliens
//!    remain, otherwise after the last step.
//!
//! Whenever a second alien arrives in a city, that city and both aliens are
//! destroyed on the spot. The city leaves the graph immediately, so later
//! moves in the same step already see it gone.

use std::collections::BTreeSet;

use invader_types::{AlienId, CityId};
use invader_world::{City, CityGraph, OccupancyTracker, WorldError};
use tracing::{debug, info, warn};

use crate::event::{DestructionEvent, EndReason, SimulationReport};
use crate::selector::{RandomSelector, SelectionError};

/// Errors that can occur while running the invasion.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// A graph lookup or mutation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// A random pick was attempted on an empty candidate set.
    #[error("selection error: {source}")]
    Selection {
        /// The underlying selection error.
        #[from]
        source: SelectionError,
    },

    /// An alien arrived in a city that already held two aliens.
    #[error("city {city} already holds {count} aliens")]
    OverOccupied {
        /// Name of the city.
        city: String,
        /// Occupants present before the arrival.
        count: usize,
    },

    /// More aliens were destroyed than were ever alive.
    #[error("surviving alien count underflowed")]
    AlienCountUnderflow,

    /// An operation was called in a phase that does not allow it.
    #[error("cannot {operation} while {phase:?}")]
    InvalidPhase {
        /// The attempted operation.
        operation: &'static str,
        /// The engine's phase at the time.
        phase: Phase,
    },
}

/// Where the engine is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, nothing has run yet.
    Uninitialized,
    /// Dropping aliens onto the map.
    Scattering,
    /// Ready to run the given step number.
    Stepping(u64),
    /// Terminal.
    Finished(EndReason),
}

/// One alien relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    /// The alien that moved.
    pub alien: AlienId,
    /// Where it came from; `None` for a scatter landing.
    pub from: Option<CityId>,
    /// Where it arrived.
    pub to: CityId,
}

/// What happened during one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSummary {
    /// The step number (1 for the scatter).
    pub step: u64,
    /// Every landing or move, in the order it happened.
    pub movements: Vec<Movement>,
    /// Number of cities destroyed this step.
    pub destructions: usize,
    /// Living aliens at the end of the step.
    pub aliens_surviving: u64,
    /// Live cities at the end of the step.
    pub cities_remaining: usize,
}

/// Drives one invasion run over a city graph.
///
/// The engine owns the graph, the occupancy, and the random generator for
/// the run. Nothing is shared with other engines.
#[derive(Debug)]
pub struct SimulationEngine {
    graph: CityGraph,
    occupancy: OccupancyTracker,
    selector: RandomSelector,
    phase: Phase,
    aliens_initial: u64,
    aliens_surviving: u64,
    steps_run: u64,
    events: Vec<DestructionEvent>,
}

impl SimulationEngine {
    /// Wrap a loaded graph with a fresh occupancy and the run's selector.
    pub const fn new(graph: CityGraph, selector: RandomSelector) -> Self {
        Self {
            graph,
            occupancy: OccupancyTracker::new(),
            selector,
            phase: Phase::Uninitialized,
            aliens_initial: 0,
            aliens_surviving: 0,
            steps_run: 0,
            events: Vec::new(),
        }
    }

    /// Run a whole invasion: scatter `num_aliens`, then step up to `num_steps`.
    ///
    /// The scatter counts as step 1, so `num_steps` of 0 or 1 runs the
    /// scatter only. Zero aliens or an empty map finish immediately.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] if the engine was already started or an
    /// internal invariant breaks. The engine should be discarded then.
    pub fn run(
        &mut self,
        num_aliens: u64,
        num_steps: u64,
    ) -> Result<SimulationReport, SimulationError> {
        info!(
            aliens = num_aliens,
            steps = num_steps,
            cities = self.graph.city_count(),
            seed = ?self.selector.seed(),
            "Invasion starting"
        );

        self.scatter(num_aliens)?;

        while let Phase::Stepping(step) = self.phase {
            if step > num_steps {
                self.phase = Phase::Finished(EndReason::StepLimitReached);
                break;
            }
            self.step()?;
        }

        let report = self.report();
        info!(
            end_reason = ?report.end_reason,
            steps_run = report.steps_run,
            aliens_surviving = report.aliens_surviving,
            cities_remaining = report.cities_remaining,
            destructions = report.events.len(),
            "Invasion finished"
        );
        Ok(report)
    }

    /// Drop aliens `1..=num_aliens` onto random live cities (step 1).
    ///
    /// Moves the engine to [`Phase::Stepping`]`(2)`, or straight to
    /// [`Phase::Finished`] if there was nothing to do or nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidPhase`] unless the engine is
    /// [`Phase::Uninitialized`].
    pub fn scatter(&mut self, num_aliens: u64) -> Result<StepSummary, SimulationError> {
        if self.phase != Phase::Uninitialized {
            return Err(SimulationError::InvalidPhase {
                operation: "scatter",
                phase: self.phase,
            });
        }
        self.aliens_initial = num_aliens;
        self.aliens_surviving = num_aliens;

        if self.graph.is_empty() {
            self.phase = Phase::Finished(EndReason::NoCities);
            return Ok(self.summary(0, Vec::new(), 0));
        }
        if num_aliens == 0 {
            self.phase = Phase::Finished(EndReason::NoAliens);
            return Ok(self.summary(0, Vec::new(), 0));
        }

        self.phase = Phase::Scattering;
        let mut movements = Vec::new();
        let mut destructions: usize = 0;

        for raw in 1..=num_aliens {
            if self.graph.is_empty() || self.aliens_surviving == 0 {
                break;
            }
            let alien = AlienId::new(raw);
            let candidates = self.graph.live_ids();
            let city = *self.selector.pick_one(&candidates)?;
            debug!(alien = %alien, city = self.city_name(city), "Alien landed");

            movements.push(Movement {
                alien,
                from: None,
                to: city,
            });
            if self.arrive(1, alien, city)? {
                destructions = destructions.saturating_add(1);
            }
        }

        let landed = u64::try_from(movements.len()).unwrap_or(u64::MAX);
        if landed < num_aliens {
            warn!(
                landed,
                aliens = num_aliens,
                "Map ran out of cities before every alien landed"
            );
        }

        self.steps_run = 1;
        self.phase = self.exhausted().map_or(Phase::Stepping(2), Phase::Finished);
        Ok(self.summary(1, movements, destructions))
    }

    /// Run the next step: walk every unmoved alien to a random live neighbor.
    ///
    /// Cities occupied when the step begins are visited in id order. A city
    /// destroyed earlier in the same step, or one with no live neighbors,
    /// is skipped and its occupant stays put.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidPhase`] unless the engine is in
    /// [`Phase::Stepping`].
    pub fn step(&mut self) -> Result<StepSummary, SimulationError> {
        let Phase::Stepping(step) = self.phase else {
            return Err(SimulationError::InvalidPhase {
                operation: "step",
                phase: self.phase,
            });
        };

        let mut moved: BTreeSet<AlienId> = BTreeSet::new();
        let mut movements = Vec::new();
        let mut destructions: usize = 0;

        for city in self.occupancy.occupied_cities() {
            if !self.graph.contains(city) {
                continue;
            }
            let neighbors = self.graph.neighbor_ids(city)?;
            if neighbors.is_empty() {
                debug!(step, city = self.city_name(city), "No live neighbors, aliens stay");
                continue;
            }

            let occupants: Vec<AlienId> = self.occupancy.occupants(city).iter().copied().collect();
            for alien in occupants {
                if !moved.insert(alien) {
                    continue;
                }
                let candidates = self.graph.neighbor_ids(city)?;
                if candidates.is_empty() {
                    break;
                }
                let target = *self.selector.pick_one(&candidates)?;
                self.occupancy.leave(city, alien);
                debug!(
                    step,
                    alien = %alien,
                    from = self.city_name(city),
                    to = self.city_name(target),
                    "Alien moved"
                );

                movements.push(Movement {
                    alien,
                    from: Some(city),
                    to: target,
                });
                if self.arrive(step, alien, target)? {
                    destructions = destructions.saturating_add(1);
                }
            }
        }

        self.steps_run = step;
        self.phase = match self.exhausted() {
            Some(reason) => Phase::Finished(reason),
            None => step
                .checked_add(1)
                .map_or(Phase::Finished(EndReason::StepLimitReached), Phase::Stepping),
        };
        Ok(self.summary(step, movements, destructions))
    }

    /// Put `alien` into `city`, destroying the city if it was occupied.
    ///
    /// Returns whether a destruction happened.
    fn arrive(&mut self, step: u64, alien: AlienId, city: CityId) -> Result<bool, SimulationError> {
        let before = self.occupancy.count(city);
        if before >= 2 {
            return Err(SimulationError::OverOccupied {
                city: self.graph.city(city)?.name().to_owned(),
                count: before,
            });
        }
        if self.occupancy.enter(city, alien) < 2 {
            return Ok(false);
        }

        let occupants: Vec<AlienId> = self.occupancy.clear(city).into_iter().collect();
        let count = occupants.len();
        let removed = self.graph.remove(city)?;
        let aliens: [AlienId; 2] =
            occupants
                .try_into()
                .ok()
                .ok_or_else(|| SimulationError::OverOccupied {
                    city: removed.name().to_owned(),
                    count,
                })?;
        self.aliens_surviving = self
            .aliens_surviving
            .checked_sub(2)
            .ok_or(SimulationError::AlienCountUnderflow)?;

        let [first, second] = aliens;
        info!(
            step,
            city = %removed,
            first = %first,
            second = %second,
            aliens_surviving = self.aliens_surviving,
            "City destroyed"
        );
        self.events.push(DestructionEvent {
            step,
            city: removed.name().to_owned(),
            aliens,
        });
        Ok(true)
    }

    /// Return why the run cannot continue, if it cannot.
    fn exhausted(&self) -> Option<EndReason> {
        if self.graph.is_empty() {
            Some(EndReason::AllCitiesDestroyed)
        } else if self.aliens_surviving == 0 {
            Some(EndReason::AllAliensDestroyed)
        } else {
            None
        }
    }

    /// Name of a live city, or `"?"` for a stale id. Only used for logging.
    fn city_name(&self, id: CityId) -> &str {
        self.graph.city(id).map_or("?", City::name)
    }

    fn summary(&self, step: u64, movements: Vec<Movement>, destructions: usize) -> StepSummary {
        StepSummary {
            step,
            movements,
            destructions,
            aliens_surviving: self.aliens_surviving,
            cities_remaining: self.graph.city_count(),
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// Build a report of the run so far.
    pub fn report(&self) -> SimulationReport {
        let end_reason = match self.phase {
            Phase::Finished(reason) => reason,
            _ => self.exhausted().unwrap_or(EndReason::StepLimitReached),
        };
        SimulationReport {
            end_reason,
            steps_run: self.steps_run,
            aliens_initial: self.aliens_initial,
            aliens_surviving: self.aliens_surviving,
            aliens_destroyed: self.destroyed_aliens(),
            aliens_in_cities: u64::try_from(self.occupancy.total()).unwrap_or(u64::MAX),
            cities_remaining: u64::try_from(self.graph.city_count()).unwrap_or(u64::MAX),
            cities_destroyed: u64::try_from(self.graph.destroyed_count()).unwrap_or(u64::MAX),
            events: self.events.clone(),
        }
    }

    /// Return the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Return the city graph.
    pub const fn graph(&self) -> &CityGraph {
        &self.graph
    }

    /// Return the current occupancy.
    pub const fn occupancy(&self) -> &OccupancyTracker {
        &self.occupancy
    }

    /// Return every destruction so far, in order.
    pub fn events(&self) -> &[DestructionEvent] {
        &self.events
    }

    /// Return the number of living aliens.
    pub const fn surviving_aliens(&self) -> u64 {
        self.aliens_surviving
    }

    /// Return the number of aliens destroyed so far.
    pub const fn destroyed_aliens(&self) -> u64 {
        self.aliens_initial.saturating_sub(self.aliens_surviving)
    }

    /// Consume the engine, returning the final graph and event log.
    pub fn into_parts(self) -> (CityGraph, Vec<DestructionEvent>) {
        (self.graph, self.events)
    }
}
