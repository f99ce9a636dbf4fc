//! Which aliens stand in which city.
//!
//! An [`OccupancyTracker`] maps a city's [`CityId`] to the set of aliens
//! currently inside it. A city with no entry is unoccupied. The tracker
//! knows nothing about adjacency; callers clear a city's entry when the
//! graph destroys it.

use std::collections::{BTreeMap, BTreeSet};

use invader_types::{AlienId, CityId};

/// Shared empty set returned for unoccupied cities.
static NO_OCCUPANTS: BTreeSet<AlienId> = BTreeSet::new();

/// Occupant sets keyed by city.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyTracker {
    occupants: BTreeMap<CityId, BTreeSet<AlienId>>,
}

impl OccupancyTracker {
    /// Create a tracker with every city unoccupied.
    pub const fn new() -> Self {
        Self {
            occupants: BTreeMap::new(),
        }
    }

    /// Add `alien` to `city`, creating the entry if needed.
    ///
    /// Adding an alien that is already present is a no-op. Returns the
    /// number of occupants after the call.
    pub fn enter(&mut self, city: CityId, alien: AlienId) -> usize {
        let set = self.occupants.entry(city).or_default();
        set.insert(alien);
        set.len()
    }

    /// Remove `alien` from `city`. Returns whether it was present.
    ///
    /// The entry is dropped once its last occupant leaves.
    pub fn leave(&mut self, city: CityId, alien: AlienId) -> bool {
        let Some(set) = self.occupants.get_mut(&city) else {
            return false;
        };
        let removed = set.remove(&alien);
        if set.is_empty() {
            self.occupants.remove(&city);
        }
        removed
    }

    /// Return the aliens currently in `city` (empty if none).
    pub fn occupants(&self, city: CityId) -> &BTreeSet<AlienId> {
        self.occupants.get(&city).unwrap_or(&NO_OCCUPANTS)
    }

    /// Return the number of aliens currently in `city`.
    pub fn count(&self, city: CityId) -> usize {
        self.occupants.get(&city).map_or(0, BTreeSet::len)
    }

    /// Drop `city`'s entry entirely, returning whoever was inside.
    pub fn clear(&mut self, city: CityId) -> BTreeSet<AlienId> {
        self.occupants.remove(&city).unwrap_or_default()
    }

    /// Return the ids of all occupied cities in ascending order.
    pub fn occupied_cities(&self) -> Vec<CityId> {
        self.occupants
            .iter()
            .filter(|(_, set)| !set.is_empty())
            .map(|(&city, _)| city)
            .collect()
    }

    /// Return the city `alien` is in, if it is anywhere.
    pub fn location_of(&self, alien: AlienId) -> Option<CityId> {
        self.occupants
            .iter()
            .find(|(_, set)| set.contains(&alien))
            .map(|(&city, _)| city)
    }

    /// Return the total number of aliens across all cities.
    pub fn total(&self) -> usize {
        self.occupants.values().map(BTreeSet::len).sum()
    }

    /// Return the largest occupant count of any single city.
    pub fn max_count(&self) -> usize {
        self.occupants.values().map(BTreeSet::len).max().unwrap_or(0)
    }
}
