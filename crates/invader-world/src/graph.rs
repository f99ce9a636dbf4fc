//! City graph: cities as nodes, four directional links per city.
//!
//! The [`CityGraph`] is the spatial backbone of the simulation. Cities live
//! in an arena indexed by [`CityId`]; adjacency stores ids, never references.
//! Removing a city tombstones its slot, so a stale id fails lookups with
//! [`WorldError::StaleCity`] instead of silently pointing at another city.
//!
//! Links are kept symmetric: if A's `north` link holds B, B's `south` link
//! holds A (east/west likewise). Every mutation here restores that before
//! returning.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use invader_types::{CityId, Direction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::city::City;
use crate::error::WorldError;

/// The four directional link slots of one city.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    /// City to the north, if any.
    pub north: Option<CityId>,
    /// City to the south, if any.
    pub south: Option<CityId>,
    /// City to the east, if any.
    pub east: Option<CityId>,
    /// City to the west, if any.
    pub west: Option<CityId>,
}

impl Links {
    /// Return the city linked in the given direction.
    pub const fn get(&self, direction: Direction) -> Option<CityId> {
        match direction {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
        }
    }

    /// Overwrite the link in `direction`, returning the previous value.
    pub const fn set(&mut self, direction: Direction, city: Option<CityId>) -> Option<CityId> {
        let slot = match direction {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
        };
        core::mem::replace(slot, city)
    }

    /// Clear every slot pointing at `target`. Returns whether any was cleared.
    pub fn clear_target(&mut self, target: CityId) -> bool {
        let mut cleared = false;
        for direction in Direction::DISPLAY_ORDER {
            if self.get(direction) == Some(target) {
                self.set(direction, None);
                cleared = true;
            }
        }
        cleared
    }

    /// Iterate over the occupied slots in display order (north, west, south, east).
    pub fn iter(&self) -> impl Iterator<Item = (Direction, CityId)> + '_ {
        Direction::DISPLAY_ORDER
            .into_iter()
            .filter_map(|direction| self.get(direction).map(|id| (direction, id)))
    }

    /// Whether all four slots are empty.
    pub const fn is_empty(&self) -> bool {
        self.north.is_none() && self.south.is_none() && self.east.is_none() && self.west.is_none()
    }
}

/// A live city together with its links.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CityNode {
    city: City,
    links: Links,
}

/// The city graph holding all live cities and their adjacency.
///
/// Built once per run (usually by the map loader) and then only shrinks as
/// the invasion destroys cities.
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    /// Arena of city slots; `None` marks a destroyed city.
    nodes: Vec<Option<CityNode>>,
    /// Live cities by name. Sorted, so iteration is display order.
    by_name: BTreeMap<String, CityId>,
    /// Names of destroyed cities, kept for the rest of the run.
    destroyed: BTreeSet<String>,
}

impl CityGraph {
    /// Create an empty city graph.
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_name: BTreeMap::new(),
            destroyed: BTreeSet::new(),
        }
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Add a city with all four links empty.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateCity`] if a live city already has this
    /// name, [`WorldError::DestroyedCity`] if the name belonged to a city
    /// destroyed earlier in the run, or [`WorldError::EmptyCityName`].
    pub fn add_city(&mut self, name: &str) -> Result<CityId, WorldError> {
        if self.by_name.contains_key(name) {
            return Err(WorldError::DuplicateCity(name.to_owned()));
        }
        if self.destroyed.contains(name) {
            return Err(WorldError::DestroyedCity(name.to_owned()));
        }
        let city = City::new(name)?;
        let id = u32::try_from(self.nodes.len())
            .ok()
            .map(CityId::new)
            .ok_or(WorldError::ArenaFull)?;

        self.nodes.push(Some(CityNode {
            city,
            links: Links::default(),
        }));
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Link `from` to `to` in `direction`, and `to` back to `from` in the
    /// opposite direction.
    ///
    /// Prior links in either slot are overwritten. A city that lost its
    /// place in one of those slots also loses its link back, so the graph
    /// stays symmetric even when the input describes conflicting edges.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] / [`WorldError::DestroyedCity`] if
    /// either name is not live, or [`WorldError::SelfLoop`] if both names
    /// are the same city.
    pub fn connect(&mut self, from: &str, to: &str, direction: Direction) -> Result<(), WorldError> {
        let a = self.resolve(from)?;
        let b = self.resolve(to)?;
        if a == b {
            return Err(WorldError::SelfLoop(from.to_owned()));
        }
        let reverse = direction.opposite();

        let displaced_from_a = self.node_mut(a)?.links.set(direction, Some(b));
        if let Some(old) = displaced_from_a
            && old != b
        {
            self.unlink(old, reverse, a);
        }

        let displaced_from_b = self.node_mut(b)?.links.set(reverse, Some(a));
        if let Some(old) = displaced_from_b
            && old != a
        {
            self.unlink(old, direction, b);
        }

        Ok(())
    }

    /// Clear `city`'s link in `direction` if it still points at `target`.
    fn unlink(&mut self, city: CityId, direction: Direction, target: CityId) {
        if let Ok(node) = self.node_mut(city)
            && node.links.get(direction) == Some(target)
        {
            node.links.set(direction, None);
        }
    }

    // -------------------------------------------------------------------
    // Removal
    // -------------------------------------------------------------------

    /// Destroy the named city.
    ///
    /// Every neighbor's link back to it is cleared, its name is recorded as
    /// destroyed, and its arena slot is tombstoned. Returns the removed city.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] or [`WorldError::DestroyedCity`]
    /// if the name is not live.
    pub fn remove_city(&mut self, name: &str) -> Result<City, WorldError> {
        let id = self.resolve(name)?;
        self.remove(id)
    }

    /// Destroy the city in slot `id`. See [`CityGraph::remove_city`].
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::StaleCity`] if the slot is already empty.
    pub fn remove(&mut self, id: CityId) -> Result<City, WorldError> {
        let links = self.node(id)?.links;

        for (_, neighbor) in links.iter() {
            if neighbor == id {
                continue;
            }
            if let Ok(node) = self.node_mut(neighbor) {
                node.links.clear_target(id);
            }
        }

        let node = self
            .nodes
            .get_mut(id.slot())
            .and_then(Option::take)
            .ok_or(WorldError::StaleCity(id))?;

        self.by_name.remove(node.city.name());
        self.destroyed.insert(node.city.name().to_owned());
        debug!(city = %node.city, "City removed from graph");
        Ok(node.city)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Look up the id of a live city.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DestroyedCity`] if the name was destroyed, or
    /// [`WorldError::UnknownCity`] if it never existed.
    pub fn resolve(&self, name: &str) -> Result<CityId, WorldError> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }
        if self.destroyed.contains(name) {
            Err(WorldError::DestroyedCity(name.to_owned()))
        } else {
            Err(WorldError::UnknownCity(name.to_owned()))
        }
    }

    /// Return the id of a live city, if any.
    pub fn city_id(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name).copied()
    }

    /// Return the city in slot `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::StaleCity`] if the slot is empty.
    pub fn city(&self, id: CityId) -> Result<&City, WorldError> {
        self.node(id).map(|node| &node.city)
    }

    /// Return the links of the city in slot `id`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::StaleCity`] if the slot is empty.
    pub fn links(&self, id: CityId) -> Result<Links, WorldError> {
        self.node(id).map(|node| node.links)
    }

    /// Return the city linked to `name` in `direction`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] or [`WorldError::DestroyedCity`]
    /// if the name is not live.
    pub fn link(&self, name: &str, direction: Direction) -> Result<Option<&City>, WorldError> {
        let id = self.resolve(name)?;
        match self.node(id)?.links.get(direction) {
            Some(neighbor) => self.city(neighbor).map(Some),
            None => Ok(None),
        }
    }

    /// Return the live neighbors of `name` in display order (north, west,
    /// south, east), with the direction of each link.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] or [`WorldError::DestroyedCity`]
    /// if the name is not live.
    pub fn neighbors(&self, name: &str) -> Result<Vec<(Direction, &City)>, WorldError> {
        let id = self.resolve(name)?;
        let links = self.node(id)?.links;
        Ok(links
            .iter()
            .filter_map(|(direction, neighbor)| {
                self.city(neighbor).ok().map(|city| (direction, city))
            })
            .collect())
    }

    /// Return the ids of the live neighbors of slot `id`, in display order.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::StaleCity`] if the slot is empty.
    pub fn neighbor_ids(&self, id: CityId) -> Result<Vec<CityId>, WorldError> {
        let links = self.node(id)?.links;
        Ok(links
            .iter()
            .map(|(_, neighbor)| neighbor)
            .filter(|&neighbor| self.contains(neighbor))
            .collect())
    }

    /// Whether the named city has at least one live neighbor.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCity`] or [`WorldError::DestroyedCity`]
    /// if the name is not live.
    pub fn has_live_neighbors(&self, name: &str) -> Result<bool, WorldError> {
        self.neighbors(name).map(|neighbors| !neighbors.is_empty())
    }

    /// Whether slot `id` holds a live city.
    pub fn contains(&self, id: CityId) -> bool {
        self.node(id).is_ok()
    }

    /// Whether a live city has this name.
    pub fn is_live(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Whether a city with this name was destroyed during the run.
    pub fn is_destroyed(&self, name: &str) -> bool {
        self.destroyed.contains(name)
    }

    /// Iterate over destroyed city names in ascending order.
    pub fn destroyed(&self) -> impl Iterator<Item = &str> {
        self.destroyed.iter().map(String::as_str)
    }

    /// Return the number of destroyed cities.
    pub fn destroyed_count(&self) -> usize {
        self.destroyed.len()
    }

    /// Return the number of live cities.
    pub fn city_count(&self) -> usize {
        self.by_name.len()
    }

    /// Whether no live cities remain.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Return the ids of all live cities, ordered by city name.
    pub fn live_ids(&self) -> Vec<CityId> {
        self.by_name.values().copied().collect()
    }

    /// Iterate over all live cities in name order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.by_name.values().filter_map(|&id| self.city(id).ok())
    }

    /// Check the graph's structural invariants: every link points at a
    /// live city, and every link is mirrored by the opposite link.
    pub fn is_consistent(&self) -> bool {
        self.by_name.values().all(|&id| {
            let Ok(node) = self.node(id) else {
                return false;
            };
            node.links.iter().all(|(direction, neighbor)| {
                self.node(neighbor)
                    .is_ok_and(|other| other.links.get(direction.opposite()) == Some(id))
            })
        })
    }

    // -------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------

    /// Render one line per live city, sorted by name:
    /// `<name> north=<n> west=<w> south=<s> east=<e>`, omitting empty links.
    pub fn render_lines(&self) -> Vec<String> {
        self.by_name
            .values()
            .filter_map(|&id| self.node(id).ok())
            .map(|node| {
                let mut line = node.city.name().to_owned();
                for (direction, neighbor) in node.links.iter() {
                    if let Ok(city) = self.city(neighbor) {
                        // Writing to a String cannot fail.
                        let _ = write!(line, " {direction}={city}");
                    }
                }
                line
            })
            .collect()
    }

    /// Render the whole graph, each city line terminated by a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.render_lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    // -------------------------------------------------------------------
    // Arena access
    // -------------------------------------------------------------------

    fn node(&self, id: CityId) -> Result<&CityNode, WorldError> {
        self.nodes
            .get(id.slot())
            .and_then(Option::as_ref)
            .ok_or(WorldError::StaleCity(id))
    }

    fn node_mut(&mut self, id: CityId) -> Result<&mut CityNode, WorldError> {
        self.nodes
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .ok_or(WorldError::StaleCity(id))
    }
}
