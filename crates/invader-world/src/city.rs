//! The [`City`] identity token.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// A named city.
///
/// Equality, ordering, and hashing are all by name: two `City` values with
/// the same name refer to the same city. The graph hands out [`CityId`]s for
/// adjacency and occupancy; the name is what gets displayed.
///
/// [`CityId`]: invader_types::CityId
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct City {
    name: String,
}

impl City {
    /// Create a city from a non-empty name.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EmptyCityName`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, WorldError> {
        let name = name.into();
        if name.is_empty() {
            return Err(WorldError::EmptyCityName);
        }
        Ok(Self { name })
    }

    /// Return the city's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
