//! Enumeration types for the Invader Sim simulation.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Compass directions
// ---------------------------------------------------------------------------

/// One of the four directional links every city carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Inverse of [`Direction::South`].
    North,
    /// Inverse of [`Direction::North`].
    South,
    /// Inverse of [`Direction::West`].
    East,
    /// Inverse of [`Direction::East`].
    West,
}

impl Direction {
    /// All directions in display order: north, west, south, east.
    pub const DISPLAY_ORDER: [Self; 4] = [Self::North, Self::West, Self::South, Self::East];

    /// Return the direction pointing back the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Return the lowercase keyword used in map files and renders.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token is not one of the four direction keywords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction: {0:?}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Self::North),
            "south" => Ok(Self::South),
            "east" => Ok(Self::East),
            "west" => Ok(Self::West),
            other => Err(ParseDirectionError(other.to_owned())),
        }
    }
}
