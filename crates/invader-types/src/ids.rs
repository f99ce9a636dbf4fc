//! Type-safe identifier wrappers.
//!
//! Cities and aliens both carry plain integer identities, wrapped in
//! newtypes so the compiler rejects accidental mixing. A [`CityId`] is an
//! index into the city graph's arena; an [`AlienId`] is a handle in
//! `1..=num_aliens` assigned when the invasion starts.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an unsigned integer with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Create an identifier from its raw value.
            pub const fn new(raw: $inner) -> Self {
                Self(raw)
            }

            /// Return the inner raw value.
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(raw: $inner) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Slot index of a city in the city graph arena.
    ///
    /// Slots are never reused: once a city is destroyed its index stays
    /// tombstoned, so a stale `CityId` fails lookups instead of aliasing a
    /// different city.
    CityId(u32)
}

define_id! {
    /// Unique identifier for an alien invader.
    AlienId(u64)
}

impl CityId {
    /// Return the arena slot as a `usize` for slice access.
    pub fn slot(self) -> usize {
        // u32 always fits in usize on supported targets; saturate otherwise.
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }
}
