//! Stop groups: the physical places stakes belong to.

use serde::{Deserialize, Serialize};

/// Locality code used for the capital's own stops.
pub const CAPITAL_LOCALITY: &str = "--";

/// Id characters 2-3 that mark a railway-station group.
const RAILWAY_MARKERS: [&str; 3] = ["90", "91", "92"];

/// How a group is consolidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Street stops, loops, metro entrances and the like.
    Ordinary,
    /// A railway station made only of virtual stakes.
    Railway,
}

/// A stop group as handed over by the source parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub locality: String,
    pub locality_code: String,
}

impl Group {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        locality: impl Into<String>,
        locality_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            locality: locality.into(),
            locality_code: locality_code.into(),
        }
    }

    pub fn kind(&self) -> GroupKind {
        if is_railway_group(&self.id) {
            GroupKind::Railway
        } else {
            GroupKind::Ordinary
        }
    }

    /// Whether the group lies within the capital itself.
    pub fn in_capital(&self) -> bool {
        self.locality_code == CAPITAL_LOCALITY
    }
}

/// Checks the railway marker at id positions 2-3.
pub fn is_railway_group(id: &str) -> bool {
    id.get(1..3)
        .is_some_and(|marker| RAILWAY_MARKERS.contains(&marker))
}

/// The group part of any stop id: its first 4 characters.
///
/// Stake ids, station ids and platform ids all start with their group id.
pub fn group_key(stop_id: &str) -> &str {
    stop_id.get(..4).unwrap_or(stop_id)
}
