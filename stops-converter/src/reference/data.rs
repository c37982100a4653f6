//! Reference datasets and their wire format.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::domain::{Position, Stake, WheelchairBoarding};

/// Railway station metadata, keyed by group id in the platforms dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationMeta {
    pub name: String,
    #[serde(rename = "pos", deserialize_with = "de_position")]
    pub position: Position,
    #[serde(rename = "oneplatform", default)]
    pub one_platform: bool,
    #[serde(default)]
    pub wheelchair: WheelchairBoarding,
    #[serde(default)]
    pub zone_id: String,
    #[serde(default)]
    pub ibnr_code: String,
    #[serde(default)]
    pub pkpplk_code: String,
    /// Platform id and position, in the order the dataset lists them.
    /// Only set for multi-platform stations.
    #[serde(default, deserialize_with = "de_platforms")]
    pub platforms: Vec<(String, Position)>,
    /// Stake id → platform id. Only set for multi-platform stations.
    #[serde(rename = "stops", default)]
    pub stake_platforms: HashMap<String, String>,
}

impl StationMeta {
    pub fn zone(&self) -> Option<String> {
        non_empty(&self.zone_id)
    }

    pub fn ibnr(&self) -> Option<String> {
        non_empty(&self.ibnr_code)
    }

    pub fn pkpplk(&self) -> Option<String> {
        non_empty(&self.pkpplk_code)
    }

    /// Platform declared for the given stake, if any.
    pub fn platform_of(&self, stake_id: &str) -> Option<&str> {
        self.stake_platforms.get(stake_id).map(String::as_str)
    }
}

/// The displayed number of a platform id such as `7900p2`.
pub fn platform_number(platform_id: &str) -> &str {
    platform_id
        .split_once('p')
        .map_or(platform_id, |(_, number)| number)
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

fn de_position<'de, D>(deserializer: D) -> Result<Position, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<Position>().map_err(serde::de::Error::custom)
}

fn de_platforms<'de, D>(deserializer: D) -> Result<Vec<(String, Position)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PlatformsVisitor;

    impl<'de> Visitor<'de> for PlatformsVisitor {
        type Value = Vec<(String, Position)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of platform id to \"lat,lon\"")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut platforms = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, pos)) = map.next_entry::<String, String>()? {
                let pos = pos.parse::<Position>().map_err(serde::de::Error::custom)?;
                platforms.push((id, pos));
            }
            Ok(platforms)
        }
    }

    deserializer.deserialize_map(PlatformsVisitor)
}

/// Both reference datasets, immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    missing_positions: HashMap<String, Position>,
    stations: HashMap<String, StationMeta>,
}

impl ReferenceData {
    pub fn new(
        missing_positions: HashMap<String, Position>,
        stations: HashMap<String, StationMeta>,
    ) -> Self {
        Self {
            missing_positions,
            stations,
        }
    }

    /// Build from the raw `stake_id -> [lat, lon]` wire form.
    pub fn from_wire(
        missing_positions: HashMap<String, (f64, f64)>,
        stations: HashMap<String, StationMeta>,
    ) -> Self {
        let missing_positions = missing_positions
            .into_iter()
            .map(|(id, pair)| (id, Position::from(pair)))
            .collect();
        Self::new(missing_positions, stations)
    }

    pub fn fallback_position(&self, stake_id: &str) -> Option<Position> {
        self.missing_positions.get(stake_id).copied()
    }

    /// Ids of every stake the fallback dataset has a position for.
    pub fn fallback_ids(&self) -> impl Iterator<Item = &str> {
        self.missing_positions.keys().map(String::as_str)
    }

    pub fn station(&self, group_id: &str) -> Option<&StationMeta> {
        self.stations.get(group_id)
    }

    /// Give every stake without a position its fallback position, if known.
    pub fn fill_positions(&self, stakes: &mut [Stake]) {
        for stake in stakes.iter_mut().filter(|s| s.position.is_none()) {
            stake.position = self.fallback_position(&stake.id);
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn fallback_count(&self) -> usize {
        self.missing_positions.len()
    }
}
