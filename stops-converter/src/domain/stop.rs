//! Exported stop records and the small enums they carry.

use serde::{Deserialize, Serialize};

use super::Position;
use super::group::group_key;

/// GTFS `location_type`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum LocationType {
    /// A point where passengers board.
    #[default]
    Stop,
    /// A non-boardable hub grouping several platforms.
    Station,
}

impl From<LocationType> for u8 {
    fn from(value: LocationType) -> Self {
        match value {
            LocationType::Stop => 0,
            LocationType::Station => 1,
        }
    }
}

/// Error returned for an unknown accessibility code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid wheelchair_boarding code: {0:?}")]
pub struct InvalidWheelchairCode(String);

/// GTFS `wheelchair_boarding`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "String")]
pub enum WheelchairBoarding {
    #[default]
    Unknown,
    Accessible,
    Inaccessible,
}

impl From<Option<bool>> for WheelchairBoarding {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            None => WheelchairBoarding::Unknown,
            Some(true) => WheelchairBoarding::Accessible,
            Some(false) => WheelchairBoarding::Inaccessible,
        }
    }
}

impl From<WheelchairBoarding> for u8 {
    fn from(value: WheelchairBoarding) -> Self {
        match value {
            WheelchairBoarding::Unknown => 0,
            WheelchairBoarding::Accessible => 1,
            WheelchairBoarding::Inaccessible => 2,
        }
    }
}

impl TryFrom<String> for WheelchairBoarding {
    type Error = InvalidWheelchairCode;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        match code.trim() {
            "" | "0" => Ok(WheelchairBoarding::Unknown),
            "1" => Ok(WheelchairBoarding::Accessible),
            "2" => Ok(WheelchairBoarding::Inaccessible),
            _ => Err(InvalidWheelchairCode(code)),
        }
    }
}

/// Where a stake id leads when it isn't exported under its own id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alias {
    /// Use this exported stop instead.
    Redirect(String),
    /// There is no usable stop for this stake.
    Dropped,
}

/// One row of the exported stop table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportedStop {
    pub stop_id: String,
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub zone_id: Option<String>,
    #[serde(rename = "stop_IBNR")]
    pub ibnr_code: Option<String>,
    #[serde(rename = "stop_PKPPLK")]
    pub pkpplk_code: Option<String>,
    pub wheelchair_boarding: WheelchairBoarding,
    pub location_type: LocationType,
    pub parent_station: Option<String>,
}

impl ExportedStop {
    /// A plain boardable stop with no station metadata.
    pub fn new(stop_id: impl Into<String>, stop_name: impl Into<String>, position: Position) -> Self {
        Self {
            stop_id: stop_id.into(),
            stop_name: stop_name.into(),
            stop_lat: position.lat,
            stop_lon: position.lon,
            zone_id: None,
            ibnr_code: None,
            pkpplk_code: None,
            wheelchair_boarding: WheelchairBoarding::Unknown,
            location_type: LocationType::Stop,
            parent_station: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.stop_lat, self.stop_lon)
    }

    pub fn is_hub(&self) -> bool {
        self.location_type == LocationType::Station
    }

    pub fn group_key(&self) -> &str {
        group_key(&self.stop_id)
    }
}
