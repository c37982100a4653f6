//! Geographic positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a `"lat,lon"` string can't be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position {input:?}: {reason}")]
pub struct InvalidPosition {
    input: String,
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Arithmetic mean of the given positions, or `None` for an empty input.
    pub fn mean<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let (count, lat, lon) = positions
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, lat, lon), p| {
                (n + 1, lat + p.lat, lon + p.lon)
            });

        if count == 0 {
            return None;
        }

        Some(Self::new(lat / count as f64, lon / count as f64))
    }
}

impl FromStr for Position {
    type Err = InvalidPosition;

    /// Parses the `"lat,lon"` form used by the station dataset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidPosition {
            input: s.to_string(),
            reason,
        };

        let (lat, lon) = s.split_once(',').ok_or_else(|| invalid("missing comma"))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid("latitude is not a number"))?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid("longitude is not a number"))?;

        Ok(Self::new(lat, lon))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

impl From<(f64, f64)> for Position {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}
