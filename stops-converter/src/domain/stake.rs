//! Stake types: the individual boarding points inside a group.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Position;

/// Error returned when parsing an invalid stake code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stake code: {reason}")]
pub struct InvalidStakeCode {
    reason: &'static str,
}

/// A 2-character stake code, such as `01` or `81`.
///
/// The first character separates virtual stakes (`8x`) from physical ones,
/// the second identifies the stake "family" within its group.
///
/// # Examples
///
/// ```
/// use stops_converter::domain::StakeCode;
///
/// let code = StakeCode::parse("81").unwrap();
/// assert!(code.is_virtual());
/// assert_eq!(code.family(), '1');
///
/// assert!(StakeCode::parse("1").is_err());
/// assert!(StakeCode::parse("0 1").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StakeCode([u8; 2]);

impl StakeCode {
    /// Parse a stake code. The input must be exactly 2 ASCII alphanumerics.
    pub fn parse(s: &str) -> Result<Self, InvalidStakeCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidStakeCode {
                reason: "must be exactly 2 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return Err(InvalidStakeCode {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(StakeCode([bytes[0], bytes[1]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII alphanumerics are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Virtual stakes only announce boarding and have no position of their own.
    pub fn is_virtual(&self) -> bool {
        self.0[0] == b'8'
    }

    /// The second character, shared by a virtual stake and its physical twin.
    pub fn family(&self) -> char {
        self.0[1] as char
    }
}

impl fmt::Debug for StakeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StakeCode({})", self.as_str())
    }
}

impl fmt::Display for StakeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StakeCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StakeCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StakeCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A single stake as handed over by the source parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stake {
    pub id: String,
    pub code: StakeCode,
    /// `None` when the source omits coordinates.
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub wheelchair: Option<bool>,
}

impl Stake {
    pub fn new(id: impl Into<String>, code: StakeCode) -> Self {
        Self {
            id: id.into(),
            code,
            position: None,
            wheelchair: None,
        }
    }

    /// Set the known position.
    pub fn at(mut self, lat: f64, lon: f64) -> Self {
        self.position = Some(Position::new(lat, lon));
        self
    }

    /// Set the accessibility flag.
    pub fn with_wheelchair(mut self, accessible: bool) -> Self {
        self.wheelchair = Some(accessible);
        self
    }

    pub fn is_virtual(&self) -> bool {
        self.code.is_virtual()
    }
}
