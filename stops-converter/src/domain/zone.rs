//! Fare zone labels.

use std::fmt;

/// Label of the "between zones 1 and 2" sentinel.
pub const BOUNDARY_LABEL: &str = "1/2";

/// A fare zone assigned to a stop group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ZoneLabel {
    Zone(String),
    /// The group straddles two zones; membership is ambiguous.
    Boundary,
}

impl ZoneLabel {
    pub fn parse(label: &str) -> Self {
        if label == BOUNDARY_LABEL {
            ZoneLabel::Boundary
        } else {
            ZoneLabel::Zone(label.to_string())
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, ZoneLabel::Boundary)
    }
}

impl fmt::Display for ZoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneLabel::Zone(label) => f.write_str(label),
            ZoneLabel::Boundary => f.write_str(BOUNDARY_LABEL),
        }
    }
}

impl From<&str> for ZoneLabel {
    fn from(label: &str) -> Self {
        ZoneLabel::parse(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_boundary() {
        assert_eq!(ZoneLabel::parse("1/2"), ZoneLabel::Boundary);
        assert!(ZoneLabel::parse("1/2").is_boundary());
        assert_eq!(ZoneLabel::parse("1"), ZoneLabel::Zone("1".into()));
    }

    #[test]
    fn display() {
        assert_eq!(ZoneLabel::Boundary.to_string(), "1/2");
        assert_eq!(ZoneLabel::from("2").to_string(), "2");
    }
}
