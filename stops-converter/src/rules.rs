//! Fixed catalog data steering consolidation.
//!
//! The defaults describe the Warsaw network; tests and other networks can
//! build their own [`StopRules`].

use std::collections::{HashMap, HashSet};

/// Group names that are used verbatim instead of the normalized source name.
const PROPER_STOP_NAMES: &[(&str, &str)] = &[
    ("1226", "Mańki-Wojody"),
    ("1484", "Dw. Centralny"),
    ("2005", "Praga-Płd. - Ratusz"),
    ("2296", "Szosa Lubelska"),
    ("4040", "Lotnisko Chopina"),
    ("5001", "Połczyńska - Parking P+R"),
    ("6201", "Lipków Paschalisa-Jakubowicza"),
    ("6204", "Lipków Rondo"),
];

/// Railway station groups with regular passenger service.
///
/// Stations outside this list are dropped entirely.
const ACTIVE_RAIL_STATIONS: &[&str] = &[
    "1901", "1902", "1903", "1904", "1905", "1906", "1907", "1908", "1909", "1910",
    "2900", "2901", "2902", "2903", "2904", "2905", "2906", "2907", "2908", "2909",
    "2910", "2911", "2912", "2913", "2914", "2915", "2916", "2917", "2918", "3901",
    "4900", "4901", "4902", "4903", "4904", "4905", "4913", "4917", "4918", "4919",
    "4923", "5902", "5903", "5904", "5907", "5908", "6901", "6902", "6903", "6904",
    "7900", "7901", "7902", "7903",
];

/// Multi-platform station stakes known to have no platform assigned.
const UNMAPPED_EXEMPT_STAKES: &[&str] = &["491303", "491304"];

/// Catalog data used by the name resolver and the consolidator.
#[derive(Debug, Clone)]
pub struct StopRules {
    /// Group id → name used unconditionally.
    pub proper_names: HashMap<String, String>,
    /// Railway groups that are exported at all.
    pub active_rail_stations: HashSet<String>,
    /// Stakes whose missing platform assignment is not worth a warning.
    pub unmapped_exempt: HashSet<String>,
}

impl StopRules {
    /// Rules with no overrides, no active stations and no exemptions.
    pub fn empty() -> Self {
        Self {
            proper_names: HashMap::new(),
            active_rail_stations: HashSet::new(),
            unmapped_exempt: HashSet::new(),
        }
    }

    pub fn with_proper_name(mut self, group_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.proper_names.insert(group_id.into(), name.into());
        self
    }

    pub fn with_active_station(mut self, group_id: impl Into<String>) -> Self {
        self.active_rail_stations.insert(group_id.into());
        self
    }

    pub fn with_unmapped_exempt(mut self, stake_id: impl Into<String>) -> Self {
        self.unmapped_exempt.insert(stake_id.into());
        self
    }

    pub fn is_active_station(&self, group_id: &str) -> bool {
        self.active_rail_stations.contains(group_id)
    }

    pub fn is_unmapped_exempt(&self, stake_id: &str) -> bool {
        self.unmapped_exempt.contains(stake_id)
    }
}

impl Default for StopRules {
    fn default() -> Self {
        Self {
            proper_names: PROPER_STOP_NAMES
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
            active_rail_stations: ACTIVE_RAIL_STATIONS.iter().map(|s| s.to_string()).collect(),
            unmapped_exempt: UNMAPPED_EXEMPT_STAKES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
