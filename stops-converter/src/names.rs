//! Group name resolution.
//!
//! Source names need cosmetic fixes, and groups outside the capital get
//! their locality prepended unless the name already makes it redundant.

use std::collections::HashMap;

use crate::domain::{Group, GroupKind};

/// Ordered text fixes applied to every source name.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    (".", ". "),
    ("-", " - "),
    ("  ", " "),
    ("al.", "Al."),
    ("pl.", "Pl."),
    ("os.", "Os."),
    ("ks.", "Ks."),
    ("Ak ", "AK "),
    ("Ch ", "CH "),
    ("gen.", "Gen."),
    ("rondo ", "Rondo "),
];

/// Malformed locality labels and their corrections.
const LOCALITY_FIXES: &[(&str, &str)] = &[("Kampinoski Pn", "Kampinoski PN")];

/// Tokens marking stops next to a railway station.
const RAILWAY_MARKERS: &[&str] = &["PKP", "WKD"];

/// A predicate that, when true, makes the locality prefix redundant.
type SkipPrefixRule = fn(&Group) -> bool;

/// Evaluated in order; the first hit wins.
const SKIP_PREFIX_RULES: &[SkipPrefixRule] = &[
    in_capital,
    is_railway_station,
    near_railway_station,
    locality_in_name,
    locality_part_in_name,
];

fn in_capital(group: &Group) -> bool {
    group.in_capital()
}

fn is_railway_station(group: &Group) -> bool {
    group.kind() == GroupKind::Railway
}

fn near_railway_station(group: &Group) -> bool {
    RAILWAY_MARKERS
        .iter()
        .any(|marker| group.name.contains(marker))
}

fn locality_in_name(group: &Group) -> bool {
    group
        .name
        .to_lowercase()
        .contains(&group.locality.to_lowercase())
}

fn locality_part_in_name(group: &Group) -> bool {
    let name = group.name.to_lowercase();
    group
        .locality
        .to_lowercase()
        .split_whitespace()
        .any(|part| name.contains(part))
}

/// Apply the fixed cosmetic substitutions to a source name.
///
/// ```
/// use stops_converter::names::normalize;
///
/// assert_eq!(normalize("pl.Wilsona"), "Pl. Wilsona");
/// assert_eq!(normalize("Metro-Wilanowska"), "Metro - Wilanowska");
/// ```
pub fn normalize(name: &str) -> String {
    let fixed = SUBSTITUTIONS
        .iter()
        .fold(name.to_string(), |acc, (from, to)| acc.replace(from, to));
    fixed.trim_end().to_string()
}

/// Whether the locality should be prepended to the group name.
pub fn should_prefix_locality(group: &Group) -> bool {
    !SKIP_PREFIX_RULES.iter().any(|rule| rule(group))
}

/// Remembers the final display name of every group seen so far.
#[derive(Debug, Clone, Default)]
pub struct NameBook {
    names: HashMap<String, String>,
}

impl NameBook {
    /// Start from a set of per-group names that always win.
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self { names: overrides }
    }

    /// Resolve the display name of `group`, updating its `name` and
    /// `locality` in place.
    pub fn resolve(&mut self, group: &mut Group) -> String {
        if let Some((_, fixed)) = LOCALITY_FIXES
            .iter()
            .find(|(malformed, _)| group.locality == *malformed)
        {
            group.locality = fixed.to_string();
        }

        group.name = normalize(&group.name);

        if let Some(known) = self.names.get(&group.id) {
            group.name = known.clone();
        } else {
            if should_prefix_locality(group) {
                group.name = format!("{} {}", group.locality, group.name);
            }
            self.names.insert(group.id.clone(), group.name.clone());
        }

        group.name.clone()
    }

    pub fn get(&self, group_id: &str) -> Option<&str> {
        self.names.get(group_id).map(String::as_str)
    }
}
