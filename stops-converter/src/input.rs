//! Input files handed over by the schedule parser.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::{Group, Stake, ZoneLabel, group_key};
use crate::registry::StopRegistry;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One group together with all of its stakes.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupRecord {
    pub group: Group,
    #[serde(default)]
    pub stakes: Vec<Stake>,
}

/// A single reference to a stake from the schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct Visit {
    pub stop_id: String,
    /// Fare zone the schedule gives for this visit, if any.
    #[serde(default)]
    pub zone: Option<String>,
}

impl Visit {
    /// Resolve the visited stake and record the visit in `registry`.
    ///
    /// Returns the exported stop id the visit landed on.
    pub fn apply(&self, registry: &mut StopRegistry) -> Option<String> {
        let stop_id = registry.resolve(&self.stop_id)?;
        registry.mark_used(&stop_id);
        if let Some(zone) = self.zone.as_deref().filter(|z| !z.is_empty()) {
            registry.assign_zone(group_key(&stop_id), ZoneLabel::parse(zone));
        }
        Some(stop_id)
    }
}

pub fn load_groups(path: &Path) -> Result<Vec<GroupRecord>, InputError> {
    load_json(path)
}

pub fn load_visits(path: &Path) -> Result<Vec<Visit>, InputError> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::domain::{Alias, ExportedStop, Position};

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_groups() {
        let file = write_temp(
            r#"[
                {
                    "group": {"id": "1234", "name": "Centrum", "locality": "Warszawa", "locality_code": "--"},
                    "stakes": [
                        {"id": "123401", "code": "01", "position": {"lat": 52.23, "lon": 21.01}, "wheelchair": true},
                        {"id": "123481", "code": "81"}
                    ]
                },
                {
                    "group": {"id": "1901", "name": "Dworzec", "locality": "Warszawa", "locality_code": "--"}
                }
            ]"#,
        );

        let groups = load_groups(file.path()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group.name, "Centrum");
        assert_eq!(groups[0].stakes.len(), 2);
        assert_eq!(groups[0].stakes[0].position, Some(Position::new(52.23, 21.01)));
        assert!(groups[0].stakes[1].is_virtual());
        assert!(groups[1].stakes.is_empty());
    }

    #[test]
    fn parses_visits() {
        let file = write_temp(r#"[{"stop_id": "123401", "zone": "1"}, {"stop_id": "123402"}]"#);

        let visits = load_visits(file.path()).unwrap();
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].zone.as_deref(), Some("1"));
        assert_eq!(visits[1].zone, None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_visits(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let file = write_temp(r#"[{"zone": "1"}]"#);
        let err = load_visits(file.path()).unwrap_err();
        assert!(matches!(err, InputError::Json { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn visit_marks_target_used_and_zones_its_group() {
        let mut reg = StopRegistry::new();
        reg.insert_stop(ExportedStop::new("123401", "Centrum 01", Position::new(52.0, 21.0)));
        reg.insert_alias("123481", Alias::Redirect("123401".into()));

        let visit = Visit {
            stop_id: "123481".into(),
            zone: Some("1".into()),
        };
        assert_eq!(visit.apply(&mut reg).as_deref(), Some("123401"));
        assert!(reg.is_used("123401"));
        assert_eq!(reg.zone("1234"), Some(&ZoneLabel::Zone("1".into())));
    }

    #[test]
    fn visit_to_dropped_stake_is_ignored() {
        let mut reg = StopRegistry::new();
        reg.insert_alias("190181", Alias::Dropped);

        let visit = Visit {
            stop_id: "190181".into(),
            zone: Some("1".into()),
        };
        assert_eq!(visit.apply(&mut reg), None);
        assert_eq!(reg.zone("1901"), None);
    }
}
