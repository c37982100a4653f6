//! Writing the final stop table and the fallback-position report.

use std::collections::{BTreeSet, HashSet};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{ExportedStop, ZoneLabel};
use crate::reference::ReferenceData;
use crate::registry::StopRegistry;

/// Columns of `stops.txt`, in the order of [`ExportedStop`]'s fields.
pub const STOP_HEADERS: [&str; 10] = [
    "stop_id",
    "stop_name",
    "stop_lat",
    "stop_lon",
    "zone_id",
    "stop_IBNR",
    "stop_PKPPLK",
    "wheelchair_boarding",
    "location_type",
    "parent_station",
];

/// Errors that can occur while writing export artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which fallback positions the run actually needed.
///
/// All lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FallbackReport {
    /// Fallback stake ids the schedule referenced, directly or through an alias.
    pub consumed: Vec<String>,
    /// Fallback stake ids nobody referenced.
    pub unconsumed: Vec<String>,
    /// Referenced stake ids that still have no position.
    pub missing: Vec<String>,
}

/// Result of a full export.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub stops_written: usize,
    pub report: FallbackReport,
}

/// Read-only view over a finished registry that produces the export.
pub struct Exporter<'a> {
    registry: &'a StopRegistry,
    reference: &'a ReferenceData,
}

impl<'a> Exporter<'a> {
    pub fn new(registry: &'a StopRegistry, reference: &'a ReferenceData) -> Self {
        Self {
            registry,
            reference,
        }
    }

    /// A stop is exported when it was used itself, or when it is a platform
    /// whose hub was used. Hubs are only exported through their own id.
    pub fn is_exported(&self, stop: &ExportedStop) -> bool {
        if self.registry.is_used(&stop.stop_id) {
            return true;
        }

        !stop.is_hub()
            && stop
                .parent_station
                .as_deref()
                .is_some_and(|parent| self.registry.is_used(parent))
    }

    /// Exported stops in registry order, each with a zone filled in.
    ///
    /// Stops without their own zone take their group's zone; groups
    /// without one fall back to the boundary zone.
    pub fn stops(&self) -> Vec<ExportedStop> {
        let mut warned: HashSet<&str> = HashSet::new();

        self.registry
            .stops()
            .iter()
            .filter(|stop| self.is_exported(stop))
            .map(|stop| {
                let mut exported = stop.clone();
                if exported.zone_id.is_none() {
                    let key = stop.group_key();
                    let zone = match self.registry.zone(key) {
                        Some(zone) => zone.clone(),
                        None => {
                            if warned.insert(key) {
                                warn!(group = key, "stop group has no zone assigned, using boundary zone");
                            }
                            ZoneLabel::Boundary
                        }
                    };
                    exported.zone_id = Some(zone.to_string());
                }
                exported
            })
            .collect()
    }

    pub fn fallback_report(&self) -> FallbackReport {
        let (consumed, unconsumed): (BTreeSet<&str>, BTreeSet<&str>) = self
            .reference
            .fallback_ids()
            .partition(|id| self.registry.was_referenced(id));
        let missing: BTreeSet<&str> = self.registry.missing().collect();

        FallbackReport {
            consumed: consumed.into_iter().map(String::from).collect(),
            unconsumed: unconsumed.into_iter().map(String::from).collect(),
            missing: missing.into_iter().map(String::from).collect(),
        }
    }

    /// Write the stop table as CSV with a header row. Returns the row count.
    pub fn write_stops<W: Write>(&self, writer: W) -> Result<usize, ExportError> {
        let mut csv = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv.write_record(STOP_HEADERS)?;

        let stops = self.stops();
        for stop in &stops {
            csv.serialize(stop)?;
        }
        csv.flush()?;

        Ok(stops.len())
    }

    pub fn write_report<W: Write>(&self, writer: W) -> Result<FallbackReport, ExportError> {
        let report = self.fallback_report();
        serde_json::to_writer_pretty(writer, &report)?;
        Ok(report)
    }

    /// Write `stops.txt` into `gtfs_dir` and the fallback report to `report_path`.
    pub fn export(&self, gtfs_dir: &Path, report_path: &Path) -> Result<ExportSummary, ExportError> {
        fs::create_dir_all(gtfs_dir)?;

        info!(dir = %gtfs_dir.display(), "exporting stops");
        let file = BufWriter::new(File::create(gtfs_dir.join("stops.txt"))?);
        let stops_written = self.write_stops(file)?;

        info!(path = %report_path.display(), "exporting fallback position report");
        if let Some(parent) = report_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut file = BufWriter::new(File::create(report_path)?);
        let report = self.write_report(&mut file)?;
        file.flush()?;

        Ok(ExportSummary {
            stops_written,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::{Alias, LocationType, Position};

    fn stop(id: &str) -> ExportedStop {
        ExportedStop::new(id, format!("Stop {id}"), Position::new(52.0, 21.0))
    }

    fn hub_with_platforms(reg: &mut StopRegistry) {
        let mut hub = stop("4900");
        hub.location_type = LocationType::Station;
        reg.insert_stop(hub);
        for id in ["4900p1", "4900p2"] {
            let mut platform = stop(id);
            platform.parent_station = Some("4900".into());
            reg.insert_stop(platform);
            reg.link_parent(id, "4900");
        }
    }

    fn exported_ids(reg: &StopRegistry) -> Vec<String> {
        let reference = ReferenceData::default();
        Exporter::new(reg, &reference)
            .stops()
            .into_iter()
            .map(|s| s.stop_id)
            .collect()
    }

    #[test]
    fn unused_stops_are_pruned() {
        let mut reg = StopRegistry::new();
        reg.insert_stop(stop("123401"));
        reg.insert_stop(stop("123402"));
        reg.mark_used("123402");

        assert_eq!(exported_ids(&reg), vec!["123402"]);
    }

    #[test]
    fn used_platform_exports_hub_and_all_its_platforms() {
        let mut reg = StopRegistry::new();
        hub_with_platforms(&mut reg);
        reg.mark_used("4900p1");

        assert_eq!(exported_ids(&reg), vec!["4900", "4900p1", "4900p2"]);
    }

    #[test]
    fn used_hub_exports_its_platforms() {
        let mut reg = StopRegistry::new();
        hub_with_platforms(&mut reg);
        reg.mark_used("4900");

        assert_eq!(exported_ids(&reg), vec!["4900", "4900p1", "4900p2"]);
    }

    #[test]
    fn unused_station_exports_nothing() {
        let mut reg = StopRegistry::new();
        hub_with_platforms(&mut reg);

        assert!(exported_ids(&reg).is_empty());
    }

    #[test]
    fn hub_is_never_pulled_in_as_a_child() {
        let mut reg = StopRegistry::new();
        let mut nested = stop("4901");
        nested.location_type = LocationType::Station;
        nested.parent_station = Some("4900".into());
        reg.insert_stop(nested);
        reg.mark_used("4900");

        assert!(exported_ids(&reg).is_empty());
    }

    #[test]
    fn zone_comes_from_group_or_boundary() {
        let mut reg = StopRegistry::new();
        reg.insert_stop(stop("123401"));
        reg.insert_stop(stop("567801"));
        let mut zoned = stop("7900");
        zoned.zone_id = Some("2".into());
        reg.insert_stop(zoned);
        for id in ["123401", "567801", "7900"] {
            reg.mark_used(id);
        }
        reg.assign_zone("1234", "1".into());
        reg.assign_zone("7900", "1".into());

        let reference = ReferenceData::default();
        let stops = Exporter::new(&reg, &reference).stops();
        let zones: Vec<_> = stops.iter().map(|s| s.zone_id.as_deref()).collect();
        assert_eq!(zones, vec![Some("1"), Some("1/2"), Some("2")]);

        // The registry itself is left untouched.
        assert_eq!(reg.stop("567801").unwrap().zone_id, None);
    }

    #[test]
    fn csv_has_header_and_rows() {
        let mut reg = StopRegistry::new();
        hub_with_platforms(&mut reg);
        reg.mark_used("4900p2");
        reg.assign_zone("4900", "1".into());

        let reference = ReferenceData::default();
        let mut out = Vec::new();
        let written = Exporter::new(&reg, &reference).write_stops(&mut out).unwrap();
        assert_eq!(written, 3);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "stop_id,stop_name,stop_lat,stop_lon,zone_id,stop_IBNR,stop_PKPPLK,wheelchair_boarding,location_type,parent_station"
        );
        assert_eq!(lines[1], "4900,Stop 4900,52.0,21.0,1,,,0,1,");
        assert_eq!(lines[2], "4900p1,Stop 4900p1,52.0,21.0,1,,,0,0,4900");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn empty_export_still_has_header() {
        let reg = StopRegistry::new();
        let reference = ReferenceData::default();
        let mut out = Vec::new();
        let written = Exporter::new(&reg, &reference).write_stops(&mut out).unwrap();

        assert_eq!(written, 0);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn fallback_report_is_sorted() {
        let mut missing = HashMap::new();
        for id in ["300103", "300101", "300102"] {
            missing.insert(id.to_string(), Position::new(52.0, 21.0));
        }
        let reference = ReferenceData::new(missing, HashMap::new());

        let mut reg = StopRegistry::new();
        reg.insert_stop(stop("300101"));
        reg.insert_stop(stop("300103"));
        reg.mark_invalid("300209");
        reg.mark_invalid("300205");
        reg.insert_alias("300281", Alias::Redirect("300205".into()));
        reg.resolve("300103");
        reg.resolve("300101");
        reg.resolve("300209");
        reg.resolve("300281");

        let report = Exporter::new(&reg, &reference).fallback_report();
        assert_eq!(report.consumed, vec!["300101", "300103"]);
        assert_eq!(report.unconsumed, vec!["300102"]);
        assert_eq!(report.missing, vec!["300205", "300209"]);
    }

    #[test]
    fn export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let gtfs_dir = dir.path().join("gtfs");
        let report_path = dir.path().join("reports").join("missing_stops.json");

        let mut reg = StopRegistry::new();
        reg.insert_stop(stop("123401"));
        reg.mark_used("123401");
        let reference = ReferenceData::default();

        let summary = Exporter::new(&reg, &reference)
            .export(&gtfs_dir, &report_path)
            .unwrap();
        assert_eq!(summary.stops_written, 1);

        let stops = std::fs::read_to_string(gtfs_dir.join("stops.txt")).unwrap();
        assert!(stops.contains("123401,Stop 123401"));

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(report["consumed"], serde_json::json!([]));
        assert_eq!(report["unconsumed"], serde_json::json!([]));
        assert_eq!(report["missing"], serde_json::json!([]));
    }
}
