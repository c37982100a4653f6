//! Run configuration for the converter binary.

use std::path::PathBuf;

use crate::reference::ReferenceClientConfig;

const DEFAULT_GROUPS_PATH: &str = "groups.json";
const DEFAULT_VISITS_PATH: &str = "visits.json";
const DEFAULT_OUTPUT_DIR: &str = "gtfs";
const DEFAULT_REPORT_PATH: &str = "missing_stops.json";

/// Error returned when the environment lacks a required setting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where to read inputs from and write outputs to.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// JSON file with parsed groups and their stakes.
    pub groups_path: PathBuf,
    /// JSON file with the schedule's stop visits.
    pub visits_path: PathBuf,
    /// Directory receiving `stops.txt`.
    pub output_dir: PathBuf,
    /// Path of the fallback position report.
    pub report_path: PathBuf,
    pub reference: ReferenceClientConfig,
}

impl ConverterConfig {
    /// Read the configuration from `STOPS_*` environment variables.
    ///
    /// The two reference URLs are required; paths fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let path = |name: &str, default: &str| PathBuf::from(lookup(name).unwrap_or_else(|| default.to_string()));

        let mut reference = ReferenceClientConfig::new(
            required("STOPS_MISSING_URL")?,
            required("STOPS_PLATFORMS_URL")?,
        );
        if let Some(raw) = lookup("STOPS_TIMEOUT_SECS") {
            let secs = raw.parse().map_err(|_| ConfigError::Invalid {
                name: "STOPS_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            reference = reference.with_timeout_secs(secs);
        }

        Ok(Self {
            groups_path: path("STOPS_GROUPS_PATH", DEFAULT_GROUPS_PATH),
            visits_path: path("STOPS_VISITS_PATH", DEFAULT_VISITS_PATH),
            output_dir: path("STOPS_OUTPUT_DIR", DEFAULT_OUTPUT_DIR),
            report_path: path("STOPS_REPORT_PATH", DEFAULT_REPORT_PATH),
            reference,
        })
    }
}
