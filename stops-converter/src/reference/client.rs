//! HTTP client for the two reference datasets.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::data::{ReferenceData, StationMeta};
use super::error::ReferenceError;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the reference client.
#[derive(Debug, Clone)]
pub struct ReferenceClientConfig {
    /// URL of the `stake_id -> [lat, lon]` dataset
    pub missing_stops_url: String,
    /// URL of the `group_id -> station` dataset
    pub rail_platforms_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ReferenceClientConfig {
    /// Create a new config with the two dataset URLs.
    pub fn new(missing_stops_url: impl Into<String>, rail_platforms_url: impl Into<String>) -> Self {
        Self {
            missing_stops_url: missing_stops_url.into(),
            rail_platforms_url: rail_platforms_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the reference datasets.
#[derive(Debug, Clone)]
pub struct ReferenceClient {
    http: reqwest::Client,
    config: ReferenceClientConfig,
}

impl ReferenceClient {
    pub fn new(config: ReferenceClientConfig) -> Result<Self, ReferenceError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the fallback positions of stakes without coordinates.
    pub async fn fetch_missing_positions(
        &self,
    ) -> Result<HashMap<String, (f64, f64)>, ReferenceError> {
        self.fetch_json(&self.config.missing_stops_url, "missing stops")
            .await
    }

    /// Fetch the railway station metadata.
    pub async fn fetch_stations(&self) -> Result<HashMap<String, StationMeta>, ReferenceError> {
        self.fetch_json(&self.config.rail_platforms_url, "rail platforms")
            .await
    }

    /// Fetch both datasets.
    pub async fn fetch_all(&self) -> Result<ReferenceData, ReferenceError> {
        let (missing, stations) =
            tokio::try_join!(self.fetch_missing_positions(), self.fetch_stations())?;
        Ok(ReferenceData::from_wire(missing, stations))
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        dataset: &'static str,
    ) -> Result<T, ReferenceError> {
        debug!(url, dataset, "fetching reference dataset");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReferenceError::Api {
                url: url.to_string(),
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ReferenceError::Json {
            dataset,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = ReferenceClientConfig::new(
            "http://localhost:8080/missing.json",
            "http://localhost:8080/rail.json",
        );
        assert_eq!(config.missing_stops_url, "http://localhost:8080/missing.json");
        assert_eq!(config.rail_platforms_url, "http://localhost:8080/rail.json");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_with_timeout() {
        let config = ReferenceClientConfig::new("a", "b").with_timeout_secs(5);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn client_builds_from_config() {
        assert!(ReferenceClient::new(ReferenceClientConfig::new("a", "b")).is_ok());
    }
}
