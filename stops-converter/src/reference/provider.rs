//! One-time, shared access to the reference datasets.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use super::client::ReferenceClient;
use super::data::ReferenceData;
use super::error::ReferenceError;

/// Loads the reference datasets on first use and keeps them for the
/// lifetime of the provider.
///
/// The cell is assigned at most once; later calls return the same
/// `Arc` without touching the network.
#[derive(Debug)]
pub struct ReferenceProvider {
    client: Option<ReferenceClient>,
    cell: OnceCell<Arc<ReferenceData>>,
}

impl ReferenceProvider {
    pub fn new(client: ReferenceClient) -> Self {
        Self {
            client: Some(client),
            cell: OnceCell::new(),
        }
    }

    /// A provider that never fetches and always serves `data`.
    pub fn preloaded(data: ReferenceData) -> Self {
        Self {
            client: None,
            cell: OnceCell::new_with(Some(Arc::new(data))),
        }
    }

    /// Get the datasets, fetching them if this is the first call.
    pub async fn get(&self) -> Result<Arc<ReferenceData>, ReferenceError> {
        self.cell
            .get_or_try_init(|| async {
                let data = match &self.client {
                    Some(client) => client.fetch_all().await?,
                    None => ReferenceData::default(),
                };
                info!(
                    fallback_positions = data.fallback_count(),
                    stations = data.station_count(),
                    "loaded reference datasets"
                );
                Ok::<_, ReferenceError>(Arc::new(data))
            })
            .await
            .cloned()
    }

    /// Whether the datasets are already loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::domain::Position;

    #[tokio::test]
    async fn preloaded_is_shared() {
        let mut missing = HashMap::new();
        missing.insert("123401".to_string(), Position::new(52.0, 21.0));
        let provider = ReferenceProvider::preloaded(ReferenceData::new(missing, HashMap::new()));

        assert!(provider.is_loaded());
        let first = provider.get().await.unwrap();
        let second = provider.get().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            first.fallback_position("123401"),
            Some(Position::new(52.0, 21.0))
        );
    }
}
