//! Reference dataset error types.

/// Errors that can occur while fetching the reference datasets.
///
/// Any of these aborts the run before consolidation starts.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint returned an error status
    #[error("reference endpoint {url} returned {status}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },

    /// Failed to parse response JSON
    #[error("JSON parse error in {dataset}: {message}")]
    Json {
        dataset: &'static str,
        message: String,
    },
}
