//! Reference datasets: fallback stake positions and railway station metadata.
//!
//! Both are fetched once per run, before any group is consolidated, and
//! shared read-only afterwards. A failed fetch is fatal.

mod client;
mod data;
mod error;
mod provider;

pub use client::{ReferenceClient, ReferenceClientConfig};
pub use data::{ReferenceData, StationMeta, platform_number};
pub use error::ReferenceError;
pub use provider::ReferenceProvider;
