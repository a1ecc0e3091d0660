//! Remote metric sources.
//!
//! Each profile service implements the [`Source`] trait. The trait has one
//! method per kind of metric; a source overrides only the ones it can answer
//! and the rest return [`SourceError::NotImplemented`].
//!
//! | Source                 | Methods                                     |
//! |------------------------|---------------------------------------------|
//! | [`GoogleScholarSource`]| `scholar_metrics`                           |
//! | [`OrcidSource`]        | `biography`, `peer_reviews`, `publications` |
//! | [`ResearchGateSource`] | `profile_stats`                             |
//!
//! Sources return `Result`s. The pipeline wraps every call in
//! [`fetch_metric`], which logs failures and converts them into
//! [`Fetched::Failed`] so one broken source never stops the run.

mod google_scholar;
mod orcid;
mod researchgate;

pub mod mock;

pub use google_scholar::GoogleScholarSource;
pub use mock::MockSource;
pub use orcid::OrcidSource;
pub use researchgate::ResearchGateSource;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::future::Future;

use crate::models::{Fetched, PeerReviews, ScholarMetrics};

/// Interface shared by all metric sources.
///
/// Identifiers (profile URL or ORCID iD) are passed per call so a source can
/// be reused for several profiles.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this source (e.g. "orcid")
    fn id(&self) -> &str;

    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Citation statistics of a Google Scholar profile
    async fn scholar_metrics(&self, _profile_url: &str) -> Result<ScholarMetrics, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Biography text; `Ok(None)` when the profile has none
    async fn biography(&self, _orcid_id: &str) -> Result<Option<String>, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Raw peer-review records
    async fn peer_reviews(&self, _orcid_id: &str) -> Result<PeerReviews, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Publication counts keyed by category
    async fn publications(&self, _orcid_id: &str) -> Result<BTreeMap<String, u64>, SourceError> {
        Err(SourceError::NotImplemented)
    }

    /// Named profile statistics (e.g. "Citations" -> "1,234")
    async fn profile_stats(
        &self,
        _profile_url: &str,
    ) -> Result<BTreeMap<String, String>, SourceError> {
        Err(SourceError::NotImplemented)
    }
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested operation is not implemented for this source
    #[error("Operation not implemented for this source")]
    NotImplemented,

    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response from the remote service
    #[error("API error: {0}")]
    Api(String),

    /// Parsing error (JSON, HTML, selectors)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The page parsed but the expected markup was not there
    #[error("Missing element: {0}")]
    MissingElement(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(format!("JSON: {}", err))
    }
}

/// Await a source call and fold its result into a [`Fetched`].
///
/// `Ok(Some(_))` is a value, `Ok(None)` is empty and any error is logged and
/// kept as [`Fetched::Failed`].
pub async fn fetch_metric<T, F>(source: &str, metric: &str, fetch: F) -> Fetched<T>
where
    F: Future<Output = Result<Option<T>, SourceError>>,
{
    match fetch.await {
        Ok(Some(value)) => {
            tracing::debug!(source, metric, "Fetched metric");
            Fetched::Value(value)
        }
        Ok(None) => {
            tracing::info!(source, metric, "Source returned no data");
            Fetched::Empty
        }
        Err(e) => {
            tracing::warn!(source, metric, error = %e, "Fetch failed");
            Fetched::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_metric_outcomes() {
        let value = fetch_metric("test", "value", async { Ok(Some(3)) }).await;
        assert_eq!(value, Fetched::Value(3));

        let empty: Fetched<u32> = fetch_metric("test", "empty", async { Ok(None) }).await;
        assert_eq!(empty, Fetched::Empty);

        let failed: Fetched<u32> = fetch_metric("test", "failed", async {
            Err(SourceError::Api("status 503".to_string()))
        })
        .await;
        assert_eq!(failed.error(), Some("API error: status 503"));
    }

    #[tokio::test]
    async fn test_default_methods_not_implemented() {
        let source = MockSource::new();
        let result = source.scholar_metrics("https://example.com").await;
        assert!(matches!(result, Err(SourceError::NotImplemented)));
    }
}
