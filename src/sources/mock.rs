//! Mock source for testing purposes.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::models::{PeerReviews, ScholarMetrics};
use crate::sources::{Source, SourceError};

/// A mock source that returns predefined responses.
///
/// Unset responses behave like an unsupported operation. A failing mock
/// returns a network error from every method.
#[derive(Debug, Default, Clone)]
pub struct MockSource {
    scholar: Option<ScholarMetrics>,
    biography: Option<Option<String>>,
    reviews: Option<PeerReviews>,
    stats: Option<BTreeMap<String, String>>,
    failure: Option<String>,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every call fails with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_scholar_metrics(mut self, metrics: ScholarMetrics) -> Self {
        self.scholar = Some(metrics);
        self
    }

    pub fn with_biography(mut self, biography: Option<&str>) -> Self {
        self.biography = Some(biography.map(str::to_string));
        self
    }

    pub fn with_peer_reviews(mut self, reviews: PeerReviews) -> Self {
        self.reviews = Some(reviews);
        self
    }

    pub fn with_stats<'a, I>(mut self, stats: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.stats = Some(
            stats
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    fn respond<T: Clone>(&self, value: &Option<T>) -> Result<T, SourceError> {
        if let Some(message) = &self.failure {
            return Err(SourceError::Network(message.clone()));
        }
        value.clone().ok_or(SourceError::NotImplemented)
    }
}

#[async_trait]
impl Source for MockSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn scholar_metrics(&self, _profile_url: &str) -> Result<ScholarMetrics, SourceError> {
        self.respond(&self.scholar)
    }

    async fn biography(&self, _orcid_id: &str) -> Result<Option<String>, SourceError> {
        self.respond(&self.biography)
    }

    async fn peer_reviews(&self, _orcid_id: &str) -> Result<PeerReviews, SourceError> {
        self.respond(&self.reviews)
    }

    async fn publications(&self, _orcid_id: &str) -> Result<BTreeMap<String, u64>, SourceError> {
        self.respond(&Some(BTreeMap::new()))
    }

    async fn profile_stats(
        &self,
        _profile_url: &str,
    ) -> Result<BTreeMap<String, String>, SourceError> {
        self.respond(&self.stats)
    }
}
