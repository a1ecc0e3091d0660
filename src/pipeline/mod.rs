//! The collection pipeline.
//!
//! One run fetches every metric in turn, normalizes peer reviews, renders
//! badges into the README and writes the JSON snapshots. Fetch failures are
//! recorded in the [`RunReport`]; only configuration and write errors abort.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, ConfigError, JournalTable};
use crate::models::{FetchStatus, Fetched, PeerReviews, ScholarMetrics, ScholarSnapshot};
use crate::output::{
    write_json, OutputError, PUBLICATION_SNAPSHOT, RESEARCHGATE_SNAPSHOT, REVIEW_SNAPSHOT,
    SCHOLAR_SNAPSHOT,
};
use crate::render::{Badge, ReadmeDocument, Section, FAILED_COLOR, FAILED_PLACEHOLDER};
use crate::sources::{
    fetch_metric, GoogleScholarSource, OrcidSource, ResearchGateSource, Source, SourceError,
};
use crate::utils::{normalize_reviews, total_reviews, HttpClient, UNKNOWN_JOURNAL};

const SCHOLAR_COLOR: &str = "blue";
const ORCID_COLOR: &str = "a6ce39";
const REVIEW_COLOR: &str = "green";
const RESEARCHGATE_COLOR: &str = "00ccbb";

/// Everything fetched in one run
#[derive(Debug, Clone)]
pub struct CollectedMetrics {
    pub scholar: Fetched<ScholarMetrics>,
    pub biography: Fetched<String>,
    pub reviews: Fetched<PeerReviews>,
    pub publications: Fetched<BTreeMap<String, u64>>,
    pub researchgate: Fetched<BTreeMap<String, String>>,
}

impl CollectedMetrics {
    /// Per-metric status, in fetch order
    pub fn outcomes(&self) -> Vec<SourceOutcome> {
        vec![
            SourceOutcome::new("scholar_metrics", &self.scholar),
            SourceOutcome::new("biography", &self.biography),
            SourceOutcome::new("peer_reviews", &self.reviews),
            SourceOutcome::new("publications", &self.publications),
            SourceOutcome::new("researchgate_stats", &self.researchgate),
        ]
    }
}

/// Status of one fetched metric
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutcome {
    pub metric: &'static str,
    pub status: FetchStatus,
    pub error: Option<String>,
}

impl SourceOutcome {
    fn new<T>(metric: &'static str, fetched: &Fetched<T>) -> Self {
        Self {
            metric,
            status: fetched.status(),
            error: fetched.error().map(str::to_string),
        }
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcomes: Vec<SourceOutcome>,
    pub written: Vec<PathBuf>,
}

impl RunReport {
    /// Number of metrics whose fetch failed
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == FetchStatus::Failed)
            .count()
    }
}

/// Pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to set up source: {0}")]
    Source(#[from] SourceError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Metrics pipeline bound to one configuration
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    journals: JournalTable,
    scholar: Arc<dyn Source>,
    orcid: Arc<dyn Source>,
    researchgate: Option<Arc<dyn Source>>,
}

impl Pipeline {
    /// Build the real sources and load the journal table
    pub fn from_config(config: Config) -> Result<Self, PipelineError> {
        let client = HttpClient::with_timeout(Duration::from_secs(config.http.timeout_seconds))?;
        let journals = JournalTable::load_or_builtin(config.output.journals_file.as_deref())?;
        if journals.is_empty() {
            tracing::warn!("Journal table is empty, every review counts as {}", UNKNOWN_JOURNAL);
        } else {
            tracing::info!("Journal table has {} entries", journals.len());
        }

        let user_agent = config.http.browser_user_agent.clone();
        let scholar: Arc<dyn Source> =
            Arc::new(GoogleScholarSource::new(client.clone(), user_agent.clone()));
        let orcid: Arc<dyn Source> = Arc::new(OrcidSource::new(
            client.clone(),
            config.endpoints.orcid_api.clone(),
        ));

        let researchgate: Option<Arc<dyn Source>> = match &config.profiles.researchgate_url {
            Some(_) => Some(Arc::new(ResearchGateSource::new(
                client,
                user_agent,
                &config.researchgate,
            )?)),
            None => None,
        };

        Ok(Self::with_sources(config, journals, scholar, orcid, researchgate))
    }

    /// Build a pipeline around existing sources
    pub fn with_sources(
        config: Config,
        journals: JournalTable,
        scholar: Arc<dyn Source>,
        orcid: Arc<dyn Source>,
        researchgate: Option<Arc<dyn Source>>,
    ) -> Self {
        Self {
            config,
            journals,
            scholar,
            orcid,
            researchgate,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch every metric, one request at a time
    pub async fn collect(&self) -> CollectedMetrics {
        let profiles = &self.config.profiles;
        let orcid_id = profiles.orcid_id.as_str();

        let scholar = fetch_metric(self.scholar.id(), "scholar_metrics", async {
            self.scholar.scholar_metrics(&profiles.scholar_url).await.map(Some)
        })
        .await;

        let biography = fetch_metric(self.orcid.id(), "biography", async {
            self.orcid.biography(orcid_id).await
        })
        .await;

        let reviews = fetch_metric(self.orcid.id(), "peer_reviews", async {
            self.orcid.peer_reviews(orcid_id).await.map(Some)
        })
        .await;

        let publications = fetch_metric(self.orcid.id(), "publications", async {
            self.orcid.publications(orcid_id).await.map(Some)
        })
        .await;

        let researchgate = match (&self.researchgate, &profiles.researchgate_url) {
            (Some(source), Some(url)) => {
                fetch_metric(source.id(), "profile_stats", async {
                    source.profile_stats(url).await.map(Some)
                })
                .await
            }
            _ => {
                tracing::info!("No ResearchGate profile configured, skipping");
                Fetched::Empty
            }
        };

        CollectedMetrics {
            scholar,
            biography,
            reviews,
            publications,
            researchgate,
        }
    }

    /// Journal name -> review count; empty when reviews are unavailable
    pub fn review_counts(&self, metrics: &CollectedMetrics) -> BTreeMap<String, u64> {
        metrics
            .reviews
            .value()
            .map(|r| normalize_reviews(r, &self.journals))
            .unwrap_or_default()
    }

    fn badge(&self, label: impl Into<String>, value: impl Into<String>, color: &str) -> Badge {
        Badge::new(label, value, color).service(self.config.endpoints.badge_service.as_str())
    }

    fn metric_badge<T: std::fmt::Display>(
        &self,
        label: &str,
        metric: &Fetched<T>,
        color: &str,
    ) -> Badge {
        Badge::for_metric(label, metric, color).service(self.config.endpoints.badge_service.as_str())
    }

    fn failed_badge(&self, label: &str) -> Badge {
        self.badge(label, FAILED_PLACEHOLDER, FAILED_COLOR)
    }

    /// Assemble the README from collected metrics
    pub fn build_readme(&self, metrics: &CollectedMetrics, now: DateTime<Utc>) -> ReadmeDocument {
        let profiles = &self.config.profiles;
        let mut doc = ReadmeDocument::new(self.config.output.title.as_str(), now);

        // Google Scholar
        let citations = metrics.scholar.as_ref().map(|m| m.citations.clone());
        doc.push_badge(
            Section::GoogleScholar,
            self.metric_badge("Citations", &citations, SCHOLAR_COLOR)
                .logo("googlescholar")
                .link(profiles.scholar_url.as_str()),
        );
        if let Some(m) = metrics.scholar.value() {
            for (label, value) in [("h-index", &m.h_index), ("i10-index", &m.i10_index)] {
                if let Some(value) = value {
                    doc.push_badge(
                        Section::GoogleScholar,
                        self.badge(label, value.as_str(), SCHOLAR_COLOR)
                            .logo("googlescholar"),
                    );
                }
            }
        }

        // ORCID
        if let Some(bio) = metrics.biography.value() {
            doc.set_biography(bio.as_str());
        }
        let total = metrics.reviews.as_ref().map(total_reviews);
        let orcid_link = format!("https://orcid.org/{}", profiles.orcid_id);
        doc.push_badge(
            Section::Orcid,
            self.metric_badge("Peer Reviews", &total, ORCID_COLOR)
                .logo("orcid")
                .link(orcid_link.as_str()),
        );
        if let Some(publications) = metrics.publications.value() {
            for (kind, count) in publications {
                doc.push_badge(
                    Section::Orcid,
                    self.badge(kind.as_str(), count.to_string(), ORCID_COLOR)
                        .logo("orcid"),
                );
            }
        }

        // Peer reviews per journal
        if metrics.reviews.is_failed() {
            doc.push_badge(Section::PeerReviews, self.failed_badge("Peer Reviews"));
        }
        for (journal, count) in self.review_counts(metrics) {
            doc.push_badge(
                Section::PeerReviews,
                self.badge(journal, count.to_string(), REVIEW_COLOR),
            );
        }

        // ResearchGate
        match &metrics.researchgate {
            Fetched::Value(stats) => {
                for (label, value) in stats {
                    let mut badge = self
                        .badge(label.as_str(), value.as_str(), RESEARCHGATE_COLOR)
                        .logo("researchgate");
                    if let Some(url) = &profiles.researchgate_url {
                        badge = badge.link(url.as_str());
                    }
                    doc.push_badge(Section::ResearchGate, badge);
                }
            }
            Fetched::Failed(_) => {
                doc.push_badge(
                    Section::ResearchGate,
                    self.failed_badge("ResearchGate").logo("researchgate"),
                );
            }
            Fetched::Empty => {}
        }

        doc
    }

    /// Write the JSON snapshots; returns the written paths
    pub fn write_snapshots(&self, metrics: &CollectedMetrics) -> Result<Vec<PathBuf>, OutputError> {
        let dir = &self.config.output.directory;

        let snapshot = ScholarSnapshot {
            gscitations: metrics.scholar.as_ref().map(|m| m.citations.clone()),
            orcidtotalreview: metrics.reviews.as_ref().map(total_reviews),
            orcidbio: metrics.biography.clone(),
        };
        let reviews = self.review_counts(metrics);
        let publications = metrics.publications.value().cloned().unwrap_or_default();
        let researchgate = metrics.researchgate.value().cloned().unwrap_or_default();

        let scholar_path = dir.join(SCHOLAR_SNAPSHOT);
        let review_path = dir.join(REVIEW_SNAPSHOT);
        let publication_path = dir.join(PUBLICATION_SNAPSHOT);
        let researchgate_path = dir.join(RESEARCHGATE_SNAPSHOT);

        write_json(&snapshot, &scholar_path)?;
        write_json(&reviews, &review_path)?;
        write_json(&publications, &publication_path)?;
        write_json(&researchgate, &researchgate_path)?;

        Ok(vec![
            scholar_path,
            review_path,
            publication_path,
            researchgate_path,
        ])
    }

    /// Run the whole pipeline with the current time
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        self.run_at(Utc::now()).await
    }

    /// Run the whole pipeline, stamping the README with `now`
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<RunReport, PipelineError> {
        let metrics = self.collect().await;
        let mut written = self.write_snapshots(&metrics)?;

        if self.config.output.write_readme {
            let path = self.config.output.readme_path();
            self.build_readme(&metrics, now).write(&path)?;
            written.push(path);
        }

        let report = RunReport {
            outcomes: metrics.outcomes(),
            written,
        };

        for outcome in &report.outcomes {
            match &outcome.error {
                Some(err) => tracing::warn!(metric = outcome.metric, "failed: {}", err),
                None => tracing::info!(metric = outcome.metric, status = %outcome.status, "done"),
            }
        }

        Ok(report)
    }
}
