//! ORCID v3.0 public API payloads.
//!
//! Only the fields the pipeline reads are modelled. ORCID returns `null` for
//! empty collections in places, so every list is an `Option<Vec<_>>` and is
//! read through the iterator helpers.

use serde::{Deserialize, Serialize};

/// `GET /v3.0/{id}/person`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrcidPerson {
    #[serde(default)]
    pub biography: Option<OrcidBiography>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrcidBiography {
    #[serde(default)]
    pub content: Option<String>,
}

impl OrcidPerson {
    /// Biography text, or `None` when missing or blank.
    pub fn biography_text(&self) -> Option<String> {
        self.biography
            .as_ref()
            .and_then(|b| b.content.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// `GET /v3.0/{id}/peer-reviews`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerReviews {
    #[serde(default)]
    pub group: Option<Vec<ReviewGroup>>,
}

/// Reviews grouped by journal (one group per `review-group-id`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewGroup {
    #[serde(rename = "peer-review-group", default)]
    pub peer_review_group: Option<Vec<PeerReviewGroup>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerReviewGroup {
    #[serde(rename = "peer-review-summary", default)]
    pub peer_review_summary: Option<Vec<PeerReviewSummary>>,
}

/// A single review record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerReviewSummary {
    /// Journal key, e.g. `issn:1949-3037`
    #[serde(rename = "review-group-id", default)]
    pub review_group_id: Option<String>,
}

impl PeerReviews {
    /// Every review summary across all groups.
    pub fn summaries(&self) -> impl Iterator<Item = &PeerReviewSummary> {
        self.group
            .iter()
            .flatten()
            .flat_map(|g| g.peer_review_group.iter().flatten())
            .flat_map(|pg| pg.peer_review_summary.iter().flatten())
    }

    /// Build a response from `(review-group-id, count)` pairs; one group per pair.
    pub fn from_counts<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let group = counts
            .into_iter()
            .map(|(id, n)| ReviewGroup {
                peer_review_group: Some(vec![PeerReviewGroup {
                    peer_review_summary: Some(
                        (0..n)
                            .map(|_| PeerReviewSummary {
                                review_group_id: Some(id.to_string()),
                            })
                            .collect(),
                    ),
                }]),
            })
            .collect();

        Self { group: Some(group) }
    }
}
