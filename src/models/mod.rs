//! Data models for fetched metrics and remote payloads.

mod metric;
mod orcid;

pub use metric::{FetchStatus, Fetched, ScholarMetrics, ScholarSnapshot};
pub use orcid::{
    OrcidBiography, OrcidPerson, PeerReviewGroup, PeerReviewSummary, PeerReviews, ReviewGroup,
};
