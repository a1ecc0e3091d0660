//! Utility modules supporting the metrics pipeline.
//!
//! - [`HttpClient`]: shared HTTP client with default timeouts
//! - [`send_checked`]: send a request and turn non-success statuses into errors
//! - [`normalize_reviews`]: count ORCID peer reviews per journal
//! - [`total_reviews`]: total number of peer reviews
//! - [`validate_url`], [`validate_orcid_id`]: profile identifier checks
//!
//! # Review normalization
//!
//! ```rust
//! use scholar_badges::config::JournalTable;
//! use scholar_badges::models::PeerReviews;
//! use scholar_badges::utils::normalize_reviews;
//!
//! let journals = JournalTable::from_iter([("issn:1949-3037", "TSTE")]);
//! let reviews = PeerReviews::from_counts([("issn:1949-3037", 2), ("issn:0000-0000", 1)]);
//!
//! let counts = normalize_reviews(&reviews, &journals);
//! assert_eq!(counts["TSTE"], 2);
//! assert_eq!(counts["Unknown Journal"], 1);
//! ```

mod http;
mod reviews;
mod validate;

pub use http::{send_checked, HttpClient, DEFAULT_TIMEOUT_SECS};
pub use reviews::{normalize_reviews, total_reviews, UNKNOWN_JOURNAL};
pub use validate::{validate_orcid_id, validate_url, ValidationError};
