//! Peer-review normalization.
//!
//! Turns the nested ORCID peer-review structure into a flat
//! `journal name -> review count` mapping using a [`JournalTable`].

use std::collections::BTreeMap;

use crate::config::JournalTable;
use crate::models::PeerReviews;

/// Label used for reviews whose ISSN is missing or not in the journal table
pub const UNKNOWN_JOURNAL: &str = "Unknown Journal";

/// Count reviews per journal display name.
///
/// Every summary entry counts once, so the values always sum to
/// [`total_reviews`] for the same input.
pub fn normalize_reviews(reviews: &PeerReviews, journals: &JournalTable) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();

    for summary in reviews.summaries() {
        let name = summary
            .review_group_id
            .as_deref()
            .and_then(|issn| journals.lookup(issn))
            .unwrap_or(UNKNOWN_JOURNAL);

        *counts.entry(name.to_string()).or_insert(0) += 1;
    }

    tracing::debug!(
        journals = counts.len(),
        reviews = counts.values().sum::<u64>(),
        "Normalized peer reviews"
    );

    counts
}

/// Total number of review summaries across all groups.
pub fn total_reviews(reviews: &PeerReviews) -> u64 {
    reviews.summaries().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PeerReviewGroup, PeerReviewSummary, ReviewGroup};

    fn table() -> JournalTable {
        JournalTable::from_iter([("issn:1949-3037", "TSTE")])
    }

    #[test]
    fn test_normalize_mapped_and_unmapped() {
        let reviews = PeerReviews::from_counts([("issn:1949-3037", 2), ("issn:0000-0000", 1)]);

        let counts = normalize_reviews(&reviews, &table());

        let expected: BTreeMap<String, u64> = [
            ("TSTE".to_string(), 2),
            (UNKNOWN_JOURNAL.to_string(), 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(counts, expected);
    }

    #[test]
    fn test_missing_group_id_is_unknown() {
        let reviews = PeerReviews {
            group: Some(vec![ReviewGroup {
                peer_review_group: Some(vec![PeerReviewGroup {
                    peer_review_summary: Some(vec![PeerReviewSummary {
                        review_group_id: None,
                    }]),
                }]),
            }]),
        };

        let counts = normalize_reviews(&reviews, &table());
        assert_eq!(counts.get(UNKNOWN_JOURNAL), Some(&1));
    }

    #[test]
    fn test_unmapped_journals_merge_into_one_bucket() {
        let reviews = PeerReviews::from_counts([("issn:1111-1111", 2), ("issn:2222-2222", 3)]);

        let counts = normalize_reviews(&reviews, &table());
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(UNKNOWN_JOURNAL), Some(&5));
    }

    #[test]
    fn test_counts_sum_to_total() {
        let reviews = PeerReviews::from_counts([
            ("issn:1949-3037", 4),
            ("issn:1949-3061", 3),
            ("issn:9999-9999", 2),
            ("issn:1949-3037", 1),
        ]);

        let journals = JournalTable::builtin();
        let counts = normalize_reviews(&reviews, &journals);

        assert_eq!(total_reviews(&reviews), 10);
        assert_eq!(counts.values().sum::<u64>(), total_reviews(&reviews));
        assert_eq!(counts.get("IEEE Transactions on Sustainable Energy"), Some(&5));
    }

    #[test]
    fn test_empty_reviews() {
        let reviews = PeerReviews::default();
        assert!(normalize_reviews(&reviews, &table()).is_empty());
        assert_eq!(total_reviews(&reviews), 0);
    }
}
