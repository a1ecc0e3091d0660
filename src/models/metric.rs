//! Metric values produced by the fetchers.

use serde::{Deserialize, Serialize, Serializer};

/// Outcome of a single fetch.
///
/// Keeps "the source answered but had nothing" apart from "the source could
/// not be reached or parsed", so the renderer can choose a placeholder for
/// each case instead of writing a bare null.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    /// The source returned a usable value
    Value(T),
    /// The source answered but the value is absent
    Empty,
    /// The fetch failed; carries the error message
    Failed(String),
}

/// Coarse status of a [`Fetched`] value, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Ok,
    Empty,
    Failed,
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchStatus::Ok => write!(f, "ok"),
            FetchStatus::Empty => write!(f, "empty"),
            FetchStatus::Failed => write!(f, "failed"),
        }
    }
}

impl<T> Fetched<T> {
    /// Build from an optional value: `None` becomes [`Fetched::Empty`].
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Fetched::Value(v),
            None => Fetched::Empty,
        }
    }

    pub fn status(&self) -> FetchStatus {
        match self {
            Fetched::Value(_) => FetchStatus::Ok,
            Fetched::Empty => FetchStatus::Empty,
            Fetched::Failed(_) => FetchStatus::Failed,
        }
    }

    /// Borrow the value if present
    pub fn value(&self) -> Option<&T> {
        match self {
            Fetched::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Fetched::Failed(_))
    }

    /// Error message of a failed fetch
    pub fn error(&self) -> Option<&str> {
        match self {
            Fetched::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Map the contained value, keeping `Empty` and `Failed` as they are.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetched<U> {
        match self {
            Fetched::Value(v) => Fetched::Value(f(v)),
            Fetched::Empty => Fetched::Empty,
            Fetched::Failed(msg) => Fetched::Failed(msg),
        }
    }

    /// Borrowing variant of [`Fetched::map`].
    pub fn as_ref(&self) -> Fetched<&T> {
        match self {
            Fetched::Value(v) => Fetched::Value(v),
            Fetched::Empty => Fetched::Empty,
            Fetched::Failed(msg) => Fetched::Failed(msg.clone()),
        }
    }
}

// Snapshots only carry the value; status lives in the run report.
impl<T: Serialize> Serialize for Fetched<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Fetched::Value(v) => v.serialize(serializer),
            Fetched::Empty | Fetched::Failed(_) => serializer.serialize_none(),
        }
    }
}

/// Statistics table of a Google Scholar profile.
///
/// The profile sidebar lists six cells: citations, h-index and i10-index,
/// each for "all time" and "since" a recent year. Values are kept as text,
/// exactly as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScholarMetrics {
    /// Total citation count
    pub citations: String,

    /// Citations within the recent window
    #[serde(default)]
    pub citations_recent: Option<String>,

    /// All-time h-index
    #[serde(default)]
    pub h_index: Option<String>,

    /// All-time i10-index
    #[serde(default)]
    pub i10_index: Option<String>,
}

impl ScholarMetrics {
    pub fn new(citations: impl Into<String>) -> Self {
        Self {
            citations: citations.into(),
            citations_recent: None,
            h_index: None,
            i10_index: None,
        }
    }
}

/// Contents of `data_scholar.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScholarSnapshot {
    pub gscitations: Fetched<String>,
    pub orcidtotalreview: Fetched<u64>,
    pub orcidbio: Fetched<String>,
}
