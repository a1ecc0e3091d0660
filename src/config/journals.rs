//! ISSN to journal name lookup table.
//!
//! The table is a flat JSON object read once at startup:
//!
//! ```json
//! {
//!   "issn:1949-3037": "IEEE Transactions on Sustainable Energy",
//!   "issn:1949-3061": "IEEE Transactions on Smart Grid"
//! }
//! ```
//!
//! Keys are ORCID `review-group-id` values, so they keep the `issn:` prefix.

use std::collections::HashMap;
use std::path::Path;

use super::ConfigError;

const BUILTIN_JOURNALS: &[(&str, &str)] = &[
    ("issn:1949-3037", "IEEE Transactions on Sustainable Energy"),
    ("issn:1949-3061", "IEEE Transactions on Smart Grid"),
    ("issn:1937-4208", "IEEE Transactions on Power Delivery"),
    ("issn:1558-0679", "IEEE Transactions on Power Systems"),
    ("issn:2332-7707", "IEEE Power and Energy Technology Systems Journal"),
    ("issn:2367-0983", "Protection and Control of Modern Power Systems"),
    ("issn:2634-1581", "Energy Conversion and Economics"),
];

/// Read-only mapping from ISSN key to display name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalTable {
    entries: HashMap<String, String>,
}

impl JournalTable {
    /// The table shipped with the binary
    pub fn builtin() -> Self {
        BUILTIN_JOURNALS.iter().copied().collect()
    }

    /// Load a table from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Journals {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let entries: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|e| ConfigError::Journals {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            "Loaded {} journals from {}",
            entries.len(),
            path.display()
        );

        Ok(Self { entries })
    }

    /// Load from `path` if it exists, otherwise fall back to [`JournalTable::builtin`].
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                tracing::warn!(
                    "Journal table {} not found, using built-in table",
                    p.display()
                );
                Ok(Self::builtin())
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Display name for an ISSN key
    pub fn lookup(&self, issn: &str) -> Option<&str> {
        self.entries.get(issn).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JournalTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
