//! Snapshot and document writers.
//!
//! Every write replaces the whole file in place. There is no temporary file
//! or rename, so a crash mid-write can leave a truncated file behind.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Scholar/ORCID scalar snapshot
pub const SCHOLAR_SNAPSHOT: &str = "data_scholar.json";
/// Journal name -> review count
pub const REVIEW_SNAPSHOT: &str = "data_review.json";
/// Publication counts
pub const PUBLICATION_SNAPSHOT: &str = "data_pub.json";
/// ResearchGate statistics
pub const RESEARCHGATE_SNAPSHOT: &str = "data_researchgate.json";

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn ensure_parent(path: &Path) -> Result<(), OutputError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| OutputError::Io {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Overwrite `path` with `text`, creating parent directories as needed
pub fn write_text(text: &str, path: &Path) -> Result<(), OutputError> {
    ensure_parent(path)?;
    fs::write(path, text).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

/// Overwrite `path` with `data` as pretty-printed JSON
pub fn write_json<T: Serialize + ?Sized>(data: &T, path: &Path) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(data).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    write_text(&json, path)
}
