//! # Scholar Badges
//!
//! Collects researcher metrics from Google Scholar, ORCID and ResearchGate and
//! publishes them as Markdown badges in a README plus JSON snapshots.
//!
//! ## Architecture
//!
//! - [`sources`]: one [`Source`] per remote service; fetch failures become [`models::Fetched::Failed`]
//! - [`models`]: fetched values and ORCID payloads
//! - [`utils`]: HTTP client, peer-review normalization, identifier validation
//! - [`render`]: badge URLs and README assembly
//! - [`output`]: JSON/text writers
//! - [`pipeline`]: runs fetch, normalize, render and write in order
//! - [`config`]: TOML/env configuration and the journal lookup table

pub mod config;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use config::{Config, JournalTable};
pub use pipeline::{Pipeline, RunReport};
pub use sources::{Source, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
