//! Badge and README rendering.
//!
//! - [`Badge`]: one Markdown image pointing at a static badge service
//! - [`ReadmeDocument`]: badges grouped under fixed [`Section`]s with a timestamp

mod badge;
mod readme;

pub use badge::{Badge, EMPTY_PLACEHOLDER, FAILED_COLOR, FAILED_PLACEHOLDER, SHIELDS_STATIC_URL};
pub use readme::{ReadmeDocument, Section, NO_DATA_LINE, TIMESTAMP_FORMAT};
