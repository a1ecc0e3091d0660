//! Markdown badges backed by a static badge image service.
//!
//! Rendering only builds a URL; no request is made. For a badge with label
//! `Citations`, value `1234`, color `blue` and logo `googlescholar`:
//!
//! ```text
//! ![Citations](https://img.shields.io/static/v1?label=Citations&message=1234&color=blue&logo=googlescholar)
//! ```

use std::fmt::Display;

use crate::models::Fetched;

/// shields.io static badge endpoint
pub const SHIELDS_STATIC_URL: &str = "https://img.shields.io/static/v1";

/// Value shown when a source answered without data
pub const EMPTY_PLACEHOLDER: &str = "none";

/// Value shown when a fetch failed
pub const FAILED_PLACEHOLDER: &str = "unavailable";

/// Color used for failed fetches
pub const FAILED_COLOR: &str = "lightgrey";

/// A single badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub value: String,
    pub color: String,
    pub logo: Option<String>,
    pub link: Option<String>,
    service: String,
}

impl Badge {
    pub fn new(label: impl Into<String>, value: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: color.into(),
            logo: None,
            link: None,
            service: SHIELDS_STATIC_URL.to_string(),
        }
    }

    /// Badge for a fetched metric, with placeholders for missing values.
    pub fn for_metric<T: Display>(
        label: impl Into<String>,
        metric: &Fetched<T>,
        color: impl Into<String>,
    ) -> Self {
        match metric {
            Fetched::Value(v) => Self::new(label, v.to_string(), color),
            Fetched::Empty => Self::new(label, EMPTY_PLACEHOLDER, color),
            Fetched::Failed(_) => Self::new(label, FAILED_PLACEHOLDER, FAILED_COLOR),
        }
    }

    /// Named logo shown on the badge (simple-icons slug)
    pub fn logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Target URL passed to the badge service
    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Use a different static badge endpoint
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Badge image URL
    pub fn url(&self) -> String {
        let mut url = format!(
            "{}?label={}&message={}&color={}",
            self.service,
            urlencoding::encode(&self.label),
            urlencoding::encode(&self.value),
            urlencoding::encode(&self.color),
        );

        if let Some(logo) = &self.logo {
            url.push_str("&logo=");
            url.push_str(&urlencoding::encode(logo));
        }

        if let Some(link) = &self.link {
            url.push_str("&link=");
            url.push_str(&urlencoding::encode(link));
        }

        url
    }

    /// Markdown image for this badge
    pub fn render(&self) -> String {
        let alt = self.label.replace('[', "\\[").replace(']', "\\]");
        format!("![{}]({})", alt, self.url())
    }
}

impl std::fmt::Display for Badge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
