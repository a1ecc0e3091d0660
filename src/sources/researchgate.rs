//! ResearchGate profile scraper.
//!
//! ResearchGate has no public API and changes its markup often, so the
//! selectors for the statistics block come from configuration.

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

use crate::config::ResearchGateConfig;
use crate::sources::{Source, SourceError};
use crate::utils::{send_checked, HttpClient};

/// ResearchGate profile source
#[derive(Debug, Clone)]
pub struct ResearchGateSource {
    client: HttpClient,
    user_agent: String,
    item: Selector,
    label: Selector,
    value: Selector,
}

fn parse_selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css)
        .map_err(|e| SourceError::InvalidRequest(format!("Invalid selector '{}': {}", css, e)))
}

fn element_text(elem: &ElementRef) -> String {
    elem.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl ResearchGateSource {
    pub fn new(
        client: HttpClient,
        user_agent: impl Into<String>,
        selectors: &ResearchGateConfig,
    ) -> Result<Self, SourceError> {
        Ok(Self {
            client,
            user_agent: user_agent.into(),
            item: parse_selector(&selectors.item_selector)?,
            label: parse_selector(&selectors.label_selector)?,
            value: parse_selector(&selectors.value_selector)?,
        })
    }

    /// Extract `label -> value` pairs from a profile page
    pub fn parse_stats(&self, html: &str) -> Result<BTreeMap<String, String>, SourceError> {
        let document = Html::parse_document(html);
        let mut stats = BTreeMap::new();

        for item in document.select(&self.item) {
            let label = item.select(&self.label).next().map(|e| element_text(&e));
            let value = item.select(&self.value).next().map(|e| element_text(&e));

            if let (Some(label), Some(value)) = (label, value) {
                if !label.is_empty() && !value.is_empty() {
                    stats.insert(label, value);
                }
            }
        }

        if stats.is_empty() {
            return Err(SourceError::MissingElement(
                "no statistics found on ResearchGate profile".to_string(),
            ));
        }

        Ok(stats)
    }
}

#[async_trait]
impl Source for ResearchGateSource {
    fn id(&self) -> &str {
        "researchgate"
    }

    fn name(&self) -> &str {
        "ResearchGate"
    }

    async fn profile_stats(
        &self,
        profile_url: &str,
    ) -> Result<BTreeMap<String, String>, SourceError> {
        tracing::debug!("Fetching ResearchGate profile {}", profile_url);

        let request = self
            .client
            .get(profile_url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str());
        let response = send_checked(request, self.name()).await?;

        let html = response.text().await?;

        self.parse_stats(&html)
    }
}
