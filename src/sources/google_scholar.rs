//! Google Scholar profile scraper.
//!
//! Google Scholar has no public API. The citation table in the profile
//! sidebar is read from the HTML page: six `td.gsc_rsb_std` cells holding
//! citations, h-index and i10-index, each as "all" and "since <year>".

use async_trait::async_trait;
use scraper::{Html, Selector};

use crate::models::ScholarMetrics;
use crate::sources::{Source, SourceError};
use crate::utils::{send_checked, HttpClient};

const STATS_CELL_SELECTOR: &str = "td.gsc_rsb_std";

/// Google Scholar profile source
#[derive(Debug, Clone)]
pub struct GoogleScholarSource {
    client: HttpClient,
    user_agent: String,
}

impl GoogleScholarSource {
    pub fn new(client: HttpClient, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    /// Extract the statistics table from a profile page
    pub fn parse_metrics(html: &str) -> Result<ScholarMetrics, SourceError> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(STATS_CELL_SELECTOR)
            .map_err(|e| SourceError::Parse(format!("Invalid selector: {}", e)))?;

        let cells: Vec<String> = document
            .select(&selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();

        let citations = cells
            .first()
            .filter(|c| !c.is_empty())
            .cloned()
            .ok_or_else(|| {
                SourceError::MissingElement(format!(
                    "no '{}' cell on profile page",
                    STATS_CELL_SELECTOR
                ))
            })?;

        let cell = |i: usize| cells.get(i).filter(|c| !c.is_empty()).cloned();

        Ok(ScholarMetrics {
            citations,
            citations_recent: cell(1),
            h_index: cell(2),
            i10_index: cell(4),
        })
    }
}

#[async_trait]
impl Source for GoogleScholarSource {
    fn id(&self) -> &str {
        "google_scholar"
    }

    fn name(&self) -> &str {
        "Google Scholar"
    }

    async fn scholar_metrics(&self, profile_url: &str) -> Result<ScholarMetrics, SourceError> {
        tracing::debug!("Fetching Google Scholar profile {}", profile_url);

        let request = self
            .client
            .get(profile_url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str());
        let response = send_checked(request, self.name()).await?;

        let html = response.text().await?;

        Self::parse_metrics(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_PAGE: &str = r#"
    <html><body>
      <table id="gsc_rsb_st">
        <thead><tr><th></th><th>All</th><th>Since 2021</th></tr></thead>
        <tbody>
          <tr><td class="gsc_rsb_sc1">Citations</td><td class="gsc_rsb_std">1234</td><td class="gsc_rsb_std">987</td></tr>
          <tr><td class="gsc_rsb_sc1">h-index</td><td class="gsc_rsb_std">18</td><td class="gsc_rsb_std">15</td></tr>
          <tr><td class="gsc_rsb_sc1">i10-index</td><td class="gsc_rsb_std">25</td><td class="gsc_rsb_std">20</td></tr>
        </tbody>
      </table>
    </body></html>
    "#;

    #[test]
    fn test_parse_full_table() {
        let metrics = GoogleScholarSource::parse_metrics(PROFILE_PAGE).unwrap();
        assert_eq!(metrics.citations, "1234");
        assert_eq!(metrics.citations_recent.as_deref(), Some("987"));
        assert_eq!(metrics.h_index.as_deref(), Some("18"));
        assert_eq!(metrics.i10_index.as_deref(), Some("25"));
    }

    #[test]
    fn test_parse_citations_only() {
        let html = r#"<table><tr><td class="gsc_rsb_std"> 42 </td></tr></table>"#;
        let metrics = GoogleScholarSource::parse_metrics(html).unwrap();
        assert_eq!(metrics, ScholarMetrics::new("42"));
    }

    #[test]
    fn test_parse_missing_table() {
        let result = GoogleScholarSource::parse_metrics("<html><body>Please show you're not a robot</body></html>");
        assert!(matches!(result, Err(SourceError::MissingElement(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let source = GoogleScholarSource::new(HttpClient::new().unwrap(), "test-browser");

        let result = source
            .scholar_metrics(&format!("http://{}/citations", addr))
            .await;
        assert!(matches!(result, Err(SourceError::Network(_))));
    }

    #[tokio::test]
    async fn test_fetch_from_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/citations")
            .match_header("user-agent", "test-browser")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(PROFILE_PAGE)
            .create_async()
            .await;

        let source = GoogleScholarSource::new(HttpClient::new().unwrap(), "test-browser");
        let metrics = source
            .scholar_metrics(&format!("{}/citations", server.url()))
            .await
            .unwrap();

        assert_eq!(metrics.citations, "1234");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/citations")
            .with_status(429)
            .create_async()
            .await;

        let source = GoogleScholarSource::new(HttpClient::new().unwrap(), "test-browser");
        let result = source
            .scholar_metrics(&format!("{}/citations", server.url()))
            .await;

        assert!(matches!(result, Err(SourceError::Api(_))));
    }
}
