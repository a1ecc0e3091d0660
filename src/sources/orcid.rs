//! ORCID public API source.
//!
//! Uses the v3.0 read-only endpoints, which need no authentication:
//!
//! - `GET /v3.0/{id}/person` for the biography
//! - `GET /v3.0/{id}/peer-reviews` for review records

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use crate::models::{OrcidPerson, PeerReviews};
use crate::sources::{Source, SourceError};
use crate::utils::{send_checked, validate_orcid_id, HttpClient};

const ORCID_API_VERSION: &str = "v3.0";

/// ORCID public API source
#[derive(Debug, Clone)]
pub struct OrcidSource {
    client: HttpClient,
    api_base: String,
}

impl OrcidSource {
    /// `api_base` is the host part, e.g. `https://pub.orcid.org`
    pub fn new(client: HttpClient, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, orcid_id: &str, resource: &str) -> Result<String, SourceError> {
        let id = validate_orcid_id(orcid_id)
            .map_err(|e| SourceError::InvalidRequest(e.to_string()))?;
        Ok(format!(
            "{}/{}/{}/{}",
            self.api_base, ORCID_API_VERSION, id, resource
        ))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        tracing::debug!("GET {}", url);

        let request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        let response = send_checked(request, self.name()).await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Source for OrcidSource {
    fn id(&self) -> &str {
        "orcid"
    }

    fn name(&self) -> &str {
        "ORCID"
    }

    async fn biography(&self, orcid_id: &str) -> Result<Option<String>, SourceError> {
        let url = self.endpoint(orcid_id, "person")?;
        let person: OrcidPerson = self.get_json(&url).await?;
        Ok(person.biography_text())
    }

    async fn peer_reviews(&self, orcid_id: &str) -> Result<PeerReviews, SourceError> {
        let url = self.endpoint(orcid_id, "peer-reviews")?;
        self.get_json(&url).await
    }

    async fn publications(&self, orcid_id: &str) -> Result<BTreeMap<String, u64>, SourceError> {
        // Publication counts are not collected yet; the snapshot stays an empty object.
        tracing::debug!("Publication data for {} is not collected", orcid_id);
        Ok(BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::total_reviews;

    const ORCID_ID: &str = "0000-0002-1825-0097";

    fn source(server: &mockito::ServerGuard) -> OrcidSource {
        OrcidSource::new(HttpClient::new().unwrap(), server.url())
    }

    #[test]
    fn test_endpoint_urls() {
        let source = OrcidSource::new(HttpClient::new().unwrap(), "https://pub.orcid.org/");
        assert_eq!(
            source.endpoint(ORCID_ID, "person").unwrap(),
            "https://pub.orcid.org/v3.0/0000-0002-1825-0097/person"
        );
        assert!(matches!(
            source.endpoint("not-an-id", "person"),
            Err(SourceError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_biography() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v3.0/0000-0002-1825-0097/person")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": null, "biography": {"content": "Works on smart grids."}}"#)
            .create_async()
            .await;

        let bio = source(&server).biography(ORCID_ID).await.unwrap();
        assert_eq!(bio.as_deref(), Some("Works on smart grids."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_biography_absent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.0/0000-0002-1825-0097/person")
            .with_status(200)
            .with_body(r#"{"biography": null}"#)
            .create_async()
            .await;

        let bio = source(&server).biography(ORCID_ID).await.unwrap();
        assert_eq!(bio, None);
    }

    #[tokio::test]
    async fn test_biography_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.0/0000-0002-1825-0097/person")
            .with_status(404)
            .create_async()
            .await;

        let result = source(&server).biography(ORCID_ID).await;
        assert!(matches!(result, Err(SourceError::Api(_))));
    }

    #[tokio::test]
    async fn test_peer_reviews() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.0/0000-0002-1825-0097/peer-reviews")
            .with_status(200)
            .with_body(
                r#"{"group": [
                    {"peer-review-group": [{"peer-review-summary": [
                        {"review-group-id": "issn:1949-3037"},
                        {"review-group-id": "issn:1949-3037"}
                    ]}]},
                    {"peer-review-group": [{"peer-review-summary": [
                        {"review-group-id": "issn:1234-5678"}
                    ]}]}
                ]}"#,
            )
            .create_async()
            .await;

        let reviews = source(&server).peer_reviews(ORCID_ID).await.unwrap();
        assert_eq!(total_reviews(&reviews), 3);
    }

    #[tokio::test]
    async fn test_peer_reviews_malformed_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v3.0/0000-0002-1825-0097/peer-reviews")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = source(&server).peer_reviews(ORCID_ID).await;
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_publications_always_empty() {
        let source = OrcidSource::new(HttpClient::new().unwrap(), "https://pub.orcid.org");
        let publications = source.publications(ORCID_ID).await.unwrap();
        assert!(publications.is_empty());
    }
}
