//! HTTP client utilities.

use reqwest::{Client, RequestBuilder, Response};
use std::sync::Arc;
use std::time::Duration;

use crate::sources::SourceError;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shared HTTP client with sensible defaults
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<Client>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new HTTP client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Start a GET request
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.client.get(url)
    }
}

/// Send a request and reject transport failures and non-success statuses.
///
/// `source` names the remote service in error messages.
pub async fn send_checked(request: RequestBuilder, source: &str) -> Result<Response, SourceError> {
    let response = request
        .send()
        .await
        .map_err(|e| SourceError::Network(format!("Failed to reach {}: {}", source, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Api(format!(
            "{} returned status: {}",
            source, status
        )));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A local address with nothing listening on it
    fn closed_addr() -> std::net::SocketAddr {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let client = HttpClient::with_timeout(Duration::from_secs(5)).unwrap();
        let url = format!("http://{}/citations", closed_addr());

        let result = send_checked(client.get(&url), "Test").await;
        match result {
            Err(SourceError::Network(msg)) => assert!(msg.starts_with("Failed to reach Test")),
            other => panic!("expected network error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = HttpClient::new().unwrap();
        let url = format!("{}/missing", server.url());
        let result = send_checked(client.get(&url), "Test").await;
        assert!(matches!(result, Err(SourceError::Api(_))));
    }
}
