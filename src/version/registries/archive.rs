//! Tor package archive client for fetching the torbrowser release listing

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::{DEFAULT_ARCHIVE_URL, FETCH_TIMEOUT_MS};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;

const USER_AGENT: &str = concat!("tor-bundle-resolver/", env!("CARGO_PKG_VERSION"));

/// Tor package archive client
pub struct TorArchiveRegistry {
    client: Client,
    base_url: String,
}

impl TorArchiveRegistry {
    /// Creates a client for the listing at `base_url`; requests taking longer than `timeout`
    /// fail with a network error.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Client for the public archive with the default timeout
    pub fn with_defaults() -> Result<Self, RegistryError> {
        Self::new(
            DEFAULT_ARCHIVE_URL,
            Duration::from_millis(FETCH_TIMEOUT_MS),
        )
    }
}

#[async_trait]
impl Registry for TorArchiveRegistry {
    fn source(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch_listing(&self) -> Result<String, RegistryError> {
        debug!("Fetching archive listing: {}", self.base_url);

        let response = self.client.get(&self.base_url).send().await?;

        if !response.status().is_success() {
            return Err(RegistryError::InvalidResponse(format!(
                "archive returned status {}",
                response.status()
            )));
        }

        let body = response.text().await?;

        debug!("Fetched {} bytes from {}", body.len(), self.base_url);

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn registry_for(url: String) -> TorArchiveRegistry {
        TorArchiveRegistry::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn with_defaults_targets_public_archive() {
        let registry = TorArchiveRegistry::with_defaults().unwrap();
        assert_eq!(registry.source(), DEFAULT_ARCHIVE_URL);
    }

    #[tokio::test]
    async fn fetch_listing_returns_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/tor-package-archive/torbrowser/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(r#"<a href="12.5/">12.5/</a>        2023-06-21 08:40    -"#)
            .create_async()
            .await;

        let registry = registry_for(format!("{}/tor-package-archive/torbrowser/", server.url()));
        let body = registry.fetch_listing().await.unwrap();

        mock.assert_async().await;
        assert!(body.contains("12.5/</a>"));
    }

    #[tokio::test]
    async fn fetch_listing_sends_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", USER_AGENT)
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let registry = registry_for(format!("{}/", server.url()));
        registry.fetch_listing().await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_listing_returns_invalid_response_for_error_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(503)
            .create_async()
            .await;

        let registry = registry_for(format!("{}/", server.url()));
        let result = registry.fetch_listing().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn fetch_listing_handles_network_error() {
        // Use an invalid URL to trigger a network error
        let registry = registry_for("http://invalid.localhost.test:99999".to_string());
        let result = registry.fetch_listing().await;

        assert!(matches!(result, Err(RegistryError::Network(_))));
    }

    #[tokio::test]
    async fn fetch_listing_times_out_on_silent_server() {
        // Accepts connections but never answers
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let registry =
            TorArchiveRegistry::new(format!("http://{addr}/"), Duration::from_millis(100)).unwrap();
        let result = registry.fetch_listing().await;

        match result {
            Err(RegistryError::Network(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
