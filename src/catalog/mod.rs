//! Book catalog providers.
//!
//! Each provider turns a [`SearchQuery`] into one HTTP GET and decodes the
//! JSON answer into [`BookSummary`] records.

pub mod google;
pub mod openlibrary;
pub mod query;
pub mod types;

use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Config, ProviderKind};

pub use google::GoogleBooks;
pub use openlibrary::OpenLibrary;
pub use query::{Field, SearchForm, SearchQuery};
pub use types::BookSummary;

/// Provider failure. Cloneable so it can travel inside UI messages.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Provider returned HTTP {0}")]
    Status(u16),
    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SearchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            SearchError::Status(status.as_u16())
        } else {
            SearchError::Request(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for SearchError {
    fn from(err: url::ParseError) -> Self {
        SearchError::InvalidUrl(err.to_string())
    }
}

#[async_trait]
pub trait BookProvider: Send + Sync {
    /// Run one search, returning at most `limit` books.
    async fn search(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<BookSummary>, SearchError>;

    /// Get the name of the provider
    fn name(&self) -> &'static str;
}

/// Build the HTTP client shared by providers and cover downloads.
pub fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("bookfinder/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        })
}

/// Build the provider selected in `config`.
pub fn provider(config: &Config, client: Client) -> Arc<dyn BookProvider> {
    match config.provider {
        ProviderKind::Google => Arc::new(GoogleBooks::new(client, &config.google_url)),
        ProviderKind::OpenLibrary => Arc::new(OpenLibrary::new(client, &config.openlibrary_url)),
    }
}

/// GET `url`, failing on non-success status, and return the body.
pub(crate) async fn fetch_bytes(client: &Client, url: url::Url) -> Result<Vec<u8>, SearchError> {
    tracing::debug!("GET {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Status(status.as_u16()));
    }

    Ok(response.bytes().await?.to_vec())
}

/// Download a cover thumbnail.
pub async fn fetch_cover(client: Client, url: String) -> Result<Vec<u8>, SearchError> {
    let url = url::Url::parse(&url)?;
    fetch_bytes(&client, url).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_provider_selection() {
        let client = Client::new();
        let mut config = Config::default();
        assert_eq!(provider(&config, client.clone()).name(), "Google Books");

        config.provider = ProviderKind::OpenLibrary;
        assert_eq!(provider(&config, client).name(), "OpenLibrary");
    }

    #[tokio::test]
    async fn test_fetch_cover() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cover.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .mount(&server)
            .await;

        let bytes = fetch_cover(Client::new(), format!("{}/cover.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_fetch_cover_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetch_cover(Client::new(), format!("{}/nope.jpg", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err, SearchError::Status(404));
    }

    #[tokio::test]
    async fn test_fetch_cover_bad_url() {
        let err = fetch_cover(Client::new(), "not a url".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidUrl(_)));
    }
}
