//! NEO source backed by the REST API

use std::time::Duration;

use async_trait::async_trait;
use neo_core::{NeosResponse, QueryParams};
use reqwest::{Client, Url};
use tracing::debug;

use super::NeoSource;
use crate::FetchError;

/// HTTP client for `GET {base}/{endpoint}?startDate=..&endDate=..`
pub struct HttpNeoSource {
    client: Client,
    url: String,
}

impl HttpNeoSource {
    /// Create a new source for an endpoint from [`crate::ApiConfig::endpoint_url`]
    pub fn new(endpoint: &Url, timeout: Duration) -> Result<Self, FetchError> {
        Self::with_url(endpoint.as_str(), timeout)
    }

    /// Create a new source for an explicit endpoint URL
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl NeoSource for HttpNeoSource {
    async fn fetch_neos(&self, params: &QueryParams) -> Result<NeosResponse, FetchError> {
        debug!(url = %self.url, %params, "GET neos");

        let response = self
            .client
            .get(&self.url)
            .query(params)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(FetchError::from_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn source_name(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::test_support::{serve_once, SAMPLE_RESPONSE};

    fn source(base: &str) -> HttpNeoSource {
        HttpNeoSource::with_url(format!("{}/neos", base), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_new_uses_validated_endpoint() {
        let config = ApiConfig::default();
        let endpoint = config.endpoint_url().unwrap();
        let source = HttpNeoSource::new(&endpoint, config.request_timeout).unwrap();
        assert_eq!(source.source_name(), "http://127.0.0.1:8080/neos");
    }

    #[tokio::test]
    async fn test_fetch_sends_query_and_decodes_payload() {
        let (base, request) = serve_once("200 OK", SAMPLE_RESPONSE).await;
        let params = QueryParams::new("2024-01-01", Some("2024-01-08".into()));

        let response = source(&base).fetch_neos(&params).await.unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(response.items[0].name, "(2010 PK9)");
        assert_eq!(response.hazardous_count(), 1);

        let request = request.await.unwrap();
        assert!(request.starts_with("GET /neos?startDate=2024-01-01&endDate=2024-01-08 "));
    }

    #[tokio::test]
    async fn test_missing_end_date_is_not_sent() {
        let (base, request) = serve_once("200 OK", SAMPLE_RESPONSE).await;
        let params = QueryParams::new("2024-01-01", None);

        source(&base).fetch_neos(&params).await.unwrap();
        let request = request.await.unwrap();
        assert!(request.starts_with("GET /neos?startDate=2024-01-01 "));
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let (base, _request) =
            serve_once("500 Internal Server Error", r#"{"message":"rate limited"}"#).await;
        let params = QueryParams::new("2024-01-01", None);

        let error = source(&base).fetch_neos(&params).await.unwrap_err();
        assert!(matches!(error, FetchError::Http { status: 500, .. }));
        assert_eq!(error.user_message(), "rate limited");
    }

    #[tokio::test]
    async fn test_malformed_payload_is_a_decode_error() {
        let (base, _request) = serve_once("200 OK", r#"{"items": "nope"}"#).await;
        let params = QueryParams::new("2024-01-01", None);

        let error = source(&base).fetch_neos(&params).await.unwrap_err();
        assert!(matches!(error, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let error = source(&base)
            .fetch_neos(&QueryParams::new("2024-01-01", None))
            .await
            .unwrap_err();
        assert!(error.is_transport());
    }
}
