use crate::core::fetch::{FeedRequest, FeedResponse, Fetcher, TransportError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Duration::from_secs(30))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent("eurofx/1.0")
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn send(&self, request: &FeedRequest) -> Result<FeedResponse, TransportError> {
        debug!("Requesting {} {}", request.method, request.uri);
        let response = self
            .client
            .request(request.method.clone(), &request.uri)
            .send()
            .await
            .map_err(|e| TransportError(format!("Request error: {e}")))?;

        let status = response.status();
        debug!(%status, "Received feed response");

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("Failed to read response body: {e}")))?;

        Ok(FeedResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_returns_status_and_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<Envelope/>"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let uri = format!("{}/feed.xml", mock_server.uri());
        let response = fetcher.send(&FeedRequest::get(&uri)).await.unwrap();

        assert_eq!(response.status, reqwest::StatusCode::OK);
        assert_eq!(response.body, b"<Envelope/>");
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let response = fetcher
            .send(&FeedRequest::get(&mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(response.status.as_u16(), 503);
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2)).unwrap();
        let result = fetcher
            .send(&FeedRequest::get("http://127.0.0.1:1/eurofxref-daily.xml"))
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("Request error:"));
    }
}
