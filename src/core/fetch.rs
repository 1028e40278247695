//! Transport abstraction used to download the rate feed

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Connection, DNS, timeout or any other failure below the HTTP layer.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub method: Method,
    pub uri: String,
}

impl FeedRequest {
    pub fn get(uri: &str) -> Self {
        Self {
            method: Method::GET,
            uri: uri.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn send(&self, request: &FeedRequest) -> Result<FeedResponse, TransportError>;
}
