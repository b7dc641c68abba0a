// HTTP transport: the single network seam of the client.
// The facade owns an injected transport, so tests and hosts can substitute their own.

use crate::client::ApiError;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::{StatusCode, Url};
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    // Issues one GET and returns the raw body of a 200 response.
    async fn get(&self, url: &Url) -> Result<Bytes, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
    max_body_bytes: usize,
}

impl HttpTransport {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, timeout, max_body_bytes))
    }

    pub fn with_client(client: reqwest::Client, timeout: Duration, max_body_bytes: usize) -> Self {
        Self {
            client,
            timeout,
            max_body_bytes,
        }
    }

    fn map_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.timeout.as_millis() as u64)
        } else {
            ApiError::NetworkError(error.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<Bytes, ApiError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "unexpected HTTP status");
            return Err(ApiError::InvalidStatus {
                status_code: status.as_u16(),
            });
        }

        let limit = self.max_body_bytes;
        if response.content_length().map_or(false, |len| len > limit as u64) {
            return Err(ApiError::BodyTooLarge { limit });
        }

        // Content-Length can be missing or wrong, so the cap is enforced while streaming too
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_error(e))? {
            if body.len() + chunk.len() > limit {
                return Err(ApiError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }
}
