// Reservation API client: the facade callers use.
// Each operation builds its query, signs it, calls the transport and decodes the envelope.

use crate::decoder::decode_data;
use crate::endpoint::{Endpoint, SiteIdentity, DEFAULT_BASE_URL};
use crate::reservation::{Reservation, ReservationList};
use crate::signer::{Md5Signer, RequestSigner};
use crate::timestamp::format_timestamp;
use crate::transport::{HttpTransport, Transport, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const GET_RESERVATION_DATA: &str = "get_reservation_data";

// Opaque flag the API needs to include guest, price and product fields in list results
pub const LIST_DETAIL_LEVEL: &str = "71";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Invalid HTTP status: {status_code}")]
    InvalidStatus { status_code: u16 },

    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    #[error("API error {code}: {message}")]
    Remote { code: i64, message: String },
}

// Broad classes of failure, separating "could not talk to the API" from "the API said no".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Request,
    Transport,
    Decode,
    Remote,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidEndpoint(_) => ErrorKind::Request,
            ApiError::NetworkError(_)
            | ApiError::Timeout(_)
            | ApiError::InvalidStatus { .. }
            | ApiError::BodyTooLarge { .. } => ErrorKind::Transport,
            ApiError::DecodeFailed(_) => ErrorKind::Decode,
            ApiError::Remote { .. } => ErrorKind::Remote,
        }
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[derive(Clone)]
pub struct ClientConfig {
    pub site_id: String,
    pub api_key: String,
    pub hash_key: String,
    pub base_url: String,
    pub timeout_ms: u64,
    pub max_body_bytes: usize,
}

impl ClientConfig {
    pub fn new(
        site_id: impl Into<String>,
        api_key: impl Into<String>,
        hash_key: impl Into<String>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            api_key: api_key.into(),
            hash_key: hash_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.site_id.trim().is_empty() {
            return Err(ClientError::ConfigError("site_id is empty".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(ClientError::ConfigError("api_key is empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::ConfigError("timeout_ms must be positive".to_string()));
        }
        if self.max_body_bytes == 0 {
            return Err(ClientError::ConfigError(
                "max_body_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("site_id", &self.site_id)
            .field("api_key", &self.api_key)
            .field("hash_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

#[async_trait]
pub trait ReservationApi: Send + Sync + 'static {
    // Fetch one reservation; the returned value always carries the requested id
    async fn get_reservation(&self, id: i64) -> Result<Reservation, ApiError>;

    // List reservations in a time range, ids as reported by the API
    async fn list_reservations(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, ApiError>;
}

pub struct PlanyoClient {
    identity: SiteIdentity,
    base_url: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
    signer: Arc<dyn RequestSigner>,
}

impl PlanyoClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout(), config.max_body_bytes)
            .map_err(|e| ClientError::InitError(e.to_string()))?;
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self {
            signer: Arc::new(Md5Signer::new(config.hash_key)),
            identity: SiteIdentity {
                site_id: config.site_id,
                api_key: config.api_key,
            },
            base_url: config.base_url,
            timeout: Duration::from_millis(config.timeout_ms),
            transport,
        })
    }

    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = signer;
        self
    }

    async fn fetch_resource(&self, endpoint: &Endpoint) -> Result<Bytes, ApiError> {
        let timestamp = Utc::now().timestamp();
        let url = endpoint.signed_url(
            &self.base_url,
            &self.identity,
            self.signer.as_ref(),
            timestamp,
        )?;

        tracing::debug!(method = endpoint.method().unwrap_or(""), "sending API request");

        // Bounds substitute transports too; HttpTransport also has its own timeout
        match tokio::time::timeout(self.timeout, self.transport.get(&url)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

impl fmt::Debug for PlanyoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanyoClient")
            .field("identity", &self.identity)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ReservationApi for PlanyoClient {
    #[tracing::instrument(skip(self))]
    async fn get_reservation(&self, id: i64) -> Result<Reservation, ApiError> {
        let endpoint =
            Endpoint::new(GET_RESERVATION_DATA).with("reservation_id", id.to_string());

        let payload = self.fetch_resource(&endpoint).await?;
        let mut reservation: Reservation = decode_data(&payload)?;

        // The single-fetch payload never carries its own id
        reservation.reservation_id = Some(id);
        Ok(reservation)
    }

    #[tracing::instrument(skip(self))]
    async fn list_reservations(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Reservation>, ApiError> {
        let endpoint = Endpoint::new(GET_RESERVATION_DATA)
            .with("start_time", format_timestamp(&start))
            .with("end_time", format_timestamp(&end))
            .with("detail_level", LIST_DETAIL_LEVEL);

        let payload = self.fetch_resource(&endpoint).await?;
        let list: ReservationList = decode_data(&payload)?;

        tracing::debug!(count = list.results.len(), "listed reservations");
        Ok(list.results)
    }
}
