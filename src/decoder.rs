// Response decoding: envelope first, response code second, payload last.
// A non-zero response code preempts the payload, which is then never decoded.

use crate::client::ApiError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

// Generic wrapper around every API response.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub data: T,
    pub response_code: i64,
    pub response_message: String,
}

// Header plus an opaque payload, so an error response never has to match T
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    data: serde_json::Value,
    response_code: i64,
    response_message: String,
}

pub fn decode_envelope<T>(payload: &[u8]) -> Result<Envelope<T>, ApiError>
where
    T: DeserializeOwned,
{
    tracing::debug!(payload = %String::from_utf8_lossy(payload), "decoding response");

    let raw: RawEnvelope = serde_json::from_slice(payload).map_err(|e| decode_failed(e, payload))?;

    if raw.response_code != 0 {
        tracing::debug!(
            code = raw.response_code,
            message = %raw.response_message,
            "API returned an error response"
        );
        return Err(ApiError::Remote {
            code: raw.response_code,
            message: raw.response_message,
        });
    }

    let data = T::deserialize(raw.data).map_err(|e| decode_failed(e, payload))?;

    Ok(Envelope {
        data,
        response_code: raw.response_code,
        response_message: raw.response_message,
    })
}

pub fn decode_data<T>(payload: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    decode_envelope(payload).map(|envelope| envelope.data)
}

fn decode_failed(error: serde_json::Error, payload: &[u8]) -> ApiError {
    tracing::warn!(
        error = %error,
        payload = %String::from_utf8_lossy(payload),
        "failed to decode API response"
    );
    ApiError::DecodeFailed(error.to_string())
}
