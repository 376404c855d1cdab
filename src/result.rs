use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;

use crate::{BrowserNativeError, Result};

/// Normalized outcome of a logical API call.
///
/// Exactly one of [`data`](Self::data) and [`error`](Self::error) is set,
/// matching [`success`](Self::success). Serializes to
/// `{success, data?, error?, responseTime, attempt?}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(rename = "responseTime")]
    response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempt: Option<u32>,
}

impl RequestResult {
    pub(crate) fn succeeded(data: JsonValue, response_time_ms: u64, attempt: u32) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            response_time_ms,
            attempt: Some(attempt),
        }
    }

    pub(crate) fn failed(error: String, response_time_ms: u64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            response_time_ms,
            attempt: None,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Response body of the successful attempt.
    pub fn data(&self) -> Option<&JsonValue> {
        self.data.as_ref()
    }

    /// Failure message of the last attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Wall-clock time across all attempts, backoff included.
    pub fn response_time_ms(&self) -> u64 {
        self.response_time_ms
    }

    /// 1-based index of the attempt that succeeded.
    pub fn attempt(&self) -> Option<u32> {
        self.attempt
    }

    /// Converts into a `Result`, turning a failure into
    /// [`BrowserNativeError::Request`].
    pub fn into_result(self) -> Result<JsonValue> {
        match (self.data, self.error) {
            (Some(data), _) => Ok(data),
            (None, error) => Err(BrowserNativeError::Request(
                error.unwrap_or_else(|| "Request failed".to_owned()),
            )),
        }
    }

    /// Deserializes the response data into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.data {
            Some(data) => serde_json::from_value(data.clone())
                .map_err(|err| BrowserNativeError::Decode(format!("unexpected response shape: {err}"))),
            None => Err(BrowserNativeError::Request(
                self.error.clone().unwrap_or_else(|| "Request failed".to_owned()),
            )),
        }
    }
}
