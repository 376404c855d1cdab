//! Request execution: attempts, per-attempt timeout, retry with exponential
//! backoff, and normalization into a [`RequestResult`].

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::{header, StatusCode};
use serde_json::Value as JsonValue;
use tokio::time::sleep;

use crate::{ClientConfig, RequestResult, RequestSpec};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client identification sent with every request.
pub const USER_AGENT: &str = concat!("browser-native-rs/", env!("CARGO_PKG_VERSION"));

const UNKNOWN_ERROR: &str = "Unknown error";

// Emits progress at info when verbose, debug otherwise.
macro_rules! progress {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+);
        } else {
            tracing::debug!($($arg)+);
        }
    };
}

/// Why a single attempt failed.
#[derive(Debug)]
enum AttemptError {
    /// Non-2xx status with the message extracted from the body.
    Api { status: StatusCode, message: String },
    /// The attempt did not complete within the configured timeout.
    Timeout { timeout_ms: u64 },
    /// Connection, TLS or body transfer failure.
    Transport(reqwest::Error),
    /// 2xx response whose body is not JSON.
    InvalidBody(String),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, message } => write!(f, "API Error ({}): {message}", status.as_u16()),
            Self::Timeout { timeout_ms } => write!(f, "request timed out after {timeout_ms} ms"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::InvalidBody(detail) => write!(f, "invalid response body: {detail}"),
        }
    }
}

impl AttemptError {
    fn from_reqwest(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_ms }
        } else {
            Self::Transport(err)
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Api { .. } => "api",
            Self::Timeout { .. } => "timeout",
            Self::Transport(_) => "transport",
            Self::InvalidBody(_) => "invalid_body",
        }
    }
}

/// Every attempt failure is retried while attempts remain, timeouts
/// included.
fn should_retry(_error: &AttemptError, attempt: u32, config: &ClientConfig) -> bool {
    attempt <= config.max_retries()
}

/// Delay before the retry that follows failed `attempt` (1-based):
/// `base * 2^(attempt-1)`, saturating at `u64::MAX` milliseconds.
pub fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let exp = attempt.saturating_sub(1);
    let multiplier = 1u64.checked_shl(exp).unwrap_or(u64::MAX);
    Duration::from_millis(base_ms.saturating_mul(multiplier))
}

/// Runs `spec` against the API described by `config`.
///
/// Makes up to `max_retries + 1` sequential attempts and never returns an
/// error: exhaustion yields an unsuccessful [`RequestResult`] carrying the
/// last failure's message.
pub async fn execute(
    http: &reqwest::Client,
    spec: &RequestSpec,
    config: &ClientConfig,
) -> RequestResult {
    let url = format!("{}{}", config.base_url(), spec.endpoint_path);
    let started = Instant::now();
    let mut last_error = None;

    for attempt in 1..=config.max_attempts() {
        progress!(
            config.verbose(),
            "Browser Native: {} {} (attempt {})",
            spec.method.as_str(),
            url,
            attempt
        );

        match send_attempt(http, &url, spec, config).await {
            Ok(data) => {
                let elapsed = elapsed_ms(started);
                progress!(
                    config.verbose(),
                    "Browser Native: request completed in {}ms",
                    elapsed
                );
                return RequestResult::succeeded(data, elapsed, attempt);
            }
            Err(err) => {
                tracing::debug!(attempt, kind = err.kind(), error = %err, "attempt failed");

                if should_retry(&err, attempt, config) {
                    let delay = backoff_delay(config.retry_backoff_ms(), attempt);
                    progress!(
                        config.verbose(),
                        "Browser Native: attempt {} failed, retrying in {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    last_error = Some(err);
                    sleep(delay).await;
                    continue;
                }

                last_error = Some(err);
                break;
            }
        }
    }

    let message = last_error
        .map(|err| err.to_string())
        .unwrap_or_else(|| "Request failed".to_owned());
    RequestResult::failed(message, elapsed_ms(started))
}

/// One request/response cycle bounded by the configured timeout.
///
/// reqwest's per-request timeout spans connect through body read; when it
/// fires the in-flight future is dropped with the connection.
async fn send_attempt(
    http: &reqwest::Client,
    url: &str,
    spec: &RequestSpec,
    config: &ClientConfig,
) -> Result<JsonValue, AttemptError> {
    let timeout_ms = config.timeout_ms();
    let mut request = http
        .request(spec.method.into(), url)
        .header(API_KEY_HEADER, config.api_key())
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, USER_AGENT)
        .timeout(Duration::from_millis(timeout_ms));

    if !spec.query.is_empty() {
        request = request.query(&spec.query);
    }
    if spec.has_body() {
        request = request.json(&spec.payload);
    }

    let response = request
        .send()
        .await
        .map_err(|err| AttemptError::from_reqwest(err, timeout_ms))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| AttemptError::from_reqwest(err, timeout_ms))?;

    if !status.is_success() {
        return Err(AttemptError::Api {
            status,
            message: api_error_message(status, &body),
        });
    }

    serde_json::from_str(&body).map_err(|err| AttemptError::InvalidBody(err.to_string()))
}

/// The body's `error` string; the reason phrase if the body is JSON without
/// one; `Unknown error` if the body is not JSON.
fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(json) => json
            .get("error")
            .and_then(JsonValue::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or(UNKNOWN_ERROR)
                    .to_owned()
            }),
        Err(_) => UNKNOWN_ERROR.to_owned(),
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientOptions;

    fn config(max_retries: u32) -> ClientConfig {
        ClientConfig::new(
            "key",
            ClientOptions {
                max_retries,
                ..ClientOptions::default()
            },
        )
        .expect("config must build")
    }

    #[test]
    fn backoff_doubles_from_one_second() {
        assert_eq!(backoff_delay(1_000, 1), Duration::from_millis(1_000));
        assert_eq!(backoff_delay(1_000, 2), Duration::from_millis(2_000));
        assert_eq!(backoff_delay(1_000, 3), Duration::from_millis(4_000));
    }

    #[test]
    fn backoff_keeps_doubling_for_late_attempts() {
        assert_eq!(backoff_delay(1_000, 18), Duration::from_millis(1_000 << 17));
        assert_eq!(backoff_delay(1, 40), Duration::from_millis(1 << 39));
        assert_eq!(backoff_delay(1, 64), Duration::from_millis(1 << 63));
    }

    #[test]
    fn backoff_saturates_instead_of_overflowing() {
        assert_eq!(backoff_delay(1_000, 80), Duration::from_millis(u64::MAX));
        assert_eq!(backoff_delay(u64::MAX, 5), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn every_failure_kind_is_retried_while_attempts_remain() {
        let config = config(2);
        let failures = [
            AttemptError::Api {
                status: StatusCode::BAD_REQUEST,
                message: "bad".to_owned(),
            },
            AttemptError::Timeout { timeout_ms: 10 },
            AttemptError::InvalidBody("eof".to_owned()),
        ];

        for failure in &failures {
            assert!(should_retry(failure, 1, &config));
            assert!(should_retry(failure, 2, &config));
            assert!(!should_retry(failure, 3, &config));
        }
    }

    #[test]
    fn no_retry_when_retries_disabled() {
        let timeout = AttemptError::Timeout { timeout_ms: 10 };
        assert!(!should_retry(&timeout, 1, &config(0)));
    }

    #[test]
    fn api_error_message_prefers_body_error() {
        assert_eq!(
            api_error_message(StatusCode::BAD_REQUEST, r#"{"error":"invalid url"}"#),
            "invalid url"
        );
    }

    #[test]
    fn api_error_message_falls_back_to_reason_phrase() {
        assert_eq!(
            api_error_message(StatusCode::SERVICE_UNAVAILABLE, r#"{"detail":"x"}"#),
            "Service Unavailable"
        );
    }

    #[test]
    fn api_error_message_for_non_json_body() {
        assert_eq!(
            api_error_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            "Unknown error"
        );
    }

    #[test]
    fn attempt_errors_render_with_status_and_timeout() {
        let api = AttemptError::Api {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_owned(),
        };
        assert_eq!(api.to_string(), "API Error (500): boom");
        assert_eq!(
            AttemptError::Timeout { timeout_ms: 250 }.to_string(),
            "request timed out after 250 ms"
        );
    }
}
