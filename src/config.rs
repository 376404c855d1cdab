use std::fmt;

use reqwest::Url;

use crate::{BrowserNativeError, ClientOptions, Result};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "BROWSER_NATIVE_API_KEY";
/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "BROWSER_NATIVE_BASE_URL";
/// Environment variable overriding the per-attempt timeout (ms).
pub const TIMEOUT_ENV: &str = "BROWSER_NATIVE_TIMEOUT_MS";
/// Environment variable overriding the retry cap.
pub const MAX_RETRIES_ENV: &str = "BROWSER_NATIVE_MAX_RETRIES";
/// Environment variable enabling verbose diagnostics.
pub const VERBOSE_ENV: &str = "BROWSER_NATIVE_VERBOSE";

/// Validated, read-only client configuration.
///
/// Built once per client and shared by every request it issues. There are
/// no setters; a different configuration means a different value.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_key: String,
    base_url: String,
    timeout_ms: u64,
    max_retries: u32,
    retry_backoff_ms: u64,
    verbose: bool,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ClientConfig {
    /// Validates `options` and binds them to `api_key`.
    ///
    /// Fails with [`BrowserNativeError::MissingApiKey`] when the key is empty
    /// and with [`BrowserNativeError::InvalidOption`] for a zero timeout or a
    /// base URL that is not an absolute `http(s)` URL.
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(BrowserNativeError::MissingApiKey);
        }

        if options.timeout_ms == 0 {
            return Err(BrowserNativeError::InvalidOption(
                "timeout_ms must be greater than zero".to_owned(),
            ));
        }

        let base_url = normalize_base_url(&options.base_url)?;

        Ok(Self {
            api_key,
            base_url,
            timeout_ms: options.timeout_ms,
            max_retries: options.max_retries,
            retry_backoff_ms: options.retry_backoff_ms,
            verbose: options.verbose,
        })
    }

    /// Builds a configuration from environment variables.
    ///
    /// Reads:
    /// - `BROWSER_NATIVE_API_KEY` — required
    /// - `BROWSER_NATIVE_BASE_URL`, `BROWSER_NATIVE_TIMEOUT_MS`,
    ///   `BROWSER_NATIVE_MAX_RETRIES`, `BROWSER_NATIVE_VERBOSE` — optional
    ///   overrides of the [`ClientOptions`] defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV).ok_or(BrowserNativeError::MissingApiKey)?;
        let mut options = ClientOptions::default();

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
            options.base_url = base_url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            options.timeout_ms = parse_number(TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(MAX_RETRIES_ENV) {
            options.max_retries = parse_number(MAX_RETRIES_ENV, &raw)?;
        }
        if let Some(raw) = lookup(VERBOSE_ENV) {
            options.verbose = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Self::new(api_key, options)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// API root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn retry_backoff_ms(&self) -> u64 {
        self.retry_backoff_ms
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Total number of attempts a single call may make.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|err| {
        BrowserNativeError::InvalidOption(format!("base_url '{trimmed}' is not a valid URL: {err}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BrowserNativeError::InvalidOption(format!(
            "base_url '{trimmed}' must use http or https"
        )));
    }
    Ok(trimmed.strip_suffix('/').unwrap_or(trimmed).to_owned())
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| BrowserNativeError::InvalidOption(format!("{key} must be a number, got '{raw}'")))
}
