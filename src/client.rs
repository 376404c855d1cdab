use std::fmt;
use std::sync::Arc;

use crate::{
    engine,
    payload::{analyze_payload, quickshot_payload, scrape_payload, screenshot_payload},
    AnalyzeOptions, ClientConfig, ClientOptions, RequestResult, RequestSpec, Result,
    ScrapeOptions, ScreenshotOptions,
};

/// Longest usage window the stats endpoint serves.
pub const MAX_USAGE_DAYS: u32 = 30;

#[derive(Clone)]
/// HTTP client for the Browser Native API.
///
/// Cloning is cheap; clones share the connection pool and configuration.
pub struct BrowserNativeClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl fmt::Debug for BrowserNativeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserNativeClient")
            .field("config", &self.config)
            .finish()
    }
}

impl BrowserNativeClient {
    /// Creates a client for `api_key` with the given options.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use browser_native::{BrowserNativeClient, ClientOptions};
    ///
    /// let client = BrowserNativeClient::new(
    ///     "bnca_your_key",
    ///     ClientOptions {
    ///         verbose: true,
    ///         ..ClientOptions::default()
    ///     },
    /// )
    /// .expect("api key must not be empty");
    /// ```
    pub fn new(api_key: impl Into<String>, options: ClientOptions) -> Result<Self> {
        Ok(Self::from_config(ClientConfig::new(api_key, options)?))
    }

    /// Creates a client from an already validated configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    /// Creates a client from `BROWSER_NATIVE_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(ClientConfig::from_env()?))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Scrapes a page and extracts structured content.
    ///
    /// A screenshot is only requested when `include_screenshot` is set.
    pub async fn scrape(&self, url: &str, options: &ScrapeOptions) -> RequestResult {
        self.execute(&RequestSpec::post("/scrapeurl", scrape_payload(url, options)))
            .await
    }

    /// Scrapes a page and always captures a screenshot.
    pub async fn screenshot(&self, url: &str, options: &ScreenshotOptions) -> RequestResult {
        self.execute(&RequestSpec::post(
            "/scrapeurl",
            screenshot_payload(url, options),
        ))
        .await
    }

    /// Speed-optimized screenshot capture.
    pub async fn quickshot(&self, url: &str, options: &ScreenshotOptions) -> RequestResult {
        self.execute(&RequestSpec::post("/quickshot", quickshot_payload(url, options)))
            .await
    }

    /// Extracts content and answers `question` about it.
    pub async fn analyze(
        &self,
        url: &str,
        question: &str,
        options: &AnalyzeOptions,
    ) -> RequestResult {
        self.execute(&RequestSpec::post(
            "/aireply",
            analyze_payload(url, question, options),
        ))
        .await
    }

    /// Account usage statistics for the last `days` days (1 to 30).
    pub async fn get_usage(&self, days: u32) -> RequestResult {
        let days = days.clamp(1, MAX_USAGE_DAYS);
        self.execute(&RequestSpec::get("/stats").with_query("days", days))
            .await
    }

    /// API health and account status.
    pub async fn health_check(&self) -> RequestResult {
        self.execute(&RequestSpec::get("/health")).await
    }

    /// Runs an arbitrary request through the retry engine.
    pub async fn execute(&self, spec: &RequestSpec) -> RequestResult {
        engine::execute(&self.http, spec, &self.config).await
    }
}

/// Scrapes `url` with a throwaway client.
pub async fn quick_scrape(
    url: &str,
    api_key: impl Into<String>,
    client_options: ClientOptions,
    options: &ScrapeOptions,
) -> Result<RequestResult> {
    let client = BrowserNativeClient::new(api_key, client_options)?;
    Ok(client.scrape(url, options).await)
}

/// Captures a screenshot of `url` with a throwaway client.
pub async fn quick_screenshot(
    url: &str,
    api_key: impl Into<String>,
    client_options: ClientOptions,
    options: &ScreenshotOptions,
) -> Result<RequestResult> {
    let client = BrowserNativeClient::new(api_key, client_options)?;
    Ok(client.screenshot(url, options).await)
}

/// Answers `question` about `url` with a throwaway client.
pub async fn quick_analyze(
    url: &str,
    question: &str,
    api_key: impl Into<String>,
    client_options: ClientOptions,
    options: &AnalyzeOptions,
) -> Result<RequestResult> {
    let client = BrowserNativeClient::new(api_key, client_options)?;
    Ok(client.analyze(url, question, options).await)
}

/// Quick screenshot of `url` with a throwaway client.
pub async fn quick_shot(
    url: &str,
    api_key: impl Into<String>,
    client_options: ClientOptions,
    options: &ScreenshotOptions,
) -> Result<RequestResult> {
    let client = BrowserNativeClient::new(api_key, client_options)?;
    Ok(client.quickshot(url, options).await)
}
