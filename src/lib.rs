//! `browser-native` is an async HTTP client for the Browser Native web
//! scraping and AI analysis API.
//!
//! Every operation goes through one request engine that applies a
//! per-attempt timeout and retries failures with exponential backoff:
//! - [`BrowserNativeClient::scrape`]
//! - [`BrowserNativeClient::screenshot`]
//! - [`BrowserNativeClient::quickshot`]
//! - [`BrowserNativeClient::analyze`]
//! - [`BrowserNativeClient::get_usage`]
//! - [`BrowserNativeClient::health_check`]
//!
//! Calls never fail with an error once the client is built; they resolve to
//! a [`RequestResult`] that is either successful or carries the last
//! attempt's message.

mod client;
mod config;
pub mod engine;
mod error;
mod options;
mod payload;
mod request;
mod result;
pub mod types;

pub use client::{
    quick_analyze, quick_scrape, quick_screenshot, quick_shot, BrowserNativeClient,
    MAX_USAGE_DAYS,
};
pub use config::{
    ClientConfig, API_KEY_ENV, BASE_URL_ENV, MAX_RETRIES_ENV, TIMEOUT_ENV, VERBOSE_ENV,
};
pub use error::BrowserNativeError;
pub use options::{ClientOptions, DEFAULT_BASE_URL};
pub use payload::{
    AnalyzeOptions, ImageFormat, Language, ResponseStyle, ScrapeOptions, ScreenshotOptions,
    Viewport,
};
pub use request::{Method, RequestSpec};
pub use result::RequestResult;

pub type Result<T> = std::result::Result<T, BrowserNativeError>;
