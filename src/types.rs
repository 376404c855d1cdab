//! Typed views of documented response bodies, for use with
//! [`RequestResult::decode`](crate::RequestResult::decode).
//!
//! Every field is optional or defaulted; the API owns these shapes.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Rendering path the API used for a scrape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeMethod {
    Direct,
    Lightpanda,
    Puppeteer,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    #[serde(default)]
    pub total_time: Option<f64>,
    #[serde(default)]
    pub method: Option<String>,
}

/// Body of `POST /scrapeurl` and `POST /quickshot`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ScrapeEnvelope {
    #[serde(default)]
    pub data: Option<ScrapeData>,
    #[serde(default)]
    pub method: Option<ScrapeMethod>,
    #[serde(default)]
    pub performance: Option<Performance>,
    /// Base64-encoded image, when one was captured.
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, JsonValue>,
}

impl ScrapeEnvelope {
    /// Screenshot from the top level or, failing that, from `metadata`.
    pub fn screenshot(&self) -> Option<&str> {
        self.screenshot
            .as_deref()
            .or_else(|| self.metadata.get("screenshot").and_then(JsonValue::as_str))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of `POST /aireply`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnalyzeEnvelope {
    #[serde(flatten)]
    pub scrape: ScrapeEnvelope,
    #[serde(default)]
    pub analysis: Option<AnalysisReport>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    #[serde(default)]
    pub scraping: bool,
    #[serde(default)]
    pub ai: bool,
    #[serde(default)]
    pub database: bool,
}

/// Body of `GET /health`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub services: ServiceHealth,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyUsage {
    pub date: String,
    #[serde(default)]
    pub requests: u64,
    #[serde(default)]
    pub scrape_requests: u64,
    #[serde(default)]
    pub analyze_requests: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    #[serde(default)]
    pub total_requests: u64,
    #[serde(default)]
    pub scrape_total: u64,
    #[serde(default)]
    pub analyze_total: u64,
}

/// Body of `GET /stats`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    #[serde(default)]
    pub daily_usage: Vec<DailyUsage>,
    #[serde(default)]
    pub monthly_total: MonthlyTotal,
    #[serde(default)]
    pub current_usage: u64,
    #[serde(default)]
    pub usage_limit: u64,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<String>,
}
