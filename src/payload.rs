//! Typed operation options and POST payload shaping.
//!
//! Options are serialized first; the operation's own fields (`url`,
//! `question`, `screenshot`) are written last and always win.

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Viewport used for rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Options shared by every scraping operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOptions {
    /// Include a screenshot in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_screenshot: Option<bool>,
    /// Wait for this selector before extracting content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract_metadata: Option<bool>,
    /// Fields passed through verbatim.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

/// Options for `screenshot` and `quickshot`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotOptions {
    #[serde(flatten)]
    pub scrape: ScrapeOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_page: Option<bool>,
    /// Image format, `png` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
    /// JPEG quality, 1-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Pt,
    Es,
    Fr,
    De,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    Concise,
    Detailed,
    Technical,
}

/// Options for `analyze`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnalyzeOptions {
    #[serde(flatten)]
    pub scrape: ScrapeOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ResponseStyle>,
}

pub(crate) fn scrape_payload(url: &str, options: &ScrapeOptions) -> Map<String, JsonValue> {
    let mut payload = to_map(options);
    payload.insert("url".to_owned(), url.into());
    payload.insert(
        "screenshot".to_owned(),
        options.include_screenshot.unwrap_or(false).into(),
    );
    payload
}

pub(crate) fn screenshot_payload(url: &str, options: &ScreenshotOptions) -> Map<String, JsonValue> {
    let mut payload = to_map(options);
    payload.insert("url".to_owned(), url.into());
    payload.insert("screenshot".to_owned(), true.into());
    payload
}

pub(crate) fn quickshot_payload(url: &str, options: &ScreenshotOptions) -> Map<String, JsonValue> {
    let mut payload = to_map(options);
    payload.insert("url".to_owned(), url.into());
    payload
}

pub(crate) fn analyze_payload(
    url: &str,
    question: &str,
    options: &AnalyzeOptions,
) -> Map<String, JsonValue> {
    let mut payload = to_map(options);
    payload.insert("url".to_owned(), url.into());
    payload.insert("question".to_owned(), question.into());
    payload.insert(
        "screenshot".to_owned(),
        options.scrape.include_screenshot.unwrap_or(false).into(),
    );
    payload
}

fn to_map<T: Serialize>(options: &T) -> Map<String, JsonValue> {
    // Option structs always serialize to objects.
    match serde_json::to_value(options) {
        Ok(JsonValue::Object(map)) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scrape_defaults_screenshot_to_false() {
        let payload = scrape_payload("https://example.com", &ScrapeOptions::default());
        assert_eq!(
            JsonValue::Object(payload),
            json!({"url": "https://example.com", "screenshot": false})
        );
    }

    #[test]
    fn scrape_follows_include_screenshot() {
        let options = ScrapeOptions {
            include_screenshot: Some(true),
            wait_for_selector: Some("#main".to_owned()),
            ..ScrapeOptions::default()
        };
        let payload = scrape_payload("https://example.com", &options);
        assert_eq!(payload["screenshot"], json!(true));
        assert_eq!(payload["includeScreenshot"], json!(true));
        assert_eq!(payload["waitForSelector"], json!("#main"));
    }

    #[test]
    fn screenshot_is_forced_over_caller_overrides() {
        let mut extra = Map::new();
        extra.insert("screenshot".to_owned(), json!(false));
        let options = ScreenshotOptions {
            scrape: ScrapeOptions {
                include_screenshot: Some(false),
                extra,
                ..ScrapeOptions::default()
            },
            full_page: Some(true),
            format: Some(ImageFormat::Jpeg),
            quality: Some(80),
        };

        let payload = screenshot_payload("https://example.com", &options);
        assert_eq!(payload["screenshot"], json!(true));
        assert_eq!(payload["fullPage"], json!(true));
        assert_eq!(payload["format"], json!("jpeg"));
        assert_eq!(payload["quality"], json!(80));
    }

    #[test]
    fn quickshot_sends_only_url_and_options() {
        let payload = quickshot_payload("https://example.com", &ScreenshotOptions::default());
        assert_eq!(JsonValue::Object(payload), json!({"url": "https://example.com"}));
    }

    #[test]
    fn analyze_carries_question_and_style() {
        let options = AnalyzeOptions {
            language: Some(Language::Pt),
            style: Some(ResponseStyle::Technical),
            ..AnalyzeOptions::default()
        };
        let payload = analyze_payload("https://example.com", "What is this?", &options);
        assert_eq!(
            JsonValue::Object(payload),
            json!({
                "url": "https://example.com",
                "question": "What is this?",
                "screenshot": false,
                "language": "pt",
                "style": "technical"
            })
        );
    }

    #[test]
    fn operation_fields_override_extra_url() {
        let mut extra = Map::new();
        extra.insert("url".to_owned(), json!("https://evil.example"));
        extra.insert("customFlag".to_owned(), json!(1));
        let options = ScrapeOptions {
            extra,
            ..ScrapeOptions::default()
        };
        let payload = scrape_payload("https://example.com", &options);
        assert_eq!(payload["url"], json!("https://example.com"));
        assert_eq!(payload["customFlag"], json!(1));
    }
}
