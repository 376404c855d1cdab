use browser_native::{
    types::{HealthReport, ScrapeEnvelope},
    BrowserNativeClient, BrowserNativeError, ScrapeOptions,
};

const TEST_URL: &str = "https://example.com";

#[tokio::test]
async fn live_health_and_scrape() {
    let client = match BrowserNativeClient::from_env() {
        Ok(client) => client,
        Err(BrowserNativeError::MissingApiKey) => {
            eprintln!("skipping live test: BROWSER_NATIVE_API_KEY is not set");
            return;
        }
        Err(err) => panic!("invalid live configuration: {err}"),
    };

    let health = client.health_check().await;
    assert!(health.success(), "health check failed: {:?}", health.error());
    let report: HealthReport = health.decode().expect("health body must decode");
    eprintln!("api status: {:?}", report.status);

    let scraped = client.scrape(TEST_URL, &ScrapeOptions::default()).await;
    assert!(scraped.success(), "scrape failed: {:?}", scraped.error());
    assert!(scraped.attempt().is_some_and(|attempt| attempt >= 1));

    let envelope: ScrapeEnvelope = scraped.decode().expect("scrape envelope must decode");
    eprintln!(
        "title: {:?}, method: {:?}",
        envelope.data.and_then(|data| data.title),
        envelope.method
    );
}
