use browser_native::{BrowserNativeClient, ClientOptions, ScrapeOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let api_key = std::env::var("BROWSER_NATIVE_API_KEY")?;
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_owned());

    let client = BrowserNativeClient::new(
        api_key,
        ClientOptions {
            verbose: true,
            ..ClientOptions::default()
        },
    )?;

    let result = client.scrape(&url, &ScrapeOptions::default()).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    let data = result.into_result()?;
    if let Some(title) = data.pointer("/data/title").and_then(|value| value.as_str()) {
        println!("title: {title}");
    }

    Ok(())
}
