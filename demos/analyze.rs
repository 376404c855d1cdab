use browser_native::{
    quick_analyze, types::UsageReport, AnalyzeOptions, BrowserNativeClient, ClientOptions,
    Language, ResponseStyle,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let api_key = std::env::var("BROWSER_NATIVE_API_KEY")?;
    let question = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "What is this page about?".to_owned());

    let options = AnalyzeOptions {
        language: Some(Language::En),
        style: Some(ResponseStyle::Concise),
        ..AnalyzeOptions::default()
    };
    let result = quick_analyze(
        "https://example.com",
        &question,
        api_key.clone(),
        ClientOptions::default(),
        &options,
    )
    .await?;

    match result.data() {
        Some(data) => println!("answer: {data}"),
        None => eprintln!("analysis failed: {}", result.error().unwrap_or("unknown")),
    }

    let client = BrowserNativeClient::new(api_key, ClientOptions::default())?;
    let usage = client.get_usage(7).await;
    if usage.success() {
        let report: UsageReport = usage.decode()?;
        println!(
            "usage: {}/{} ({} day(s) reported)",
            report.current_usage,
            report.usage_limit,
            report.daily_usage.len()
        );
    }

    Ok(())
}
