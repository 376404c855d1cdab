/// Default API root used when no `base_url` override is given.
pub const DEFAULT_BASE_URL: &str = "https://bnca-api.fly.dev";

/// Configures endpoint, timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// API root; endpoint paths are appended to it.
    pub base_url: String,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base retry backoff in milliseconds (exponential strategy).
    pub retry_backoff_ms: u64,
    /// Emits attempt progress at `info` level instead of `debug`.
    pub verbose: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_ms: 30_000,
            max_retries: 2,
            retry_backoff_ms: 1_000,
            verbose: false,
        }
    }
}
