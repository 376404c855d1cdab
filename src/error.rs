/// Error type returned by this crate.
///
/// Failed API calls are not errors: they resolve to an unsuccessful
/// [`RequestResult`](crate::RequestResult). Only configuration problems and
/// explicit conversions surface here.
#[derive(Debug, thiserror::Error)]
pub enum BrowserNativeError {
    /// The API key was missing, empty or whitespace only.
    #[error("API key is required. Get one at https://bnca.monostate.ai")]
    MissingApiKey,
    /// A client option was rejected at construction time.
    #[error("invalid client option: {0}")]
    InvalidOption(String),
    /// A failed request result was converted into an error.
    #[error("request failed: {0}")]
    Request(String),
    /// Response data did not match the requested type.
    #[error("decode error: {0}")]
    Decode(String),
}
