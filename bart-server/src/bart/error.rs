//! BART client error types.

use super::convert::ConversionError;

/// Errors from the BART HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum BartError {
    /// HTTP request failed (network error, connection refused, etc.)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The bounded per-request timeout elapsed
    #[error("upstream request timed out")]
    Timeout,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The response parsed but could not be converted to domain types
    #[error(transparent)]
    Convert(#[from] ConversionError),
}

impl From<reqwest::Error> for BartError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            BartError::Timeout
        } else {
            BartError::Http(err)
        }
    }
}
