use thiserror::Error;

/// Error type for calls against the deck builder API.
///
/// Payloads are kept as plain values so results can be carried inside UI
/// messages, which must be `Clone`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Any non-success HTTP status.
    #[error("API request failed")]
    RequestFailed { status: u16 },
    /// Transport failure (connection refused, DNS, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),
    /// Body could not be decoded as the expected JSON
    #[error("Parse error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors of the on-disk preferences store.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
