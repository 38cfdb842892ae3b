//! Error types for Twilio API operations.

use thiserror::Error;

/// Errors that can occur during Twilio API operations.
#[derive(Debug, Error)]
pub enum TwilioError {
    /// Configuration is missing or incomplete.
    #[error("Twilio configuration required: {0}")]
    ConfigMissing(String),

    /// The transport produced no response at all.
    #[error("{0}")]
    ApiConnection(String),

    /// The API answered with a non-success status.
    #[error("Twilio API error {code} (HTTP {status}): {message}")]
    Api {
        message: String,
        code: i64,
        more_info: Option<String>,
        status: u16,
    },

    /// A literal did not match any known enumeration value.
    #[error("Invalid {kind} '{value}'")]
    InvalidValue { kind: &'static str, value: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl TwilioError {
    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for Twilio operations.
pub type Result<T> = core::result::Result<T, TwilioError>;
