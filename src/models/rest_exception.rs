//! Error payload returned by the API on failed requests.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwilioError};

/// Body of a non-success API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestException {
    /// Twilio error code (e.g. `20404`).
    pub code: i64,
    /// Human-readable description.
    pub message: String,
    /// Link to the error's documentation page.
    #[serde(default)]
    pub more_info: Option<String>,
    /// HTTP status the API reported.
    pub status: u16,
}

impl RestException {
    /// Parse an error payload from a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

impl From<RestException> for TwilioError {
    fn from(e: RestException) -> Self {
        TwilioError::Api {
            message: e.message,
            code: e.code,
            more_info: e.more_info,
            status: e.status,
        }
    }
}
