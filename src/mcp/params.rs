//! MCP tool parameter types with JSON Schema support.

use schemars::JsonSchema;
use serde::Deserialize;
use url::Url;

use crate::{CallStatus, CallUpdater, HttpMethod, Result};

/// Parameters for the `update_call` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateCallParams {
    /// The sid of the call to update (`CA...`).
    pub sid: String,
    /// URL returning TwiML to redirect the call to.
    #[serde(default)]
    pub url: Option<String>,
    /// HTTP method used to fetch `url`.
    #[serde(default)]
    pub method: Option<HttpMethod>,
    /// Target status: `canceled` (queued/ringing calls) or `completed` (any call).
    #[serde(default)]
    pub status: Option<CallStatus>,
    /// URL requested if fetching `url` fails.
    #[serde(default)]
    pub fallback_url: Option<String>,
    /// HTTP method used to fetch `fallback_url`.
    #[serde(default)]
    pub fallback_method: Option<HttpMethod>,
    /// URL requested when the call ends.
    #[serde(default)]
    pub status_callback: Option<String>,
    /// HTTP method used to request `status_callback`.
    #[serde(default)]
    pub status_callback_method: Option<HttpMethod>,
}

impl UpdateCallParams {
    /// Convert into an updater, validating URL fields.
    ///
    /// # Errors
    ///
    /// Returns [`TwilioError::UrlError`](crate::TwilioError::UrlError) if a URL
    /// field does not parse.
    pub fn into_updater(self) -> Result<CallUpdater> {
        let mut updater = CallUpdater::new(self.sid);
        if let Some(url) = self.url {
            updater = updater.with_url(Url::parse(&url)?);
        }
        if let Some(method) = self.method {
            updater = updater.with_method(method);
        }
        if let Some(status) = self.status {
            updater = updater.with_status(status);
        }
        if let Some(url) = self.fallback_url {
            updater = updater.with_fallback_url(Url::parse(&url)?);
        }
        if let Some(method) = self.fallback_method {
            updater = updater.with_fallback_method(method);
        }
        if let Some(url) = self.status_callback {
            updater = updater.with_status_callback(Url::parse(&url)?);
        }
        if let Some(method) = self.status_callback_method {
            updater = updater.with_status_callback_method(method);
        }
        Ok(updater)
    }
}
