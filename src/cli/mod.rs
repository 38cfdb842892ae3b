//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the twilapi binary.

use clap::{Args, Parser, Subcommand, ValueEnum};
use url::Url;

use crate::client::DEFAULT_API_URL;
use crate::http::ACCOUNT_SID_PLACEHOLDER;
use crate::{CallStatus, CallUpdater, HttpMethod, TwilioClient, TwilioError};

/// Twilio API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "twilapi", about = "Twilio API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of key/value text.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Account sid used for authentication and request paths.
    #[arg(long, global = true, env = "TWILIO_ACCOUNT_SID")]
    pub account_sid: Option<String>,

    /// Auth token for the account.
    #[arg(long, global = true, env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Base URL of the API.
    #[arg(long, global = true, env = "TWILIO_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Build a client from the credential flags.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when the account sid or auth token is absent.
    pub fn client(&self) -> crate::Result<TwilioClient> {
        let account_sid = self.account_sid.as_deref().ok_or_else(|| {
            TwilioError::ConfigMissing("--account-sid or TWILIO_ACCOUNT_SID not set".to_string())
        })?;
        let auth_token = self.auth_token.as_deref().ok_or_else(|| {
            TwilioError::ConfigMissing("--auth-token or TWILIO_AUTH_TOKEN not set".to_string())
        })?;
        TwilioClient::new(account_sid, auth_token, &self.api_url)
    }

    /// Account sid to show in a dry run; the path placeholder when unset.
    pub fn dry_run_account_sid(&self) -> &str {
        self.account_sid.as_deref().unwrap_or(ACCOUNT_SID_PLACEHOLDER)
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Update a resource.
    Update {
        /// The type of resource to update.
        entity: Entity,

        /// The sid of the resource to update.
        sid: String,

        #[command(flatten)]
        fields: CallUpdateArgs,

        /// Print the request instead of sending it.
        #[arg(long)]
        dry_run: bool,
    },
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A voice call.
    #[value(alias = "calls")]
    Call,
}

/// Optional call fields; anything left out is not sent.
#[derive(Args, Debug, Default, Clone)]
pub struct CallUpdateArgs {
    /// URL returning TwiML to redirect the call to.
    #[arg(long)]
    pub url: Option<Url>,

    /// HTTP method used to fetch --url.
    #[arg(long)]
    pub method: Option<HttpMethod>,

    /// Target status (canceled or completed).
    #[arg(long)]
    pub status: Option<CallStatus>,

    /// URL requested if --url fails.
    #[arg(long)]
    pub fallback_url: Option<Url>,

    /// HTTP method used to fetch --fallback-url.
    #[arg(long)]
    pub fallback_method: Option<HttpMethod>,

    /// URL requested when the call ends.
    #[arg(long)]
    pub status_callback: Option<Url>,

    /// HTTP method used to request --status-callback.
    #[arg(long)]
    pub status_callback_method: Option<HttpMethod>,
}

impl CallUpdateArgs {
    /// Build an updater for `sid` carrying only the flags that were given.
    pub fn into_updater(self, sid: impl Into<String>) -> CallUpdater {
        let mut updater = CallUpdater::new(sid);
        if let Some(url) = self.url {
            updater = updater.with_url(url);
        }
        if let Some(method) = self.method {
            updater = updater.with_method(method);
        }
        if let Some(status) = self.status {
            updater = updater.with_status(status);
        }
        if let Some(url) = self.fallback_url {
            updater = updater.with_fallback_url(url);
        }
        if let Some(method) = self.fallback_method {
            updater = updater.with_fallback_method(method);
        }
        if let Some(url) = self.status_callback {
            updater = updater.with_status_callback(url);
        }
        if let Some(method) = self.status_callback_method {
            updater = updater.with_status_callback_method(method);
        }
        updater
    }
}
