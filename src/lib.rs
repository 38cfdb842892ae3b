//! Twilio API client library.
//!
//! A Rust library for updating calls through the Twilio REST API. Each
//! mutation is a single-use updater that collects optional fields and
//! sends exactly one request through a [`RestClient`].
//!
//! # Quick Start
//!
//! ```no_run
//! use twilapi::{CallStatus, CallUpdater, HttpMethod, TwilioClient, Updater};
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> twilapi::Result<()> {
//!     // Create client from environment variables
//!     let client = TwilioClient::from_env()?;
//!
//!     // Redirect a live call to new TwiML
//!     let call = CallUpdater::new("CAxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx")
//!         .with_url(Url::parse("https://example.com/twiml")?)
//!         .with_method(HttpMethod::Get)
//!         .execute(&client)
//!         .await?;
//!     println!("Call {} is {}", call.sid, call.status);
//!
//!     // Hang it up
//!     let call = call.updater().with_status(CallStatus::Completed).execute(&client).await?;
//!     println!("Call {} is {}", call.sid, call.status);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! A failed update is one of:
//!
//! - [`TwilioError::ApiConnection`] - no response arrived
//! - [`TwilioError::Api`] - the API answered with a non-success status
//! - [`TwilioError::ParseError`] - the response body was malformed
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `TWILIO_ACCOUNT_SID` (required) - Account the client acts for
//! - `TWILIO_AUTH_TOKEN` (required) - Auth token for that account
//! - `TWILIO_API_URL` (optional) - Base URL (defaults to `https://api.twilio.com`)

mod client;
mod error;
mod http;
mod models;
mod output;
mod traits;
mod updaters;

pub mod cli;
pub mod mcp;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{RestClient, TwilioClient, HTTP_STATUS_CODE_OK};
pub use error::{Result, TwilioError};
pub use http::{HttpMethod, Request, Response};
pub use output::PrettyPrint;

// Re-export traits
pub use traits::Updater;

// Re-export models
pub use models::{Call, CallStatus, RestException};

// Re-export updaters
pub use updaters::CallUpdater;
