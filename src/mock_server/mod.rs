//! Mock Twilio API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Twilio
//! Calls endpoint for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server keeps call state
//! across requests and enforces the API's status transition rules.
//!
//! # Example
//!
//! ```ignore
//! use twilapi::mock_server::{Fixtures, MockServer, DEFAULT_ACCOUNT_SID, DEFAULT_AUTH_TOKEN};
//! use twilapi::{CallStatus, CallUpdater, TwilioClient, Updater};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = TwilioClient::new(DEFAULT_ACCOUNT_SID, DEFAULT_AUTH_TOKEN, server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let call = CallUpdater::new(Fixtures::IN_PROGRESS_CALL_SID)
//!         .with_status(CallStatus::Completed)
//!         .execute(&client)
//!         .await
//!         .unwrap();
//!     assert_eq!(call.status, CallStatus::Completed);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, DEFAULT_ACCOUNT_SID, DEFAULT_AUTH_TOKEN};
pub use server::MockServer;
pub use state::{MockState, RecordedUpdate};
