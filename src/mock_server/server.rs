//! Mock Twilio API server.
//!
//! Provides an axum-based HTTP server that simulates the Calls endpoint.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// Calls endpoint served from a background task on a loopback port.
pub struct MockServer {
    url: String,
    handle: JoinHandle<()>,
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Serve the default account's queued, ringing, in-progress and
    /// completed calls.
    pub async fn start() -> Self {
        Self::with_state(seeded_state(Fixtures::default_scenario())).await
    }

    /// Serve no calls; every update is a 404.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    pub async fn with_state(state: MockState) -> Self {
        let state = state.shared();
        let app = Self::create_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Failed to read bound address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server error");
        });

        Self {
            url: format!("http://{addr}"),
            handle,
            state,
        }
    }

    /// Base URL to hand to `TwilioClient::new`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Calls, redirects and recorded updates as the server sees them.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Stop serving. Later updates against `url()` get no response.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Router for the Calls update route and `/health`.
    pub fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route(
                "/2010-04-01/Accounts/:account_sid/Calls/:call_file",
                post(handlers::update_call),
            )
            .route("/health", get(health_check))
            .with_state(state)
    }
}

fn seeded_state(scenario: DefaultScenario) -> MockState {
    scenario
        .calls
        .into_iter()
        .fold(MockState::new(), MockState::with_call)
}

async fn health_check() -> &'static str {
    "ok"
}
