//! E2E tests using the mock Twilio server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic call scenarios rather than individual requests.

#![cfg(feature = "test-server")]

use twilapi::mock_server::{
    Fixtures, MockServer, MockState, DEFAULT_ACCOUNT_SID, DEFAULT_AUTH_TOKEN,
};
use twilapi::{CallStatus, CallUpdater, HttpMethod, TwilioClient, TwilioError, Updater};
use url::Url;

fn client_for(server: &MockServer) -> TwilioClient {
    TwilioClient::new(DEFAULT_ACCOUNT_SID, DEFAULT_AUTH_TOKEN, server.url()).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_server_is_connection_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    server.shutdown().await;

    let result = CallUpdater::new(Fixtures::IN_PROGRESS_CALL_SID)
        .with_status(CallStatus::Completed)
        .execute(&client)
        .await;

    assert!(matches!(result, Err(TwilioError::ApiConnection(_))));
}

// =============================================================================
// Call Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_redirect_then_hang_up_workflow() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    // Step 1: Redirect the live call
    let call = CallUpdater::new(Fixtures::IN_PROGRESS_CALL_SID)
        .with_url(Url::parse("https://example.com/hold-music").unwrap())
        .with_method(HttpMethod::Get)
        .execute(&client)
        .await
        .expect("Failed to redirect call");

    assert_eq!(call.status, CallStatus::InProgress);

    // Step 2: Hang it up, starting from the returned resource
    let call = call
        .updater()
        .with_status(CallStatus::Completed)
        .execute(&client)
        .await
        .expect("Failed to complete call");

    assert_eq!(call.status, CallStatus::Completed);
    assert!(call.end_time.is_some());

    // Step 3: Verify what the server saw
    let state = server.state();
    let state = state.read().await;
    let updates = state.updates_for(Fixtures::IN_PROGRESS_CALL_SID);
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].params.len(), 2);
    assert_eq!(updates[0].params["Method"], "GET");
    assert_eq!(updates[1].params.len(), 1);
    assert_eq!(updates[1].params["Status"], "completed");
    assert_eq!(
        state.redirects[Fixtures::IN_PROGRESS_CALL_SID].as_str(),
        "https://example.com/hold-music"
    );
    drop(state);

    server.shutdown().await;
}

#[tokio::test]
async fn test_cancel_ringing_call() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let call = CallUpdater::new(Fixtures::RINGING_CALL_SID)
        .with_status(CallStatus::Canceled)
        .execute(&client)
        .await
        .expect("Failed to cancel call");

    assert_eq!(call.status, CallStatus::Canceled);

    server.shutdown().await;
}

#[tokio::test]
async fn test_cancel_in_progress_call_is_rejected() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = CallUpdater::new(Fixtures::IN_PROGRESS_CALL_SID)
        .with_status(CallStatus::Canceled)
        .execute(&client)
        .await
        .unwrap_err();

    match err {
        TwilioError::Api {
            code,
            status,
            more_info,
            ..
        } => {
            assert_eq!(code, 21220);
            assert_eq!(status, 400);
            assert_eq!(
                more_info.as_deref(),
                Some("https://www.twilio.com/docs/errors/21220")
            );
        }
        other => panic!("expected API error, got {other:?}"),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_completed_call_cannot_be_redirected() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = CallUpdater::new(Fixtures::COMPLETED_CALL_SID)
        .with_url(Url::parse("https://example.com/twiml").unwrap())
        .execute(&client)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));

    server.shutdown().await;
}

#[tokio::test]
async fn test_call_not_found() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let err = CallUpdater::new("CAdoesnotexist")
        .with_status(CallStatus::Completed)
        .execute(&client)
        .await
        .unwrap_err();

    let err_str = err.to_string();
    assert!(
        err_str.contains("not found") && err_str.contains("20404"),
        "Error should indicate not found: {}",
        err_str
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_other_accounts_calls_are_invisible() {
    let state = MockState::new().with_call(Fixtures::in_progress_call("ACother", "CA1"));
    let server = MockServer::with_state(state).await;
    let client = client_for(&server);

    let err = CallUpdater::new("CA1").execute(&client).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    server.shutdown().await;
}

#[tokio::test]
async fn test_credentials_are_checked() {
    let state = MockState::new()
        .with_call(Fixtures::in_progress_call(DEFAULT_ACCOUNT_SID, "CA1"))
        .with_required_credentials(DEFAULT_ACCOUNT_SID, DEFAULT_AUTH_TOKEN);
    let server = MockServer::with_state(state).await;

    let good = client_for(&server);
    let bad = TwilioClient::new(DEFAULT_ACCOUNT_SID, "stale-token", server.url()).unwrap();

    let err = CallUpdater::new("CA1").execute(&bad).await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let call = CallUpdater::new("CA1")
        .with_status(CallStatus::Completed)
        .execute(&good)
        .await
        .expect("valid credentials should be accepted");
    assert_eq!(call.status, CallStatus::Completed);

    server.shutdown().await;
}
