//! Call endpoint handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use tokio::sync::RwLock;

use crate::mock_server::state::{rest_exception, MockState};
use crate::RestException;

fn error_response(exception: RestException) -> Response {
    let status = StatusCode::from_u16(exception.status).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(exception)).into_response()
}

/// Decode `Authorization: Basic ...` into (user, password).
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64_STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// POST /2010-04-01/Accounts/{AccountSid}/Calls/{CallSid}.json
pub async fn update_call(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((account_sid, call_file)): Path<(String, String)>,
    headers: HeaderMap,
    Form(params): Form<BTreeMap<String, String>>,
) -> Response {
    let mut state = state.write().await;

    if let Some(required) = &state.required_credentials {
        if basic_credentials(&headers).as_ref() != Some(required) {
            return error_response(rest_exception(401, 20003, "Authenticate"));
        }
    }

    let Some(sid) = call_file.strip_suffix(".json") else {
        return error_response(rest_exception(
            404,
            20404,
            format!("The requested resource /2010-04-01/Accounts/{account_sid}/Calls/{call_file} was not found"),
        ));
    };
    let sid = urlencoding::decode(sid)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| sid.to_string());

    tracing::debug!(%account_sid, %sid, params = params.len(), "mock call update");

    match state.update_call(&account_sid, &sid, params) {
        Ok(call) => (StatusCode::OK, Json(call.clone())).into_response(),
        Err(exception) => error_response(exception),
    }
}
