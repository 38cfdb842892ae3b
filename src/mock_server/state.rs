//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Twilio API server and
//! the call update rules it enforces.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::RwLock;
use url::Url;

use crate::{Call, CallStatus, HttpMethod, RestException};

const MORE_INFO_BASE: &str = "https://www.twilio.com/docs/errors";

/// A call update the server accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpdate {
    pub account_sid: String,
    pub call_sid: String,
    /// Form parameters exactly as received.
    pub params: BTreeMap<String, String>,
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Calls indexed by sid.
    pub calls: HashMap<String, Call>,

    /// Every accepted update, in arrival order.
    pub updates: Vec<RecordedUpdate>,

    /// Where each call was last redirected, by sid.
    pub redirects: HashMap<String, Url>,

    /// Optional basic-auth credentials (account sid, auth token). If set,
    /// requests must present them.
    pub required_credentials: Option<(String, String)>,
}

/// Build an error payload the way the API reports it.
pub(crate) fn rest_exception(status: u16, code: i64, message: impl Into<String>) -> RestException {
    RestException {
        code,
        message: message.into(),
        more_info: Some(format!("{MORE_INFO_BASE}/{code}")),
        status,
    }
}

fn invalid_param(name: &str, value: &str) -> RestException {
    rest_exception(400, 20001, format!("Invalid {name}: {value}"))
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a call to the state.
    pub fn with_call(mut self, call: Call) -> Self {
        self.calls.insert(call.sid.clone(), call);
        self
    }

    /// Require basic-auth credentials on every request.
    pub fn with_required_credentials(mut self, account_sid: &str, auth_token: &str) -> Self {
        self.required_credentials = Some((account_sid.to_string(), auth_token.to_string()));
        self
    }

    /// Get a call by sid.
    pub fn get_call(&self, sid: &str) -> Option<&Call> {
        self.calls.get(sid)
    }

    /// Updates recorded for one call.
    pub fn updates_for(&self, sid: &str) -> Vec<&RecordedUpdate> {
        self.updates.iter().filter(|u| u.call_sid == sid).collect()
    }

    /// Apply a form-encoded update to a call owned by `account_sid`.
    ///
    /// Unknown parameters are ignored. Nothing changes unless every
    /// parameter validates.
    pub fn update_call(
        &mut self,
        account_sid: &str,
        sid: &str,
        params: BTreeMap<String, String>,
    ) -> Result<&Call, RestException> {
        let now: DateTime<FixedOffset> = Utc::now().into();

        let call = self
            .calls
            .get(sid)
            .filter(|c| c.account_sid.as_deref() == Some(account_sid))
            .ok_or_else(|| {
                rest_exception(
                    404,
                    20404,
                    format!(
                        "The requested resource /2010-04-01/Accounts/{account_sid}/Calls/{sid}.json was not found"
                    ),
                )
            })?;

        let status = parse_param::<CallStatus>(&params, "Status")?;
        let redirect = match params.get("Url") {
            Some(raw) => Some(Url::parse(raw).map_err(|_| invalid_param("Url", raw))?),
            None => None,
        };
        for name in ["FallbackUrl", "StatusCallback"] {
            if let Some(raw) = params.get(name) {
                Url::parse(raw).map_err(|_| invalid_param(name, raw))?;
            }
        }
        for name in ["Method", "FallbackMethod", "StatusCallbackMethod"] {
            parse_param::<HttpMethod>(&params, name)?;
        }

        if call.status.is_terminal() {
            return Err(rest_exception(
                400,
                21220,
                "Call is not in-progress. Cannot redirect.",
            ));
        }

        let next_status = match status {
            None => None,
            Some(CallStatus::Canceled) => {
                if !matches!(call.status, CallStatus::Queued | CallStatus::Ringing) {
                    return Err(rest_exception(
                        400,
                        21220,
                        "Call is not queued or ringing. Cannot cancel.",
                    ));
                }
                Some(CallStatus::Canceled)
            }
            Some(CallStatus::Completed) => Some(CallStatus::Completed),
            Some(other) => return Err(invalid_param("Status", other.as_str())),
        };

        let call = self
            .calls
            .get_mut(sid)
            .ok_or_else(|| rest_exception(404, 20404, "The requested resource was not found"))?;

        if let Some(next) = next_status {
            call.status = next;
            if let Some(start) = call.start_time {
                call.end_time = Some(now);
                call.duration = Some((now - start).num_seconds().max(0) as u32);
            }
        }
        call.date_updated = Some(now);

        if let Some(url) = redirect {
            self.redirects.insert(sid.to_string(), url);
        }
        self.updates.push(RecordedUpdate {
            account_sid: account_sid.to_string(),
            call_sid: sid.to_string(),
            params,
        });

        self.calls
            .get(sid)
            .ok_or_else(|| rest_exception(404, 20404, "The requested resource was not found"))
    }
}

fn parse_param<T: std::str::FromStr>(
    params: &BTreeMap<String, String>,
    name: &str,
) -> Result<Option<T>, RestException> {
    params
        .get(name)
        .map(|raw| raw.parse::<T>().map_err(|_| invalid_param(name, raw)))
        .transpose()
}
