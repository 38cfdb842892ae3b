//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::{Call, CallStatus};

/// Account that owns every call in the default scenario.
pub const DEFAULT_ACCOUNT_SID: &str = "AC00000000000000000000000000000001";
/// Auth token paired with [`DEFAULT_ACCOUNT_SID`].
pub const DEFAULT_AUTH_TOKEN: &str = "test-auth-token";

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data the default mock server starts with.
pub struct DefaultScenario {
    pub calls: Vec<Call>,
}

impl Fixtures {
    /// Sid of the default scenario's queued call.
    pub const QUEUED_CALL_SID: &'static str = "CA00000000000000000000000000000001";
    /// Sid of the default scenario's ringing call.
    pub const RINGING_CALL_SID: &'static str = "CA00000000000000000000000000000002";
    /// Sid of the default scenario's in-progress call.
    pub const IN_PROGRESS_CALL_SID: &'static str = "CA00000000000000000000000000000003";
    /// Sid of the default scenario's completed call.
    pub const COMPLETED_CALL_SID: &'static str = "CA00000000000000000000000000000004";

    /// Create a call with the fields the API always returns.
    pub fn call(account_sid: &str, sid: &str, status: CallStatus) -> Call {
        let created: DateTime<FixedOffset> = (Utc::now() - Duration::minutes(5)).into();
        let uri = format!("/2010-04-01/Accounts/{account_sid}/Calls/{sid}.json");
        let subresource_uris = BTreeMap::from([
            (
                "notifications".to_string(),
                format!("/2010-04-01/Accounts/{account_sid}/Calls/{sid}/Notifications.json"),
            ),
            (
                "recordings".to_string(),
                format!("/2010-04-01/Accounts/{account_sid}/Calls/{sid}/Recordings.json"),
            ),
        ]);

        Call {
            sid: sid.to_string(),
            status,
            account_sid: Some(account_sid.to_string()),
            parent_call_sid: None,
            date_created: Some(created),
            date_updated: Some(created),
            to: Some("+14155551212".to_string()),
            to_formatted: Some("(415) 555-1212".to_string()),
            from: Some("+15017122661".to_string()),
            from_formatted: Some("(501) 712-2661".to_string()),
            phone_number_sid: None,
            start_time: None,
            end_time: None,
            duration: None,
            price: None,
            price_unit: Some("USD".to_string()),
            direction: Some("outbound-api".to_string()),
            answered_by: None,
            api_version: Some("2010-04-01".to_string()),
            forwarded_from: None,
            caller_name: None,
            group_sid: None,
            uri: Some(uri),
            subresource_uris: Some(subresource_uris),
        }
    }

    /// Create a connected call that started a minute ago.
    pub fn in_progress_call(account_sid: &str, sid: &str) -> Call {
        let mut call = Self::call(account_sid, sid, CallStatus::InProgress);
        call.start_time = Some((Utc::now() - Duration::minutes(1)).into());
        call
    }

    /// Create a finished call with duration and price.
    pub fn completed_call(account_sid: &str, sid: &str) -> Call {
        let mut call = Self::call(account_sid, sid, CallStatus::Completed);
        let end: DateTime<FixedOffset> = (Utc::now() - Duration::minutes(1)).into();
        call.start_time = Some(end - Duration::seconds(42));
        call.end_time = Some(end);
        call.duration = Some(42);
        call.price = Some("-0.01400".to_string());
        call
    }

    /// One call in each of queued, ringing, in-progress, and completed.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            calls: vec![
                Self::call(DEFAULT_ACCOUNT_SID, Self::QUEUED_CALL_SID, CallStatus::Queued),
                Self::call(DEFAULT_ACCOUNT_SID, Self::RINGING_CALL_SID, CallStatus::Ringing),
                Self::in_progress_call(DEFAULT_ACCOUNT_SID, Self::IN_PROGRESS_CALL_SID),
                Self::completed_call(DEFAULT_ACCOUNT_SID, Self::COMPLETED_CALL_SID),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_calls_survive_json() {
        let call = Fixtures::completed_call(DEFAULT_ACCOUNT_SID, "CA1");
        let json = serde_json::to_string(&call).unwrap();
        let back = Call::from_json(&json).unwrap();

        assert_eq!(back.sid, "CA1");
        assert_eq!(back.duration, Some(42));
        assert_eq!(back.status, CallStatus::Completed);
        assert!(back.end_time.is_some());
    }

    #[test]
    fn default_scenario_covers_active_and_terminal_calls() {
        let scenario = Fixtures::default_scenario();
        assert_eq!(scenario.calls.len(), 4);
        assert!(scenario.calls.iter().any(|c| c.is_terminal()));
        assert!(scenario.calls.iter().any(|c| c.status == CallStatus::InProgress));
    }
}
