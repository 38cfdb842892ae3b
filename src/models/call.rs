//! Call resource model.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

use crate::error::{Result, TwilioError};
use crate::updaters::CallUpdater;

/// Lifecycle status of a call.
///
/// Only `Canceled` and `Completed` are accepted as update targets by the
/// API; the rest are reported states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Queued,
    Ringing,
    InProgress,
    Canceled,
    Completed,
    Busy,
    Failed,
    NoAnswer,
}

impl CallStatus {
    /// Canonical wire literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Ringing => "ringing",
            Self::InProgress => "in-progress",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
            Self::Busy => "busy",
            Self::Failed => "failed",
            Self::NoAnswer => "no-answer",
        }
    }

    /// The call has ended and can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Canceled | Self::Completed | Self::Busy | Self::Failed | Self::NoAnswer
        )
    }

    /// The call is queued, ringing, or connected.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = TwilioError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "ringing" => Ok(Self::Ringing),
            "in-progress" => Ok(Self::InProgress),
            "canceled" => Ok(Self::Canceled),
            "completed" => Ok(Self::Completed),
            "busy" => Ok(Self::Busy),
            "failed" => Ok(Self::Failed),
            "no-answer" => Ok(Self::NoAnswer),
            _ => Err(TwilioError::InvalidValue {
                kind: "call status",
                value: s.to_string(),
            }),
        }
    }
}

/// A voice call.
///
/// Field names follow the API's JSON representation. Timestamps use the
/// RFC 2822 format the API emits.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Unique call identifier (`CA...`).
    pub sid: String,

    /// Current lifecycle status.
    pub status: CallStatus,

    /// Owning account (`AC...`).
    #[serde(default)]
    pub account_sid: Option<String>,

    /// The call that created this one, for dialed legs.
    #[serde(default)]
    pub parent_call_sid: Option<String>,

    #[serde(default, with = "rfc2822")]
    pub date_created: Option<DateTime<FixedOffset>>,

    #[serde(default, with = "rfc2822")]
    pub date_updated: Option<DateTime<FixedOffset>>,

    /// Called party.
    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub to_formatted: Option<String>,

    /// Calling party.
    #[serde(default)]
    pub from: Option<String>,

    #[serde(default)]
    pub from_formatted: Option<String>,

    #[serde(default)]
    pub phone_number_sid: Option<String>,

    #[serde(default, with = "rfc2822")]
    pub start_time: Option<DateTime<FixedOffset>>,

    #[serde(default, with = "rfc2822")]
    pub end_time: Option<DateTime<FixedOffset>>,

    /// Length of the call in seconds. Sent by the API as a string.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub duration: Option<u32>,

    /// Charge for the call, as a decimal string (e.g. `-0.03000`).
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub price_unit: Option<String>,

    /// `inbound`, `outbound-api`, or `outbound-dial`.
    #[serde(default)]
    pub direction: Option<String>,

    #[serde(default)]
    pub answered_by: Option<String>,

    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(default)]
    pub forwarded_from: Option<String>,

    #[serde(default)]
    pub caller_name: Option<String>,

    #[serde(default)]
    pub group_sid: Option<String>,

    /// Resource URI relative to the API root.
    #[serde(default)]
    pub uri: Option<String>,

    #[serde(default)]
    pub subresource_uris: Option<BTreeMap<String, String>>,
}

impl Call {
    /// Parse a call from a JSON response body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Start an update for this call.
    pub fn updater(&self) -> CallUpdater {
        CallUpdater::from(self)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Optional RFC 2822 timestamps.
mod rfc2822 {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc2822()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(s) if !s.is_empty() => DateTime::parse_from_rfc2822(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}
