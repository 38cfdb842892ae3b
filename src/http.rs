//! Transport-level request and response types.
//!
//! These are the values exchanged between resource updaters and a
//! [`RestClient`](crate::RestClient). They carry no I/O of their own.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TwilioError;

/// Placeholder in path templates replaced by the client's account sid.
pub const ACCOUNT_SID_PLACEHOLDER: &str = "{AccountSid}";

/// HTTP method, as sent on the wire and as accepted for TwiML fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl HttpMethod {
    /// Canonical wire literal.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Patch => "PATCH",
        }
    }

    /// Whether parameters travel in a form body rather than the query string.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = TwilioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "PATCH" => Ok(Self::Patch),
            _ => Err(TwilioError::InvalidValue {
                kind: "HTTP method",
                value: s.to_string(),
            }),
        }
    }
}

/// An API request relative to the client's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: HttpMethod,
    path: String,
    post_params: BTreeMap<String, String>,
}

impl Request {
    /// Create a request, substituting `{AccountSid}` in the path template.
    pub fn new(method: HttpMethod, template: &str, account_sid: &str) -> Self {
        Self {
            method,
            path: template.replace(ACCOUNT_SID_PLACEHOLDER, account_sid),
            post_params: BTreeMap::new(),
        }
    }

    /// Add a body parameter, replacing any earlier value under the same name.
    pub fn add_post_param(&mut self, name: &str, value: impl Into<String>) {
        self.post_params.insert(name.to_string(), value.into());
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Resolved path, starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn post_params(&self) -> &BTreeMap<String, String> {
        &self.post_params
    }
}

/// A raw API response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status_code: u16,
    body: String,
}

impl Response {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_substitutes_account_sid() {
        let request = Request::new(
            HttpMethod::Post,
            "/2010-04-01/Accounts/{AccountSid}/Calls/CA1.json",
            "AC123",
        );
        assert_eq!(request.path(), "/2010-04-01/Accounts/AC123/Calls/CA1.json");
        assert_eq!(request.method(), HttpMethod::Post);
        assert!(request.post_params().is_empty());
    }

    #[test]
    fn add_post_param_last_value_wins() {
        let mut request = Request::new(HttpMethod::Post, "/x", "AC1");
        request.add_post_param("Status", "canceled");
        request.add_post_param("Status", "completed");
        assert_eq!(request.post_params().len(), 1);
        assert_eq!(request.post_params()["Status"], "completed");
    }

    #[test]
    fn http_method_parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("Post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert!(matches!(
            "FETCH".parse::<HttpMethod>(),
            Err(TwilioError::InvalidValue { kind: "HTTP method", .. })
        ));
    }

    #[test]
    fn http_method_serde_matches_wire_literal() {
        for method in [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
            HttpMethod::Patch,
        ] {
            let json = serde_json::to_value(method).unwrap();
            assert_eq!(json, serde_json::Value::String(method.as_str().to_string()));
        }
    }
}
