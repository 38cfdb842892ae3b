//! Twilio API client.
//!
//! [`RestClient`] is the seam resource updaters execute against.
//! [`TwilioClient`] is the HTTP implementation that handles authentication
//! and transport.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use url::Url;

use crate::error::{Result, TwilioError};
use crate::http::{HttpMethod, Request, Response};

pub(crate) const DEFAULT_API_URL: &str = "https://api.twilio.com";
const USER_AGENT: &str = concat!("twilapi/", env!("CARGO_PKG_VERSION"));

/// Status code that marks a successful API call.
pub const HTTP_STATUS_CODE_OK: u16 = 200;

/// A client capable of executing API requests for one account.
///
/// `request` returns `None` when the transport could not produce any
/// response. Timeouts and cancellation are the implementation's concern.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// The account every request is scoped to.
    fn account_sid(&self) -> &str;

    /// Send a request and return the raw response, if one arrived.
    async fn request(&self, request: Request) -> Option<Response>;
}

/// HTTP client for the Twilio REST API.
///
/// Authenticates with HTTP basic auth (account sid / auth token).
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use twilapi::TwilioClient;
///
/// # fn example() -> twilapi::Result<()> {
/// // Create from environment variables
/// let client = TwilioClient::from_env()?;
///
/// // Or configure manually
/// let client = TwilioClient::new("ACxxxxxxxx", "auth-token", "https://api.twilio.com")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    base_url: Arc<Url>,
    account_sid: String,
    auth_token: String,
}

impl std::fmt::Debug for TwilioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioClient")
            .field("base_url", &self.base_url.as_str())
            .field("account_sid", &self.account_sid)
            .finish_non_exhaustive()
    }
}

impl TwilioClient {
    /// Create a client from environment variables.
    ///
    /// Uses `TWILIO_ACCOUNT_SID` and `TWILIO_AUTH_TOKEN` for authentication
    /// and optionally `TWILIO_API_URL` for the base URL (defaults to
    /// `https://api.twilio.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if either credential variable is not set.
    pub fn from_env() -> Result<Self> {
        let account_sid = env::var("TWILIO_ACCOUNT_SID").map_err(|_| {
            TwilioError::ConfigMissing("TWILIO_ACCOUNT_SID environment variable not set".to_string())
        })?;
        let auth_token = env::var("TWILIO_AUTH_TOKEN").map_err(|_| {
            TwilioError::ConfigMissing("TWILIO_AUTH_TOKEN environment variable not set".to_string())
        })?;

        let base_url = env::var("TWILIO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&account_sid, &auth_token, &base_url)
    }

    /// Create a new client with explicit credentials and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(account_sid: &str, auth_token: &str, base_url: &str) -> Result<Self> {
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(TwilioError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            account_sid: account_sid.to_string(),
            auth_token: auth_token.to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
            HttpMethod::Patch => Method::PATCH,
        }
    }
}

#[async_trait]
impl RestClient for TwilioClient {
    fn account_sid(&self) -> &str {
        &self.account_sid
    }

    #[tracing::instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    async fn request(&self, request: Request) -> Option<Response> {
        let url = match self.base_url.join(request.path().trim_start_matches('/')) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "could not resolve request path");
                return None;
            }
        };

        let mut builder = self
            .http
            .request(Self::reqwest_method(request.method()), url)
            .basic_auth(&self.account_sid, Some(&self.auth_token));

        builder = if request.method().has_body() {
            builder.form(request.post_params())
        } else {
            builder.query(request.post_params())
        };

        tracing::debug!(params = request.post_params().len(), "sending request");

        let response = match builder.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "request failed before a response arrived");
                return None;
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(error = %e, status, "failed to read response body");
                return None;
            }
        };

        tracing::debug!(status, "received response");
        Some(Response::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_debug() {
        let client = TwilioClient::new("AC123", "secret-token", "https://api.twilio.com").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("TwilioClient"));
        assert!(debug.contains("base_url"));
        assert!(debug.contains("AC123"));
        // Token should not be in debug output
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = TwilioClient::new("AC1", "t", "https://api.twilio.com").unwrap();
        let client2 = TwilioClient::new("AC1", "t", "https://api.twilio.com/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = TwilioClient::new("AC1", "t", "not a url");
        assert!(matches!(result, Err(TwilioError::UrlError(_))));
    }

    #[tokio::test]
    async fn test_post_sends_form_body_with_basic_auth() {
        let mock_server = MockServer::start().await;

        // base64("AC123:token")
        Mock::given(method("POST"))
            .and(path("/2010-04-01/Accounts/AC123/Calls/CA1.json"))
            .and(header("authorization", "Basic QUMxMjM6dG9rZW4="))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("Method=GET&Status=completed"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TwilioClient::new("AC123", "token", &mock_server.uri()).unwrap();
        let mut request = Request::new(
            HttpMethod::Post,
            "/2010-04-01/Accounts/{AccountSid}/Calls/CA1.json",
            client.account_sid(),
        );
        request.add_post_param("Status", "completed");
        request.add_post_param("Method", "GET");

        let response = client.request(request).await.unwrap();
        assert_eq!(response.status_code(), HTTP_STATUS_CODE_OK);
        assert_eq!(response.body(), "{}");
    }

    #[tokio::test]
    async fn test_get_sends_params_as_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/2010-04-01/Accounts/AC1/Calls.json"))
            .and(query_param("Status", "ringing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = TwilioClient::new("AC1", "t", &mock_server.uri()).unwrap();
        let mut request = Request::new(HttpMethod::Get, "/2010-04-01/Accounts/{AccountSid}/Calls.json", "AC1");
        request.add_post_param("Status", "ringing");

        let response = client.request(request).await.unwrap();
        assert_eq!(response.body(), "[]");
    }

    #[tokio::test]
    async fn test_non_success_status_still_returns_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"code":20404}"#))
            .mount(&mock_server)
            .await;

        let client = TwilioClient::new("AC1", "t", &mock_server.uri()).unwrap();
        let request = Request::new(HttpMethod::Post, "/anything", "AC1");

        let response = client.request(request).await.unwrap();
        assert_eq!(response.status_code(), 404);
    }

    #[tokio::test]
    async fn test_unreachable_server_returns_none() {
        // Port 9 (discard) on localhost is not expected to accept connections.
        let client = TwilioClient::new("AC1", "t", "http://127.0.0.1:9").unwrap();
        let request = Request::new(HttpMethod::Post, "/anything", "AC1");

        assert!(client.request(request).await.is_none());
    }
}
