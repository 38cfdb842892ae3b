//! Call updater.

use async_trait::async_trait;
use url::Url;

use crate::client::{RestClient, HTTP_STATUS_CODE_OK};
use crate::error::{Result, TwilioError};
use crate::http::{HttpMethod, Request};
use crate::models::{Call, CallStatus, RestException};
use crate::traits::Updater;

const CONNECTION_FAILURE: &str = "Call update failed: Unable to connect to server";

/// Modify an in-flight call: redirect it to new TwiML, hang it up, or
/// change its callbacks.
///
/// Only fields that were set are sent. Each `with_*` call replaces any
/// earlier value for the same field.
///
/// # Example
///
/// ```no_run
/// use twilapi::{CallStatus, CallUpdater, TwilioClient, Updater};
///
/// # async fn example() -> twilapi::Result<()> {
/// let client = TwilioClient::from_env()?;
/// let call = CallUpdater::new("CAxxxxxxxx")
///     .with_status(CallStatus::Completed)
///     .execute(&client)
///     .await?;
/// println!("{} is now {}", call.sid, call.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallUpdater {
    sid: String,
    url: Option<Url>,
    method: Option<HttpMethod>,
    status: Option<CallStatus>,
    fallback_url: Option<Url>,
    fallback_method: Option<HttpMethod>,
    status_callback: Option<Url>,
    status_callback_method: Option<HttpMethod>,
}

impl CallUpdater {
    /// Start an update for the call with the given sid.
    pub fn new(sid: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            url: None,
            method: None,
            status: None,
            fallback_url: None,
            fallback_method: None,
            status_callback: None,
            status_callback_method: None,
        }
    }

    /// A URL returning TwiML. The call is redirected to it immediately.
    ///
    /// The value sent is the parsed URL's normalized form, so
    /// `https://Example.COM` goes out as `https://example.com/`. The same
    /// holds for the other URL fields.
    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Method used to fetch `url`. The API defaults to `POST`.
    #[must_use]
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// `Canceled` hangs up queued or ringing calls only; `Completed` hangs
    /// up the call even when it is in progress.
    #[must_use]
    pub fn with_status(mut self, status: CallStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requested if fetching or executing the TwiML at `url` fails.
    #[must_use]
    pub fn with_fallback_url(mut self, fallback_url: Url) -> Self {
        self.fallback_url = Some(fallback_url);
        self
    }

    /// Method used to fetch `fallback_url`: `GET` or `POST`.
    #[must_use]
    pub fn with_fallback_method(mut self, fallback_method: HttpMethod) -> Self {
        self.fallback_method = Some(fallback_method);
        self
    }

    /// Requested when the call ends.
    #[must_use]
    pub fn with_status_callback(mut self, status_callback: Url) -> Self {
        self.status_callback = Some(status_callback);
        self
    }

    #[must_use]
    pub fn with_status_callback_method(mut self, status_callback_method: HttpMethod) -> Self {
        self.status_callback_method = Some(status_callback_method);
        self
    }

    /// The sid of the call being updated.
    pub fn sid(&self) -> &str {
        &self.sid
    }

    /// Form parameters `execute` would send, in field order.
    pub fn post_params(&self) -> Vec<(&'static str, String)> {
        let fields = [
            ("Url", self.url.as_ref().map(Url::to_string)),
            ("Method", self.method.map(|m| m.as_str().to_string())),
            ("Status", self.status.map(|s| s.as_str().to_string())),
            ("FallbackUrl", self.fallback_url.as_ref().map(Url::to_string)),
            (
                "FallbackMethod",
                self.fallback_method.map(|m| m.as_str().to_string()),
            ),
            (
                "StatusCallback",
                self.status_callback.as_ref().map(Url::to_string),
            ),
            (
                "StatusCallbackMethod",
                self.status_callback_method.map(|m| m.as_str().to_string()),
            ),
        ];

        fields
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }

    /// Build the exact request `execute` would send for `account_sid`.
    pub fn build_request(&self, account_sid: &str) -> Request {
        let template = format!(
            "/2010-04-01/Accounts/{{AccountSid}}/Calls/{}.json",
            urlencoding::encode(&self.sid)
        );
        let mut request = Request::new(HttpMethod::Post, &template, account_sid);
        for (name, value) in self.post_params() {
            request.add_post_param(name, value);
        }
        request
    }
}

impl From<&Call> for CallUpdater {
    fn from(call: &Call) -> Self {
        Self::new(call.sid.clone())
    }
}

#[async_trait]
impl Updater for CallUpdater {
    type Resource = Call;

    #[tracing::instrument(skip(client))]
    async fn execute<C>(self, client: &C) -> Result<Call>
    where
        C: RestClient + ?Sized,
    {
        let request = self.build_request(client.account_sid());
        let response = client
            .request(request)
            .await
            .ok_or_else(|| TwilioError::ApiConnection(CONNECTION_FAILURE.to_string()))?;

        if response.status_code() != HTTP_STATUS_CODE_OK {
            let exception = RestException::from_json(response.body())?;
            tracing::debug!(
                code = exception.code,
                status = exception.status,
                "call update rejected"
            );
            return Err(exception.into());
        }

        Call::from_json(response.body())
    }
}
