//! Updater trait for modifying resources.

use async_trait::async_trait;

use crate::client::RestClient;
use crate::error::Result;

/// A configured, single-use update of one resource.
///
/// Implementors collect optional fields, then `execute` sends exactly one
/// request and consumes the updater.
///
/// # Example
///
/// ```ignore
/// use twilapi::{CallStatus, CallUpdater, TwilioClient, Updater};
///
/// let client = TwilioClient::from_env()?;
/// let call = CallUpdater::new("CAxxxxxxxx")
///     .with_status(CallStatus::Completed)
///     .execute(&client)
///     .await?;
/// ```
#[async_trait]
pub trait Updater: Sized + Send {
    /// The resource type returned by a successful update.
    type Resource;

    /// Send the update and return the resource's new representation.
    ///
    /// # Errors
    ///
    /// Returns [`TwilioError::ApiConnection`](crate::TwilioError::ApiConnection)
    /// when no response arrives, [`TwilioError::Api`](crate::TwilioError::Api)
    /// for a non-success status, and a parse error for a malformed body.
    async fn execute<C>(self, client: &C) -> Result<Self::Resource>
    where
        C: RestClient + ?Sized;
}
