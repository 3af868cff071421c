//! Session analytics and support chat.

use crate::error::TelemetryError;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// User metadata attached to the analytics session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifyMetadata {
    /// Application user id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Avatar URL, omitted when the user has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Settings for booting the support chat widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBoot {
    /// Widget application id.
    pub app_id: String,
    /// Side of the screen the widget docks to.
    pub alignment: String,
    /// Hide the floating launcher button.
    pub hide_default_launcher: bool,
    /// Signed-in user's email.
    pub email: String,
    /// Identity-provider user id.
    pub user_id: String,
    /// Link to the analytics session recording.
    pub session_url: String,
}

/// Telemetry sink.
///
/// Failures are never shown to the user. Implementations should log and
/// return rather than block the page.
pub trait Telemetry: Send + Sync {
    /// Attach the signed-in user to the analytics session.
    fn identify(&self, email: &str, metadata: &IdentifyMetadata);

    /// URL of the current analytics session.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError`] when analytics is disabled or the session
    /// has not been recorded.
    fn session_url(&self) -> impl Future<Output = Result<String, TelemetryError>> + Send;

    /// Start the support chat widget.
    fn boot_chat(&self, boot: &ChatBoot);

    /// Tear down the chat widget and end the identified session.
    fn shutdown(&self);
}

/// [`Telemetry`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn identify(&self, _email: &str, _metadata: &IdentifyMetadata) {}

    fn session_url(&self) -> impl Future<Output = Result<String, TelemetryError>> + Send {
        async { Err(TelemetryError::Disabled) }
    }

    fn boot_chat(&self, _boot: &ChatBoot) {}

    fn shutdown(&self) {}
}
