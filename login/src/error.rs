//! Error types for the login controller.

use portico_runtime::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for login page operations.
pub type Result<T> = std::result::Result<T, LoginError>;

/// Failure reported by the identity provider.
///
/// Provider failures are not classified: the text is shown to the user
/// verbatim, so `Display` is the only contract the form relies on.
///
/// # Examples
///
/// ```
/// # use portico_login::ProviderError;
/// let error = ProviderError::new("auth/wrong-password", "The password is invalid.");
/// assert_eq!(error.to_string(), "Error: The password is invalid.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Error: {message}")]
pub struct ProviderError {
    /// Provider-specific error code (e.g. `auth/email-already-in-use`).
    pub code: String,

    /// Human-readable message.
    pub message: String,
}

impl ProviderError {
    /// Create a provider error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// JSON form of the error, used for the OAuth error line.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }
}

/// Failure inside a telemetry collaborator.
///
/// Never surfaced to the user; only logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// Telemetry is switched off.
    #[error("telemetry is disabled")]
    Disabled,

    /// The analytics service could not produce a session URL.
    #[error("session URL unavailable: {0}")]
    SessionUrlUnavailable(String),
}

/// Errors returned by [`LoginPage`](crate::page::LoginPage) operations.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The underlying store rejected the action.
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_json_keeps_code_and_message() {
        let error = ProviderError::new("auth/popup-blocked", "Popup blocked");
        assert_eq!(
            error.to_json(),
            r#"{"code":"auth/popup-blocked","message":"Popup blocked"}"#
        );
    }

    #[test]
    fn login_error_wraps_store_error() {
        let error = LoginError::from(StoreError::ShutdownInProgress);
        assert_eq!(error.to_string(), "Store is shutting down");
    }
}
