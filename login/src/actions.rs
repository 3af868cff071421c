//! Login page actions.
//!
//! Actions are inputs to the page reducer: user intent from the view, results
//! of provider calls, and changes pushed by the auth context.

use crate::error::ProviderError;
use crate::providers::OAuthProvider;
use crate::state::{AttemptId, AuthSnapshot, Field};
use serde::{Deserialize, Serialize};

/// Login page action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Form
    // ═══════════════════════════════════════════════════════════════════════
    /// The user edited an input.
    FieldChanged {
        /// Edited input.
        field: Field,
        /// New value.
        value: String,
    },

    /// The user switched between sign-in and sign-up.
    ToggleMode,

    /// The user submitted the form.
    Submit,

    /// The provider accepted the credentials.
    ///
    /// The auth context takes it from here; the form only stops waiting.
    SubmitSucceeded {
        /// Attempt the result belongs to.
        attempt: AttemptId,
    },

    /// The provider rejected the credentials.
    SubmitFailed {
        /// Attempt the result belongs to.
        attempt: AttemptId,
        /// Provider error.
        error: ProviderError,
    },

    /// The user chose the OAuth button.
    SignInWithOAuth {
        /// Provider to redirect to.
        provider: OAuthProvider,
    },

    /// The redirect could not be started.
    OAuthRedirectFailed {
        /// JSON-serialized provider error.
        message: String,
    },

    /// The page is going away; drop pending results.
    Deactivate,

    // ═══════════════════════════════════════════════════════════════════════
    // Session
    // ═══════════════════════════════════════════════════════════════════════
    /// The auth context changed.
    AuthChanged {
        /// New snapshot.
        snapshot: AuthSnapshot,
    },

    /// Telemetry finished shutting down after a sign-out.
    TelemetryStopped,
}
