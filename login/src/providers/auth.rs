//! Identity provider trait.

use crate::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

/// OAuth identity provider behind the redirect button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthProvider {
    /// Google.
    Google,
    /// GitHub.
    GitHub,
    /// Microsoft.
    Microsoft,
}

impl OAuthProvider {
    /// Label used in button text, e.g. `Google Sign In`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
            Self::Microsoft => "Microsoft",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Identity provider.
///
/// This trait abstracts over hosted identity services (Firebase Auth,
/// Cognito, Auth0, etc.). A successful call only means the provider accepted
/// the request; the resulting session is reported through
/// [`AuthContext`](super::AuthContext), not through the return value.
///
/// Each call is a single attempt. The login page never retries.
pub trait AuthProvider: Send + Sync {
    /// Sign in an existing account.
    ///
    /// # Errors
    ///
    /// Returns the provider's error when the credentials are rejected or the
    /// request fails.
    fn sign_in_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send;

    /// Create a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Returns the provider's error (e.g. the email is already in use, the
    /// password is too weak).
    fn create_user_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send;

    /// Start an OAuth redirect flow.
    ///
    /// On success the browser leaves the page, so the call normally never
    /// resolves in a way the page can observe.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the redirect could not be started.
    fn sign_in_with_redirect(
        &self,
        provider: OAuthProvider,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send;
}
