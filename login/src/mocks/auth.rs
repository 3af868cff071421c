//! Mock identity provider for testing.

use crate::error::ProviderError;
use crate::providers::{AuthProvider, OAuthProvider, SharedAuthContext};
use crate::state::{AuthSnapshot, Identity};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by [`MockAuthProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCall {
    /// `sign_in_with_email_and_password`
    SignIn {
        /// Email passed in.
        email: String,
        /// Password passed in.
        password: String,
    },
    /// `create_user_with_email_and_password`
    CreateUser {
        /// Email passed in.
        email: String,
        /// Password passed in.
        password: String,
    },
    /// `sign_in_with_redirect`
    Redirect(OAuthProvider),
}

#[derive(Debug, Default)]
struct Behaviour {
    email_error: Option<ProviderError>,
    redirect_error: Option<ProviderError>,
    delay: Option<Duration>,
    session: Option<(SharedAuthContext, Identity)>,
}

/// Mock identity provider.
///
/// Accepts everything by default. Clones share recorded calls and
/// behaviour.
#[derive(Debug, Clone, Default)]
pub struct MockAuthProvider {
    behaviour: Arc<Mutex<Behaviour>>,
    calls: Arc<Mutex<Vec<AuthCall>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAuthProvider {
    /// Create a mock that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that rejects email/password calls with `error`.
    #[must_use]
    pub fn rejecting(error: ProviderError) -> Self {
        let mock = Self::new();
        lock(&mock.behaviour).email_error = Some(error);
        mock
    }

    /// Reject OAuth redirects with `error`.
    #[must_use]
    pub fn with_redirect_error(self, error: ProviderError) -> Self {
        lock(&self.behaviour).redirect_error = Some(error);
        self
    }

    /// Wait `delay` before answering any call.
    #[must_use]
    pub fn with_delay(self, delay: Duration) -> Self {
        lock(&self.behaviour).delay = Some(delay);
        self
    }

    /// Publish `identity` as signed in on `context` after a successful
    /// email/password call, like a hosted provider would.
    #[must_use]
    pub fn signing_in(self, context: SharedAuthContext, identity: Identity) -> Self {
        lock(&self.behaviour).session = Some((context, identity));
        self
    }

    /// Calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<AuthCall> {
        lock(&self.calls).clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn email_call(&self, call: AuthCall) -> impl Future<Output = Result<(), ProviderError>> + Send {
        lock(&self.calls).push(call);

        let (error, delay, session) = {
            let behaviour = lock(&self.behaviour);
            (
                behaviour.email_error.clone(),
                behaviour.delay,
                behaviour.session.clone(),
            )
        };

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(error) = error {
                return Err(error);
            }
            if let Some((context, identity)) = session {
                context.publish(AuthSnapshot::signed_in(identity));
            }
            Ok(())
        }
    }
}

impl AuthProvider for MockAuthProvider {
    fn sign_in_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send {
        self.email_call(AuthCall::SignIn {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    fn create_user_with_email_and_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send {
        self.email_call(AuthCall::CreateUser {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    fn sign_in_with_redirect(
        &self,
        provider: OAuthProvider,
    ) -> impl Future<Output = Result<(), ProviderError>> + Send {
        lock(&self.calls).push(AuthCall::Redirect(provider));

        let (error, delay) = {
            let behaviour = lock(&self.behaviour);
            (behaviour.redirect_error.clone(), behaviour.delay)
        };

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            error.map_or(Ok(()), Err)
        }
    }
}
