//! Login page glue.
//!
//! [`LoginPage`] owns the store for one mounted page and keeps it fed with
//! snapshots from the application's [`AuthContext`].

use crate::actions::LoginAction;
use crate::environment::LoginEnvironment;
use crate::error::Result;
use crate::providers::{AuthContext, AuthProvider, LoadingIndicator, Subscription, Telemetry};
use crate::query::sign_up_flag;
use crate::reducers::LoginPageReducer;
use crate::state::{AuthSnapshot, Field, LoginPageState, Mode};
use crate::view::{self, PageView};
use portico_runtime::{EffectHandle, Store};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Store type behind a [`LoginPage`].
pub type LoginStore<P, L, T> =
    Store<LoginPageState, LoginAction, LoginEnvironment<P, L, T>, LoginPageReducer<P, L, T>>;

/// A mounted login page.
///
/// Dropping the page stops forwarding auth changes. Call
/// [`LoginPage::unmount`] to also discard provider results still in flight.
pub struct LoginPage<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    store: LoginStore<P, L, T>,
    subscription: Option<Subscription>,
    forwarder: Option<JoinHandle<()>>,
}

impl<P, L, T> LoginPage<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    /// Mount the page.
    ///
    /// The initial mode is read once from `query` (a URL or query string).
    /// The page subscribes to `context` before reading its current snapshot,
    /// so no change published during mounting is lost.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Store`](crate::LoginError::Store) if the store
    /// rejects the initial snapshot.
    #[tracing::instrument(skip(context, environment), name = "login_mount")]
    pub async fn mount<C>(
        query: &str,
        context: &C,
        environment: LoginEnvironment<P, L, T>,
    ) -> Result<Self>
    where
        C: AuthContext + ?Sized,
    {
        let flag = sign_up_flag(query, &environment.config.sign_up_param);
        let mode = Mode::from_sign_up_flag(flag);
        tracing::debug!(?mode, "Mounting login page");

        let store = Store::new(
            LoginPageState::new(mode),
            LoginPageReducer::new(),
            environment,
        );

        let (tx, mut rx) = mpsc::unbounded_channel::<AuthSnapshot>();
        let subscription = context.subscribe(Arc::new(move |snapshot| {
            if tx.send(snapshot).is_err() {
                tracing::trace!("Login page gone, dropping auth snapshot");
            }
        }));

        store
            .send(LoginAction::AuthChanged {
                snapshot: context.snapshot(),
            })
            .await?;

        let forward = store.clone();
        let forwarder = tokio::spawn(async move {
            while let Some(snapshot) = rx.recv().await {
                if let Err(error) = forward.send(LoginAction::AuthChanged { snapshot }).await {
                    tracing::debug!(%error, "Stopped forwarding auth snapshots");
                    break;
                }
            }
        });

        Ok(Self {
            store,
            subscription: Some(subscription),
            forwarder: Some(forwarder),
        })
    }

    /// Send an action to the page.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Store`](crate::LoginError::Store) if the store
    /// is shutting down.
    pub async fn send(&self, action: LoginAction) -> Result<EffectHandle> {
        Ok(self.store.send(action).await?)
    }

    /// Edit an input.
    ///
    /// # Errors
    ///
    /// See [`LoginPage::send`].
    pub async fn set_field(&self, field: Field, value: impl Into<String>) -> Result<EffectHandle> {
        self.send(LoginAction::FieldChanged {
            field,
            value: value.into(),
        })
        .await
    }

    /// Switch between sign-in and sign-up.
    ///
    /// # Errors
    ///
    /// See [`LoginPage::send`].
    pub async fn toggle_mode(&self) -> Result<EffectHandle> {
        self.send(LoginAction::ToggleMode).await
    }

    /// Submit the form.
    ///
    /// The returned handle completes once the provider call has finished and
    /// its result has been applied.
    ///
    /// # Errors
    ///
    /// See [`LoginPage::send`].
    pub async fn submit(&self) -> Result<EffectHandle> {
        self.send(LoginAction::Submit).await
    }

    /// Start the configured OAuth redirect.
    ///
    /// # Errors
    ///
    /// See [`LoginPage::send`].
    pub async fn sign_in_with_oauth(&self) -> Result<EffectHandle> {
        let provider = self.store.environment().config.oauth_provider;
        self.send(LoginAction::SignInWithOAuth { provider }).await
    }

    /// Current view.
    pub async fn view(&self) -> PageView {
        let config = &self.store.environment().config;
        self.store.state(|state| view::render(state, config)).await
    }

    /// Copy of the current state.
    pub async fn state(&self) -> LoginPageState {
        self.store.state(Clone::clone).await
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &LoginStore<P, L, T> {
        &self.store
    }

    /// Unmount the page.
    ///
    /// Unsubscribes from the auth context and cancels provider calls still
    /// in flight; their results never reach the form.
    ///
    /// # Errors
    ///
    /// See [`LoginPage::send`].
    pub async fn unmount(mut self) -> Result<()> {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }

        tracing::debug!("Unmounting login page");
        self.send(LoginAction::Deactivate).await?;
        Ok(())
    }
}

impl<P, L, T> Drop for LoginPage<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    fn drop(&mut self) {
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
    }
}
