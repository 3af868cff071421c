//! Form state reducer.
//!
//! Owns field values, inline errors, the active mode, and the provider
//! calls made on behalf of the form.
//!
//! # Flow
//!
//! 1. The user edits fields (`FieldChanged`)
//! 2. `Submit` validates; failures stay inline and nothing is sent
//! 3. A valid submit starts one cancellable provider call for the mode
//! 4. The result comes back tagged with its attempt; stale results are dropped
//! 5. `ToggleMode` resets the form and cancels the call in flight
//! 6. `Deactivate` drops everything still pending
//!
//! Success is not handled here: the auth context reports the new session
//! and the session gate swaps the form for the application.

use crate::actions::LoginAction;
use crate::environment::LoginEnvironment;
use crate::providers::{AuthProvider, LoadingIndicator, OAuthProvider, Telemetry};
use crate::state::{AttemptId, Credentials, Field, FormState, Mode};
use crate::validation;
use portico_core::effect::{Effect, EffectId};
use portico_core::reducer::Reducer;
use portico_core::{SmallVec, smallvec};
use std::marker::PhantomData;

/// Cancellation slot for the email/password provider call.
pub const SUBMIT: EffectId = EffectId::new("login.submit");

/// Cancellation slot for the OAuth redirect call.
pub const OAUTH_REDIRECT: EffectId = EffectId::new("login.oauth-redirect");

/// Form state reducer.
#[derive(Debug)]
pub struct FormReducer<P, L, T> {
    _phantom: PhantomData<fn() -> (P, L, T)>,
}

impl<P, L, T> FormReducer<P, L, T> {
    /// Create a new form reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<P, L, T> Default for FormReducer<P, L, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, L, T> Clone for FormReducer<P, L, T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<P, L, T> FormReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    fn submit_effect(
        auth: P,
        mode: Mode,
        attempt: AttemptId,
        credentials: Credentials,
    ) -> Effect<LoginAction> {
        Effect::future(async move {
            let result = match mode {
                Mode::SignIn => {
                    auth.sign_in_with_email_and_password(&credentials.email, &credentials.password)
                        .await
                },
                Mode::SignUp => {
                    auth.create_user_with_email_and_password(
                        &credentials.email,
                        &credentials.password,
                    )
                    .await
                },
            };

            Some(match result {
                Ok(()) => LoginAction::SubmitSucceeded { attempt },
                Err(error) => LoginAction::SubmitFailed { attempt, error },
            })
        })
        .cancellable(SUBMIT)
    }

    fn redirect_effect(auth: P, provider: OAuthProvider) -> Effect<LoginAction> {
        Effect::future(async move {
            match auth.sign_in_with_redirect(provider).await {
                Ok(()) => None,
                Err(error) => Some(LoginAction::OAuthRedirectFailed {
                    message: error.to_json(),
                }),
            }
        })
        .cancellable(OAUTH_REDIRECT)
    }
}

impl<P, L, T> Reducer for FormReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    type State = FormState;
    type Action = LoginAction;
    type Environment = LoginEnvironment<P, L, T>;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // FieldChanged: store the value, clear that field's error
            // ═══════════════════════════════════════════════════════════════
            LoginAction::FieldChanged { field, value } => {
                if field == Field::ConfirmPassword && !state.mode.is_sign_up() {
                    tracing::trace!("Ignoring confirm-password edit in sign-in mode");
                    return smallvec![Effect::None];
                }

                state.fields.set(field, value);
                state.errors.remove(field);
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // ToggleMode: flip mode and start from a clean form
            // ═══════════════════════════════════════════════════════════════
            LoginAction::ToggleMode => {
                state.mode = state.mode.toggled();
                state.fields = Default::default();
                state.errors.clear();
                state.oauth_error = None;

                tracing::debug!(mode = ?state.mode, "Toggled login mode");

                if let Some(attempt) = state.in_flight.take() {
                    tracing::debug!(attempt = attempt.0, "Cancelling in-flight submit");
                    return smallvec![Effect::Cancel(SUBMIT)];
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Submit: validate, then one provider call for the current mode
            // ═══════════════════════════════════════════════════════════════
            LoginAction::Submit => {
                if !state.active {
                    return smallvec![Effect::None];
                }

                let credentials = match validation::validate(state.mode, &state.fields) {
                    Ok(credentials) => credentials,
                    Err(errors) => {
                        tracing::debug!(errors = errors.len(), "Form failed validation");
                        state.errors = errors;
                        return smallvec![Effect::None];
                    },
                };

                state.errors.clear();
                state.attempts += 1;
                let attempt = AttemptId(state.attempts);
                if let Some(previous) = state.in_flight.replace(attempt) {
                    tracing::debug!(previous = previous.0, "Superseding in-flight submit");
                }

                tracing::info!(attempt = attempt.0, mode = ?state.mode, "Submitting credentials");

                smallvec![Self::submit_effect(
                    env.auth.clone(),
                    state.mode,
                    attempt,
                    credentials
                )]
            },

            // ═══════════════════════════════════════════════════════════════
            // SubmitSucceeded: stop waiting; the auth context does the rest
            // ═══════════════════════════════════════════════════════════════
            LoginAction::SubmitSucceeded { attempt } => {
                if state.in_flight == Some(attempt) {
                    state.in_flight = None;
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // SubmitFailed: show the provider's message under the password
            // ═══════════════════════════════════════════════════════════════
            LoginAction::SubmitFailed { attempt, error } => {
                if !state.active || state.in_flight != Some(attempt) {
                    tracing::debug!(attempt = attempt.0, "Dropping stale submit result");
                    return smallvec![Effect::None];
                }

                tracing::warn!(code = %error.code, "Provider rejected credentials");
                state.in_flight = None;
                state.errors.set(Field::Password, error.to_string());
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // SignInWithOAuth: start the redirect; fields are left alone
            // ═══════════════════════════════════════════════════════════════
            LoginAction::SignInWithOAuth { provider } => {
                if !state.active {
                    return smallvec![Effect::None];
                }

                state.oauth_error = None;
                tracing::info!(%provider, "Starting OAuth redirect");
                smallvec![Self::redirect_effect(env.auth.clone(), provider)]
            },

            LoginAction::OAuthRedirectFailed { message } => {
                if state.active {
                    tracing::warn!("OAuth redirect failed");
                    state.oauth_error = Some(message);
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════════
            // Deactivate: the view is gone, nothing may land after this
            // ═══════════════════════════════════════════════════════════════
            LoginAction::Deactivate => {
                state.active = false;
                state.in_flight = None;
                smallvec![Effect::Cancel(SUBMIT), Effect::Cancel(OAUTH_REDIRECT)]
            },

            LoginAction::AuthChanged { .. } | LoginAction::TelemetryStopped => smallvec![Effect::None],
        }
    }
}
