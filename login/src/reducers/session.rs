//! Session gate reducer.
//!
//! Derives what the page shows from the auth context, and bootstraps
//! telemetry once per signed-in identity.
//!
//! | Snapshot | Phase | Side effect |
//! |---|---|---|
//! | `is_auth_loading` | `Loading` | `set_is_loading(true)` |
//! | logged in, new identity | `Authenticated` | identify, then boot chat |
//! | logged out after a bootstrap | `Unauthenticated` | telemetry shutdown |
//!
//! A bootstrap requested while a shutdown is still running is held back
//! until `TelemetryStopped` arrives, so telemetry calls never interleave.

use crate::actions::LoginAction;
use crate::config::ChatConfig;
use crate::environment::LoginEnvironment;
use crate::providers::{AuthProvider, ChatBoot, IdentifyMetadata, LoadingIndicator, Telemetry};
use crate::state::{AuthSnapshot, GatePhase, Identity, SessionState};
use portico_core::effect::{Effect, EffectId};
use portico_core::reducer::Reducer;
use portico_core::{SmallVec, smallvec};
use std::marker::PhantomData;

/// Cancellation slot for the telemetry bootstrap.
pub const TELEMETRY: EffectId = EffectId::new("login.telemetry");

/// Session gate reducer.
#[derive(Debug)]
pub struct SessionReducer<P, L, T> {
    _phantom: PhantomData<fn() -> (P, L, T)>,
}

impl<P, L, T> SessionReducer<P, L, T> {
    /// Create a new session gate reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<P, L, T> Default for SessionReducer<P, L, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, L, T> Clone for SessionReducer<P, L, T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<P, L, T> SessionReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    fn bootstrap_effect(telemetry: T, chat: ChatConfig, identity: Identity) -> Effect<LoginAction> {
        Effect::future(async move {
            let metadata = IdentifyMetadata {
                id: identity.id.clone(),
                name: identity.name.clone(),
                avatar: identity.photo_url.clone(),
            };
            telemetry.identify(&identity.email, &metadata);

            match telemetry.session_url().await {
                Ok(session_url) => {
                    telemetry.boot_chat(&ChatBoot {
                        app_id: chat.app_id,
                        alignment: chat.alignment,
                        hide_default_launcher: chat.hide_default_launcher,
                        email: identity.email,
                        user_id: identity.uid,
                        session_url,
                    });
                    tracing::debug!("Support chat booted");
                },
                Err(error) => {
                    tracing::debug!(%error, "Skipping support chat boot");
                },
            }

            None
        })
        .cancellable(TELEMETRY)
    }

    fn shutdown_effect(telemetry: T) -> Effect<LoginAction> {
        Effect::future(async move {
            telemetry.shutdown();
            Some(LoginAction::TelemetryStopped)
        })
    }

    fn bootstrap_if_needed(
        state: &mut SessionState,
        env: &LoginEnvironment<P, L, T>,
    ) -> SmallVec<[Effect<LoginAction>; 4]> {
        if state.phase != GatePhase::Authenticated {
            return smallvec![Effect::None];
        }
        let Some(identity) = state.identity.clone() else {
            tracing::debug!("Signed in without an identity yet");
            return smallvec![Effect::None];
        };
        if state.bootstrapped.as_ref() == Some(&identity) {
            return smallvec![Effect::None];
        }
        if state.shutdown_pending {
            tracing::debug!("Telemetry still shutting down, deferring bootstrap");
            return smallvec![Effect::None];
        }

        tracing::info!(user_id = %identity.id, "Bootstrapping telemetry");
        state.bootstrapped = Some(identity.clone());
        smallvec![Self::bootstrap_effect(
            env.telemetry.clone(),
            env.config.chat.clone(),
            identity
        )]
    }

    fn on_snapshot(
        state: &mut SessionState,
        snapshot: AuthSnapshot,
        env: &LoginEnvironment<P, L, T>,
    ) -> SmallVec<[Effect<LoginAction>; 4]> {
        let phase = GatePhase::from_snapshot(&snapshot);
        if phase != state.phase {
            tracing::debug!(from = ?state.phase, to = ?phase, "Session gate transition");
        }
        state.phase = phase;
        state.identity = snapshot.admin;

        match phase {
            GatePhase::Loading => {
                let loading = env.loading.clone();
                smallvec![Effect::future(async move {
                    loading.set_is_loading(true);
                    None
                })]
            },
            GatePhase::Authenticated => Self::bootstrap_if_needed(state, env),
            GatePhase::Unauthenticated => {
                if state.bootstrapped.take().is_none() {
                    return smallvec![Effect::None];
                }

                tracing::info!("Signed out, shutting down telemetry");
                state.shutdown_pending = true;
                smallvec![
                    Effect::Cancel(TELEMETRY),
                    Self::shutdown_effect(env.telemetry.clone())
                ]
            },
        }
    }
}

impl<P, L, T> Reducer for SessionReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    type State = SessionState;
    type Action = LoginAction;
    type Environment = LoginEnvironment<P, L, T>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            LoginAction::AuthChanged { snapshot } => Self::on_snapshot(state, snapshot, env),
            LoginAction::TelemetryStopped => {
                state.shutdown_pending = false;
                Self::bootstrap_if_needed(state, env)
            },
            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoginConfig;
    use crate::mocks::{MockAuthProvider, RecordingTelemetry};
    use crate::providers::LoadingFlag;
    use portico_testing::{ReducerTest, assertions};

    type TestReducer = SessionReducer<MockAuthProvider, LoadingFlag, RecordingTelemetry>;

    fn env() -> LoginEnvironment<MockAuthProvider, LoadingFlag, RecordingTelemetry> {
        LoginEnvironment::new(
            MockAuthProvider::new(),
            LoadingFlag::new(),
            RecordingTelemetry::new(),
            LoginConfig::default(),
        )
    }

    fn ada() -> Identity {
        Identity {
            id: "42".to_string(),
            uid: "fb-42".to_string(),
            email: "ada@example.com".to_string(),
            name: "Ada".to_string(),
            photo_url: None,
        }
    }

    fn changed(snapshot: AuthSnapshot) -> LoginAction {
        LoginAction::AuthChanged { snapshot }
    }

    #[test]
    fn loading_snapshot_sets_loading_indicator() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(AuthSnapshot::loading()))
            .then_state(|state| assert_eq!(state.phase, GatePhase::Loading))
            .then_effects(|effects| assertions::assert_has_future_effect(effects))
            .run();
    }

    #[test]
    fn new_identity_bootstraps_once() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .then_state(|state| {
                assert_eq!(state.phase, GatePhase::Authenticated);
                assert_eq!(state.bootstrapped, Some(ada()));
            })
            .then_effects(|effects| assertions::assert_cancellable(effects, &TELEMETRY))
            .run();

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn logged_in_without_identity_waits() {
        let snapshot = AuthSnapshot {
            is_auth_loading: false,
            is_logged_in: true,
            admin: None,
        };

        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(snapshot))
            .then_state(|state| {
                assert_eq!(state.phase, GatePhase::Authenticated);
                assert_eq!(state.bootstrapped, None);
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn sign_out_shuts_telemetry_down() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .when_action(changed(AuthSnapshot::signed_out()))
            .then_state(|state| {
                assert_eq!(state.phase, GatePhase::Unauthenticated);
                assert_eq!(state.bootstrapped, None);
            })
            .then_effects(|effects| {
                assertions::assert_cancels(effects, &TELEMETRY);
                assertions::assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn sign_in_during_shutdown_waits_for_it() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .when_action(changed(AuthSnapshot::signed_out()))
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .then_state(|state| {
                assert_eq!(state.phase, GatePhase::Authenticated);
                assert!(state.shutdown_pending);
                assert_eq!(state.bootstrapped, None);
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn finished_shutdown_releases_deferred_bootstrap() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .when_action(changed(AuthSnapshot::signed_out()))
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .when_action(LoginAction::TelemetryStopped)
            .then_state(|state| {
                assert!(!state.shutdown_pending);
                assert_eq!(state.bootstrapped, Some(ada()));
            })
            .then_effects(|effects| assertions::assert_cancellable(effects, &TELEMETRY))
            .run();
    }

    #[test]
    fn finished_shutdown_while_signed_out_is_quiet() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(changed(AuthSnapshot::signed_in(ada())))
            .when_action(changed(AuthSnapshot::signed_out()))
            .when_action(LoginAction::TelemetryStopped)
            .then_state(|state| {
                assert!(!state.shutdown_pending);
                assert_eq!(state.bootstrapped, None);
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn form_actions_are_ignored() {
        ReducerTest::new(TestReducer::new())
            .with_env(env())
            .given_state(SessionState::default())
            .when_action(LoginAction::Submit)
            .then_state(|state| assert_eq!(state, &SessionState::default()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }
}
