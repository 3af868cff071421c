//! Login page reducers.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.

pub mod form;
pub mod session;

use crate::actions::LoginAction;
use crate::environment::LoginEnvironment;
use crate::providers::{AuthProvider, LoadingIndicator, Telemetry};
use crate::state::{FormState, LoginPageState, SessionState};
use portico_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use portico_core::{SmallVec, effect::Effect, reducer::Reducer};

// Re-export
pub use form::FormReducer;
pub use session::SessionReducer;

type Slice<P, L, T> = Box<
    dyn Reducer<State = LoginPageState, Action = LoginAction, Environment = LoginEnvironment<P, L, T>>
        + Send
        + Sync,
>;

fn form_state(state: &mut LoginPageState) -> &mut FormState {
    &mut state.form
}

fn session_state(state: &mut LoginPageState) -> &mut SessionState {
    &mut state.session
}

/// Root reducer for the login page.
///
/// Runs the form reducer and the session gate on every action, each scoped
/// to its own slice of [`LoginPageState`].
pub struct LoginPageReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    inner: CombinedReducer<LoginPageState, LoginAction, LoginEnvironment<P, L, T>>,
}

impl<P, L, T> LoginPageReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    /// Create the page reducer.
    #[must_use]
    pub fn new() -> Self {
        let slices: Vec<Slice<P, L, T>> = vec![
            Box::new(scope_reducer(FormReducer::<P, L, T>::new(), form_state)),
            Box::new(scope_reducer(SessionReducer::<P, L, T>::new(), session_state)),
        ];

        Self {
            inner: combine_reducers(slices),
        }
    }
}

impl<P, L, T> Default for LoginPageReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, L, T> Reducer for LoginPageReducer<P, L, T>
where
    P: AuthProvider + Clone + 'static,
    L: LoadingIndicator + Clone + 'static,
    T: Telemetry + Clone + 'static,
{
    type State = LoginPageState;
    type Action = LoginAction;
    type Environment = LoginEnvironment<P, L, T>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}
