//! Reducer composition utilities
//!
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on a subset of state
//!
//! # Examples
//!
//! ```
//! use portico_core::composition::scope_reducer;
//! use portico_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Default)]
//! struct Flag {
//!     on: bool,
//! }
//!
//! #[derive(Default)]
//! struct Page {
//!     flag: Flag,
//!     title: String,
//! }
//!
//! struct FlagReducer;
//!
//! impl Reducer for FlagReducer {
//!     type State = Flag;
//!     type Action = ();
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Flag, _action: (), _env: &()) -> SmallVec<[Effect<()>; 4]> {
//!         state.on = !state.on;
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! fn flag(page: &mut Page) -> &mut Flag {
//!     &mut page.flag
//! }
//!
//! let scoped = scope_reducer(FlagReducer, flag);
//! let mut page = Page::default();
//! let _ = scoped.reduce(&mut page, (), &());
//! assert!(page.flag.on);
//! ```

use crate::SmallVec;
use crate::effect::Effect;
use crate::reducer::Reducer;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in order, and all effects are concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            all_effects.extend(reducer.reduce(state, action.clone(), env));
        }

        all_effects
    }
}

/// Scopes a reducer to a field of a larger state through a mutable lens.
pub const fn scope_reducer<S, SubS, R>(reducer: R, lens: fn(&mut S) -> &mut SubS) -> ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS>,
{
    ScopedReducer { reducer, lens }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, R> {
    reducer: R,
    lens: fn(&mut S) -> &mut SubS,
}

impl<S, SubS, R: Clone> Clone for ScopedReducer<S, SubS, R> {
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            lens: self.lens,
        }
    }
}

impl<S, SubS, R> Reducer for ScopedReducer<S, SubS, R>
where
    R: Reducer<State = SubS>,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.reducer.reduce((self.lens)(state), action, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Default)]
    struct TestState {
        counter: i32,
        name: String,
    }

    #[derive(Clone)]
    enum TestAction {
        Increment,
        SetName(String),
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::Increment = action {
                state.counter += 1;
            }
            smallvec![Effect::None]
        }
    }

    struct NameReducer;

    impl Reducer for NameReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if let TestAction::SetName(name) = action {
                state.name = name;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn test_combine_reducers() {
        let combined = combine_reducers(vec![Box::new(CounterReducer), Box::new(NameReducer)]);
        let mut state = TestState::default();

        let effects = combined.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.counter, 1);
        assert_eq!(effects.len(), 2);

        let _ = combined.reduce(&mut state, TestAction::SetName("Alice".to_string()), &());
        assert_eq!(state.name, "Alice");
        assert_eq!(state.counter, 1);
    }

    #[derive(Default)]
    struct ParentState {
        child: TestState,
        other: String,
    }

    fn child(parent: &mut ParentState) -> &mut TestState {
        &mut parent.child
    }

    #[test]
    fn test_scope_reducer() {
        let scoped = scope_reducer(CounterReducer, child);

        let mut state = ParentState {
            child: TestState::default(),
            other: "untouched".to_string(),
        };

        let _ = scoped.reduce(&mut state, TestAction::Increment, &());
        let _ = scoped.reduce(&mut state, TestAction::Increment, &());
        assert_eq!(state.child.counter, 2);
        assert_eq!(state.other, "untouched");
    }
}
