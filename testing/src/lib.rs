//! # Portico Testing
//!
//! Testing utilities and helpers for the Portico reducer architecture.
//!
//! This crate provides:
//! - [`ReducerTest`], a Given-When-Then builder for reducers
//! - Effect assertion helpers
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use portico_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(FormReducer::default())
//!     .with_env(test_environment())
//!     .given_state(FormState::default())
//!     .when_action(LoginAction::ToggleMode)
//!     .then_state(|state| assert_eq!(state.mode, Mode::SignUp))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Install a `tracing` subscriber that writes through the test harness.
///
/// The filter comes from `RUST_LOG` and defaults to `debug`. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_test_tracing_is_idempotent() {
        init_test_tracing();
        init_test_tracing();
    }
}
