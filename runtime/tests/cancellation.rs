//! Integration tests for cancellable effects
//!
//! Models a request that can be superseded or withdrawn while in flight.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use portico_core::effect::{Effect, EffectId};
use portico_core::{SmallVec, reducer::Reducer, smallvec};
use portico_runtime::Store;
use std::time::Duration;

const REQUEST: EffectId = EffectId::new("request");

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Start a request that answers after `delay_ms`
    Request { id: u64, delay_ms: u64 },
    /// Request answered (terminal action)
    Answered { id: u64 },
    /// Withdraw whatever request is running
    Withdraw,
}

#[derive(Debug, Clone, Default)]
struct TestState {
    answered: Vec<u64>,
}

struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Request { id, delay_ms } => smallvec![
                Effect::future(async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Some(TestAction::Answered { id })
                })
                .cancellable(REQUEST)
            ],
            TestAction::Answered { id } => {
                state.answered.push(id);
                smallvec![Effect::None]
            },
            TestAction::Withdraw => smallvec![Effect::Cancel(REQUEST)],
        }
    }
}

fn store() -> Store<TestState, TestAction, (), TestReducer> {
    Store::new(TestState::default(), TestReducer, ())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_superseded_request_never_answers() {
    let store = store();

    let mut first = store
        .send(TestAction::Request { id: 1, delay_ms: 200 })
        .await
        .unwrap();
    let mut second = store
        .send(TestAction::Request { id: 2, delay_ms: 5 })
        .await
        .unwrap();

    second
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();
    first
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(store.state(|s| s.answered.clone()).await, vec![2]);
    assert!(!store.is_running(&REQUEST));
}

#[tokio::test]
async fn test_late_answer_after_withdraw_and_restart() {
    let store = store();

    store
        .send(TestAction::Request { id: 1, delay_ms: 50 })
        .await
        .unwrap();
    store.send(TestAction::Withdraw).await.unwrap();
    let mut handle = store
        .send(TestAction::Request { id: 2, delay_ms: 5 })
        .await
        .unwrap();

    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert_eq!(store.state(|s| s.answered.clone()).await, vec![2]);
}

#[tokio::test]
async fn test_withdrawn_request_never_answers() {
    let store = store();
    let mut handle = store
        .send(TestAction::Request { id: 1, delay_ms: 50 })
        .await
        .unwrap();

    store.send(TestAction::Withdraw).await.unwrap();
    handle
        .wait_with_timeout(Duration::from_secs(1))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(80)).await;

    assert!(store.state(|s| s.answered.is_empty()).await);
    assert!(!store.is_running(&REQUEST));
}

#[tokio::test]
async fn test_withdraw_with_nothing_running_is_harmless() {
    let store = store();
    let handle = store.send(TestAction::Withdraw).await.unwrap();
    assert_eq!(handle.pending(), 0);
}
