//! # Portico Runtime
//!
//! Runtime implementation for the Portico reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions and feeds actions back to reducers
//! - **Cancellation Registry**: Tracks running cancellable effects by [`EffectId`]
//!
//! ## Example
//!
//! ```ignore
//! use portico_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use futures::future::BoxFuture;
use portico_core::effect::{Effect, EffectId};
use portico_core::reducer::Reducer;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tokio::task::AbortHandle;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        ///
        /// Some effects were still running when the timeout elapsed.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Effects did not finish in time
        ///
        /// Returned by [`EffectHandle::wait_with_timeout`](crate::EffectHandle::wait_with_timeout).
        #[error("Timed out waiting for effects")]
        Timeout,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] to allow waiting for the effects of that
/// action to finish. Actions fed back by those effects are reduced before
/// the effect counts as finished; effects *they* produce are not tracked.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(Action::Start).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: Arc::new(tx),
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    #[must_use]
    pub fn completed() -> Self {
        let (handle, _tracking) = Self::new();
        handle
    }

    /// Number of effects from this action still running.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracker is gone, so nothing is left to wait for.
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.effects.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Internal: effect tracking context for one `send`
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: Arc<watch::Sender<()>>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// Runs on normal completion, on panic, and when the task is aborted.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Running cancellable effects, keyed by slot.
#[derive(Default)]
struct CancellationRegistry {
    next_token: AtomicU64,
    tasks: Mutex<HashMap<EffectId, (u64, AbortHandle)>>,
}

impl CancellationRegistry {
    fn tasks(&self) -> MutexGuard<'_, HashMap<EffectId, (u64, AbortHandle)>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a task under `id`, aborting whatever held the slot before.
    fn register(&self, id: EffectId, handle: AbortHandle) -> u64 {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        if let Some((_, previous)) = self.tasks().insert(id.clone(), (token, handle)) {
            tracing::debug!(effect_id = %id, "Replacing running cancellable effect");
            metrics::counter!("store.effects.cancelled").increment(1);
            previous.abort();
        }
        token
    }

    /// Forget a finished task, unless the slot was taken over in the meantime.
    fn release(&self, id: &EffectId, token: u64) {
        let mut tasks = self.tasks();
        if tasks.get(id).is_some_and(|(current, _)| *current == token) {
            tasks.remove(id);
        }
    }

    fn cancel(&self, id: &EffectId) -> bool {
        self.tasks()
            .remove(id)
            .map(|(_, handle)| handle.abort())
            .is_some()
    }

    fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.tasks().drain().collect();
        for (_, (_, handle)) in &drained {
            handle.abort();
        }
        drained.len()
    }

    fn contains(&self, id: &EffectId) -> bool {
        self.tasks().contains_key(id)
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, BoxFuture, CancellationRegistry,
        DecrementGuard, Duration, Effect, EffectHandle, EffectId, Ordering, Reducer, RwLock,
        StoreError,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop and cancellation)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        cancellations: Arc<CancellationRegistry>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                cancellations: Arc::new(CancellationRegistry::default()),
            }
        }

        /// The injected environment.
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.environment
        }

        /// Returns `true` while a cancellable effect runs under `id`.
        #[must_use]
        pub fn is_running(&self, id: &EffectId) -> bool {
            self.cancellations.contains(id)
        }

        /// Initiate graceful shutdown of the store
        ///
        /// This method:
        /// 1. Sets the shutdown flag (rejecting new actions)
        /// 2. Aborts every running cancellable effect
        /// 3. Waits for the remaining effects to complete (with timeout)
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] if the timeout expires before all
        /// pending effects complete.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let aborted = self.cancellations.cancel_all();
            if aborted > 0 {
                tracing::debug!(aborted, "Aborted cancellable effects");
            }

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timeout");
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires write lock on state
        /// 2. Calls reducer with (state, action, environment)
        /// 3. Schedules returned effects (cancellation bookkeeping happens
        ///    here, under the lock, so it is ordered with the reducer)
        /// 4. Runs effects on spawned tasks; they may produce more actions
        ///
        /// `send()` returns after starting effect execution, not completion.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let scheduled: Vec<BoxFuture<'static, ()>> = {
                let mut state = self.state.write().await;
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                effects
                    .into_iter()
                    .filter(|effect| !effect.is_none())
                    .map(|effect| self.schedule(effect))
                    .collect()
            };

            for effect in scheduled {
                tracking.increment();
                self.pending_effects.fetch_add(1, Ordering::SeqCst);
                let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));
                let guard = DecrementGuard(tracking.clone());

                tokio::spawn(async move {
                    let _guard = guard;
                    let _pending_guard = pending_guard;
                    effect.await;
                });
            }

            Ok(handle)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let email = store.state(|s| s.form.email.clone()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        async fn feed_back(&self, action: A) {
            if let Err(error) = self.send(action).await {
                tracing::debug!(%error, "Dropped action produced by effect");
            }
        }

        /// Turn an effect description into a runnable future.
        ///
        /// `Cancellable` spawns and registers its task, and `Cancel` aborts,
        /// at scheduling time.
        fn schedule(&self, effect: Effect<A>) -> BoxFuture<'static, ()> {
            match effect {
                Effect::None => Box::pin(async {}),
                Effect::Future(fut) => {
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    let store = self.clone();

                    Box::pin(async move {
                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            store.feed_back(action).await;
                        }
                    })
                },
                Effect::Cancellable { id, effect } => {
                    metrics::counter!("store.effects.executed", "type" => "cancellable")
                        .increment(1);
                    let task = tokio::spawn(self.schedule(*effect));
                    let token = self.cancellations.register(id.clone(), task.abort_handle());
                    let registry = Arc::clone(&self.cancellations);

                    Box::pin(async move {
                        match task.await {
                            Ok(()) => {},
                            Err(error) if error.is_cancelled() => {
                                tracing::debug!(effect_id = %id, "Cancellable effect aborted");
                            },
                            Err(error) => {
                                tracing::warn!(effect_id = %id, %error, "Cancellable effect panicked");
                            },
                        }
                        registry.release(&id, token);
                    })
                },
                Effect::Cancel(id) => {
                    if self.cancellations.cancel(&id) {
                        tracing::debug!(effect_id = %id, "Cancelled effect");
                        metrics::counter!("store.effects.cancelled").increment(1);
                    }
                    Box::pin(async {})
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                cancellations: Arc::clone(&self.cancellations),
            }
        }
    }
}

pub use store::Store;
