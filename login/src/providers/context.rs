//! Observable authentication context.

use crate::state::AuthSnapshot;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Callback invoked with every new snapshot.
pub type AuthListener = Arc<dyn Fn(AuthSnapshot) + Send + Sync>;

/// Authentication context.
///
/// Owned by the application; the login page only reads it. Implementations
/// must call every live listener after each change, and must stop calling a
/// listener once its [`Subscription`] is dropped or unsubscribed.
pub trait AuthContext: Send + Sync {
    /// Current snapshot.
    fn snapshot(&self) -> AuthSnapshot;

    /// Register `listener` for future snapshots.
    fn subscribe(&self, listener: AuthListener) -> Subscription;
}

/// Handle to a registered listener.
///
/// Dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Subscription that runs `cancel` when released.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

struct Inner {
    snapshot: AuthSnapshot,
    next_id: u64,
    listeners: BTreeMap<u64, AuthListener>,
}

/// In-process [`AuthContext`].
///
/// Cloning shares the same context. [`SharedAuthContext::publish`] delivers
/// the snapshot to every listener synchronously, in subscription order.
#[derive(Clone)]
pub struct SharedAuthContext {
    inner: Arc<Mutex<Inner>>,
}

impl SharedAuthContext {
    /// Create a context holding `snapshot`.
    #[must_use]
    pub fn new(snapshot: AuthSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                snapshot,
                next_id: 0,
                listeners: BTreeMap::new(),
            })),
        }
    }

    fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
        inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the snapshot and notify every listener.
    ///
    /// Listeners run after the internal lock is released, so they may read
    /// or subscribe to the context themselves.
    pub fn publish(&self, snapshot: AuthSnapshot) {
        let listeners: Vec<AuthListener> = {
            let mut inner = Self::lock(&self.inner);
            inner.snapshot = snapshot.clone();
            inner.listeners.values().cloned().collect()
        };

        tracing::debug!(
            listeners = listeners.len(),
            is_auth_loading = snapshot.is_auth_loading,
            is_logged_in = snapshot.is_logged_in,
            "Publishing auth snapshot"
        );

        for listener in listeners {
            listener(snapshot.clone());
        }
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        Self::lock(&self.inner).listeners.len()
    }
}

impl Default for SharedAuthContext {
    fn default() -> Self {
        Self::new(AuthSnapshot::loading())
    }
}

impl fmt::Debug for SharedAuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = Self::lock(&self.inner);
        f.debug_struct("SharedAuthContext")
            .field("snapshot", &inner.snapshot)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl AuthContext for SharedAuthContext {
    fn snapshot(&self) -> AuthSnapshot {
        Self::lock(&self.inner).snapshot.clone()
    }

    fn subscribe(&self, listener: AuthListener) -> Subscription {
        let id = {
            let mut inner = Self::lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.insert(id, listener);
            id
        };

        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                Self::lock(&inner).listeners.remove(&id);
            }
        })
    }
}
