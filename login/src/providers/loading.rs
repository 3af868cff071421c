//! Global loading indicator.

use std::sync::Arc;
use tokio::sync::watch;

/// Write-only handle to the application's loading spinner.
pub trait LoadingIndicator: Send + Sync {
    /// Show or hide the spinner.
    fn set_is_loading(&self, loading: bool);
}

/// [`LoadingIndicator`] backed by a `watch` channel.
///
/// The last value is kept, so late subscribers see the current state.
#[derive(Debug, Clone)]
pub struct LoadingFlag {
    sender: Arc<watch::Sender<bool>>,
}

impl LoadingFlag {
    /// Create a flag, initially not loading.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Current value.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.sender.borrow()
    }

    /// Watch future changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator for LoadingFlag {
    fn set_is_loading(&self, loading: bool) {
        self.sender.send_replace(loading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_value_without_receivers() {
        let flag = LoadingFlag::new();
        flag.set_is_loading(true);
        assert!(flag.is_loading());

        let receiver = flag.subscribe();
        assert!(*receiver.borrow());
    }
}
