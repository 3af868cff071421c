//! Recording telemetry sink for testing.

use crate::error::TelemetryError;
use crate::providers::{ChatBoot, IdentifyMetadata, Telemetry};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

/// Something [`RecordingTelemetry`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// `identify`
    Identify {
        /// Email passed in.
        email: String,
        /// Metadata passed in.
        metadata: IdentifyMetadata,
    },
    /// `boot_chat`
    BootChat(ChatBoot),
    /// `shutdown`
    Shutdown,
}

/// Telemetry sink that records every call.
#[derive(Debug, Clone)]
pub struct RecordingTelemetry {
    session_url: Option<String>,
    events: Arc<Mutex<Vec<TelemetryEvent>>>,
}

impl RecordingTelemetry {
    /// Session URL returned by default.
    pub const SESSION_URL: &'static str = "https://app.highlight.run/sessions/mock";

    /// Create a sink whose analytics session is available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_url: Some(Self::SESSION_URL.to_string()),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a sink whose session URL lookup fails.
    #[must_use]
    pub fn without_session() -> Self {
        Self {
            session_url: None,
            ..Self::new()
        }
    }

    /// Events recorded so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, event: TelemetryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Default for RecordingTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl Telemetry for RecordingTelemetry {
    fn identify(&self, email: &str, metadata: &IdentifyMetadata) {
        self.record(TelemetryEvent::Identify {
            email: email.to_string(),
            metadata: metadata.clone(),
        });
    }

    fn session_url(&self) -> impl Future<Output = Result<String, TelemetryError>> + Send {
        let url = self.session_url.clone();
        async move {
            url.ok_or_else(|| TelemetryError::SessionUrlUnavailable("no recording".to_string()))
        }
    }

    fn boot_chat(&self, boot: &ChatBoot) {
        self.record(TelemetryEvent::BootChat(boot.clone()));
    }

    fn shutdown(&self) {
        self.record(TelemetryEvent::Shutdown);
    }
}
