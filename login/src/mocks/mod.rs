//! Mock provider implementations for testing.
//!
//! In-memory implementations of the provider traits for use in unit and
//! integration tests. Enabled by the `test-utils` feature.

pub mod auth;
pub mod telemetry;

pub use auth::{AuthCall, MockAuthProvider};
pub use telemetry::{RecordingTelemetry, TelemetryEvent};
