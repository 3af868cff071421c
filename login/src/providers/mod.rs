//! Provider traits for external dependencies.
//!
//! The login page owns none of its collaborators. These traits abstract over
//! them so the reducers stay pure and the page can be driven entirely from
//! tests.
//!
//! # Providers
//!
//! - [`AuthProvider`]: email/password and OAuth redirect calls
//! - [`AuthContext`]: observable authentication state
//! - [`LoadingIndicator`]: global loading spinner
//! - [`Telemetry`]: session analytics and the support chat widget

pub mod auth;
pub mod context;
pub mod loading;
pub mod telemetry;

pub use auth::{AuthProvider, OAuthProvider};
pub use context::{AuthContext, AuthListener, SharedAuthContext, Subscription};
pub use loading::{LoadingFlag, LoadingIndicator};
pub use telemetry::{ChatBoot, IdentifyMetadata, NoopTelemetry, Telemetry};
