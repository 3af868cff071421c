//! Login page environment.
//!
//! This module defines the environment type for dependency injection
//! in the login page reducers.

use crate::config::LoginConfig;
use crate::providers::{AuthProvider, LoadingIndicator, Telemetry};

/// Login page environment.
///
/// Contains all external dependencies needed by the login page reducers.
/// Providers are cloned into effects, so implementations should be cheap to
/// clone (typically an `Arc` inside).
///
/// # Type Parameters
///
/// - `P`: Identity provider
/// - `L`: Loading indicator
/// - `T`: Telemetry sink
#[derive(Debug, Clone)]
pub struct LoginEnvironment<P, L, T>
where
    P: AuthProvider + Clone,
    L: LoadingIndicator + Clone,
    T: Telemetry + Clone,
{
    /// Identity provider.
    pub auth: P,

    /// Global loading indicator.
    pub loading: L,

    /// Analytics and support chat.
    pub telemetry: T,

    /// Page configuration.
    pub config: LoginConfig,
}

impl<P, L, T> LoginEnvironment<P, L, T>
where
    P: AuthProvider + Clone,
    L: LoadingIndicator + Clone,
    T: Telemetry + Clone,
{
    /// Create a new login environment.
    #[must_use]
    pub const fn new(auth: P, loading: L, telemetry: T, config: LoginConfig) -> Self {
        Self {
            auth,
            loading,
            telemetry,
            config,
        }
    }
}
