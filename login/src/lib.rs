//! # Portico Login
//!
//! Headless controller for an email/password sign-in and sign-up page with a
//! single OAuth redirect option.
//!
//! ## Features
//!
//! - **Form state**: field values, inline validation, provider error display
//! - **Mode toggle**: sign-in ⇄ sign-up, with the initial mode taken from the URL
//! - **Auth bridge**: provider calls are cancellable effects; late results are dropped
//! - **Session gate**: render nothing while auth loads, hand off once signed in
//! - **Telemetry bootstrap**: identify the user and boot the support chat once per identity
//!
//! ## Architecture
//!
//! The page is a reducer over [`LoginPageState`] driven by a runtime `Store`:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! Everything outside the page (identity provider, auth context, loading
//! indicator, analytics) is injected through the traits in [`providers`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use portico_login::*;
//!
//! let env = LoginEnvironment::new(auth, loading, telemetry, LoginConfig::default());
//! let page = LoginPage::mount("?sign_up=1", &context, env).await?;
//!
//! page.set_field(Field::Email, "ada@example.com").await?;
//! page.set_field(Field::Password, "hunter22").await?;
//! page.set_field(Field::ConfirmPassword, "hunter22").await?;
//! page.submit().await?;
//!
//! match page.view().await {
//!     PageView::Blank => {},
//!     PageView::App { identity } => println!("welcome {}", identity.name),
//!     PageView::Form(form) => println!("{}", form.title),
//! }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod page;
pub mod providers;
pub mod query;
pub mod reducers;
pub mod state;
pub mod validation;
pub mod view;

// Mock implementations (for testing)
#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::LoginAction;
pub use config::{ChatConfig, LoginConfig};
pub use environment::LoginEnvironment;
pub use error::{LoginError, ProviderError, Result, TelemetryError};
pub use page::{LoginPage, LoginStore};
pub use providers::{
    AuthContext, AuthProvider, LoadingFlag, LoadingIndicator, NoopTelemetry, OAuthProvider,
    SharedAuthContext, Subscription, Telemetry,
};
pub use reducers::LoginPageReducer;
pub use state::{
    AttemptId, AuthSnapshot, Field, FormState, GatePhase, Identity, LoginPageState, Mode,
};
pub use view::{FormView, PageView};

pub use portico_runtime::EffectHandle;
