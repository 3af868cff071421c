//! Login page state types.
//!
//! All types are `Clone` to support the functional architecture pattern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════
// Mode
// ═══════════════════════════════════════════════════════════════════════

/// Which operation the form performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Sign in to an existing account.
    #[default]
    SignIn,

    /// Create a new account.
    SignUp,
}

impl Mode {
    /// Initial mode for an optional `sign_up` query flag.
    ///
    /// Only an explicit `true` opens the sign-up form.
    ///
    /// ```
    /// # use portico_login::Mode;
    /// assert_eq!(Mode::from_sign_up_flag(Some(true)), Mode::SignUp);
    /// assert_eq!(Mode::from_sign_up_flag(Some(false)), Mode::SignIn);
    /// assert_eq!(Mode::from_sign_up_flag(None), Mode::SignIn);
    /// ```
    #[must_use]
    pub const fn from_sign_up_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::SignUp,
            Some(false) | None => Self::SignIn,
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    /// Returns `true` in sign-up mode.
    #[must_use]
    pub const fn is_sign_up(self) -> bool {
        matches!(self, Self::SignUp)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Form fields and errors
// ═══════════════════════════════════════════════════════════════════════

/// A form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    /// Email address.
    Email,
    /// Password.
    Password,
    /// Password confirmation (sign-up only).
    ConfirmPassword,
}

impl Field {
    /// Input name as rendered in the form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirm-password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current input values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// Confirm-password input.
    pub confirm_password: String,
}

impl FormFields {
    /// Value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Replace the value of `field`.
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Email => self.email = value,
            Field::Password => self.password = value,
            Field::ConfirmPassword => self.confirm_password = value,
        }
    }

    /// Returns `true` when every input is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty() && self.confirm_password.is_empty()
    }
}

/// Per-field error messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    /// Message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Set the message for `field`, replacing any previous one.
    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Remove the message for `field`.
    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    /// Returns `true` if `field` has a message.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Remove every message.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns `true` if there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with a message.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Validated input for one submit attempt.
///
/// Exists only while the provider call is being made; never stored in state.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Confirmation, present in sign-up mode only.
    pub confirm_password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Sequence number of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId(pub u64);

/// Form controller state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    /// Active mode.
    pub mode: Mode,

    /// Input values.
    pub fields: FormFields,

    /// Inline field errors.
    pub errors: FormErrors,

    /// Error line under the OAuth button.
    pub oauth_error: Option<String>,

    /// Submit attempt whose provider call is still running.
    pub in_flight: Option<AttemptId>,

    /// Number of submit attempts issued so far.
    pub attempts: u64,

    /// `false` once the view has been deactivated; late results are dropped.
    pub active: bool,
}

impl FormState {
    /// Fresh, active form in `mode`.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            fields: FormFields::default(),
            errors: FormErrors::default(),
            oauth_error: None,
            in_flight: None,
            attempts: 0,
            active: true,
        }
    }

    /// Returns `true` while a submit is waiting on the provider.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Auth context (consumed, not owned)
// ═══════════════════════════════════════════════════════════════════════

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Application user id.
    pub id: String,

    /// Identity-provider user id.
    pub uid: String,

    /// Email address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Avatar URL.
    pub photo_url: Option<String>,
}

/// Read-only view of the external authentication context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    /// The provider has not finished restoring the session yet.
    pub is_auth_loading: bool,

    /// A user is signed in.
    pub is_logged_in: bool,

    /// Signed-in identity, once loaded.
    pub admin: Option<Identity>,
}

impl AuthSnapshot {
    /// Snapshot while the provider is still loading.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            is_auth_loading: true,
            is_logged_in: false,
            admin: None,
        }
    }

    /// Snapshot with nobody signed in.
    #[must_use]
    pub const fn signed_out() -> Self {
        Self {
            is_auth_loading: false,
            is_logged_in: false,
            admin: None,
        }
    }

    /// Snapshot with `identity` signed in.
    #[must_use]
    pub const fn signed_in(identity: Identity) -> Self {
        Self {
            is_auth_loading: false,
            is_logged_in: true,
            admin: Some(identity),
        }
    }
}

impl Default for AuthSnapshot {
    fn default() -> Self {
        Self::loading()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Session gate
// ═══════════════════════════════════════════════════════════════════════

/// What the page shows, derived from the auth context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GatePhase {
    /// Auth state unknown; render nothing.
    #[default]
    Loading,

    /// Nobody signed in; render the form.
    Unauthenticated,

    /// Signed in; hand off to the application router.
    Authenticated,
}

impl GatePhase {
    /// Phase for a snapshot. Loading wins over everything else.
    #[must_use]
    pub const fn from_snapshot(snapshot: &AuthSnapshot) -> Self {
        if snapshot.is_auth_loading {
            Self::Loading
        } else if snapshot.is_logged_in {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

/// Session gate state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current phase.
    pub phase: GatePhase,

    /// Identity from the latest snapshot.
    pub identity: Option<Identity>,

    /// Identity telemetry was last bootstrapped for.
    pub bootstrapped: Option<Identity>,

    /// A telemetry shutdown is still running; bootstraps wait for it.
    pub shutdown_pending: bool,
}

/// Root state of the login page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPageState {
    /// Form controller.
    pub form: FormState,

    /// Session gate.
    pub session: SessionState,
}

impl LoginPageState {
    /// Initial state for a page opened in `mode`.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            form: FormState::new(mode),
            session: SessionState::default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: "1".to_string(),
            uid: "firebase-1".to_string(),
            email: "a@b.com".to_string(),
            name: "Ada".to_string(),
            photo_url: None,
        }
    }

    #[test]
    fn loading_wins_over_logged_in() {
        let snapshot = AuthSnapshot {
            is_auth_loading: true,
            is_logged_in: true,
            admin: Some(identity()),
        };
        assert_eq!(GatePhase::from_snapshot(&snapshot), GatePhase::Loading);
    }

    #[test]
    fn gate_phase_follows_snapshot() {
        assert_eq!(
            GatePhase::from_snapshot(&AuthSnapshot::signed_out()),
            GatePhase::Unauthenticated
        );
        assert_eq!(
            GatePhase::from_snapshot(&AuthSnapshot::signed_in(identity())),
            GatePhase::Authenticated
        );
    }

    #[test]
    fn form_errors_serialize_with_input_names() {
        let mut errors = FormErrors::default();
        errors.set(Field::ConfirmPassword, "Passwords don't match.");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"confirm-password":"Passwords don't match."}"#);
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let credentials = Credentials {
            email: "a@b.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: None,
        };
        assert!(!format!("{credentials:?}").contains("hunter2"));
    }
}
