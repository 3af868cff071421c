//! Render-ready view of the login page.
//!
//! The controller is headless: instead of markup it produces a plain data
//! description of what the page shows, which any front end can draw.

use crate::config::LoginConfig;
use crate::state::{Field, FormState, GatePhase, Identity, LoginPageState, Mode};
use serde::Serialize;

/// What the page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PageView {
    /// Auth state still loading; nothing is drawn.
    Blank,

    /// Signed in; the application router takes over.
    App {
        /// Signed-in identity, if the context has loaded it.
        identity: Option<Identity>,
    },

    /// The sign-in or sign-up form.
    Form(FormView),
}

/// One form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    /// Which input.
    pub field: Field,
    /// Placeholder text.
    pub placeholder: &'static str,
    /// HTML input type.
    pub input_type: &'static str,
    /// Current value.
    pub value: String,
    /// Inline error, if any.
    pub error: Option<String>,
}

/// The form as drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Active mode.
    pub mode: Mode,
    /// Heading, e.g. `Welcome back to Highlight.`
    pub title: String,
    /// Text before the toggle link.
    pub prompt: &'static str,
    /// Toggle link text.
    pub toggle_label: &'static str,
    /// Inputs, in display order. Sign-in has no confirm-password input.
    pub fields: Vec<FieldView>,
    /// Submit button text.
    pub submit_label: &'static str,
    /// Text above the OAuth button.
    pub oauth_prompt: &'static str,
    /// OAuth button text, e.g. `Google Sign In`.
    pub oauth_label: String,
    /// Error line under the OAuth button.
    pub oauth_error: Option<String>,
    /// A submit is waiting on the provider.
    pub submitting: bool,
}

impl FormView {
    /// The view for `field`, if it is shown.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&FieldView> {
        self.fields.iter().find(|view| view.field == field)
    }
}

/// Build the page view.
#[must_use]
pub fn render(state: &LoginPageState, config: &LoginConfig) -> PageView {
    match state.session.phase {
        GatePhase::Loading => PageView::Blank,
        GatePhase::Authenticated => PageView::App {
            identity: state.session.identity.clone(),
        },
        GatePhase::Unauthenticated => PageView::Form(render_form(&state.form, config)),
    }
}

fn field_view(form: &FormState, field: Field) -> FieldView {
    let (placeholder, input_type) = match field {
        Field::Email => ("Email", "text"),
        Field::Password => ("Password", "password"),
        Field::ConfirmPassword => ("Confirm Password", "password"),
    };

    FieldView {
        field,
        placeholder,
        input_type,
        value: form.fields.get(field).to_string(),
        error: form.errors.get(field).map(str::to_string),
    }
}

fn render_form(form: &FormState, config: &LoginConfig) -> FormView {
    let provider = config.oauth_provider.display_name();

    let (title, prompt, toggle_label, submit_label, oauth_prompt, oauth_label) = match form.mode {
        Mode::SignIn => (
            format!("Welcome back to {}.", config.app_name),
            "New here?",
            "Create an account.",
            "Sign In",
            "or sign in with",
            format!("{provider} Sign In"),
        ),
        Mode::SignUp => (
            format!("Welcome to {}.", config.app_name),
            "Already have an account?",
            "Sign in.",
            "Sign Up",
            "or sign up with",
            format!("{provider} Sign Up"),
        ),
    };

    let mut fields = vec![field_view(form, Field::Email), field_view(form, Field::Password)];
    if form.mode.is_sign_up() {
        fields.push(field_view(form, Field::ConfirmPassword));
    }

    FormView {
        mode: form.mode,
        title,
        prompt,
        toggle_label,
        fields,
        submit_label,
        oauth_prompt,
        oauth_label,
        oauth_error: form.oauth_error.clone(),
        submitting: form.is_submitting(),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn form_view(state: &LoginPageState) -> FormView {
        match render(state, &LoginConfig::default()) {
            PageView::Form(view) => view,
            other => panic!("expected the form, got {other:?}"),
        }
    }

    fn unauthenticated(mode: Mode) -> LoginPageState {
        let mut state = LoginPageState::new(mode);
        state.session.phase = GatePhase::Unauthenticated;
        state
    }

    #[test]
    fn loading_renders_blank() {
        let state = LoginPageState::new(Mode::SignIn);
        assert_eq!(render(&state, &LoginConfig::default()), PageView::Blank);
    }

    #[test]
    fn sign_in_has_no_confirm_field() {
        let view = form_view(&unauthenticated(Mode::SignIn));
        assert_eq!(view.title, "Welcome back to Highlight.");
        assert_eq!(view.submit_label, "Sign In");
        assert_eq!(view.oauth_label, "Google Sign In");
        assert!(view.field(Field::ConfirmPassword).is_none());
        assert_eq!(view.fields.len(), 2);
    }

    #[test]
    fn sign_up_shows_confirm_field() {
        let view = form_view(&unauthenticated(Mode::SignUp));
        assert_eq!(view.title, "Welcome to Highlight.");
        assert_eq!(view.toggle_label, "Sign in.");
        assert_eq!(view.oauth_prompt, "or sign up with");
        assert_eq!(
            view.field(Field::ConfirmPassword).map(|f| f.placeholder),
            Some("Confirm Password")
        );
    }

    #[test]
    fn errors_render_inline() {
        let mut state = unauthenticated(Mode::SignIn);
        state.form.errors.set(Field::Email, "Enter an email yo!");
        let view = form_view(&state);
        assert_eq!(
            view.field(Field::Email).and_then(|f| f.error.as_deref()),
            Some("Enter an email yo!")
        );
    }
}
