//! Client-side form validation.
//!
//! Runs before any provider call. A failing form never reaches the provider.

use crate::state::{Credentials, Field, FormErrors, FormFields, Mode};

/// Email left empty.
pub const EMAIL_REQUIRED: &str = "Enter an email yo!";

/// Password left empty.
pub const PASSWORD_REQUIRED: &str = "Enter a password.";

/// Confirmation left empty in sign-up mode.
pub const CONFIRM_REQUIRED: &str = "Confirm your password.";

/// Shown on the password field when the confirmation differs.
pub const PASSWORD_MISMATCH: &str = "Mismatched passwords";

/// Shown on the confirmation field when it differs from the password.
pub const CONFIRM_MISMATCH: &str = "Passwords don't match.";

/// Validate the form for `mode`.
///
/// The confirmation is only checked in sign-up mode. Whenever it differs
/// from the password, the password field reports the mismatch, even if it
/// is empty. An empty confirmation asks to be filled in.
///
/// # Errors
///
/// Returns every field error found. Errors are never partial: either the
/// whole form is valid or nothing is submitted.
pub fn validate(mode: Mode, fields: &FormFields) -> Result<Credentials, FormErrors> {
    let mut errors = FormErrors::default();

    if fields.email.is_empty() {
        errors.set(Field::Email, EMAIL_REQUIRED);
    }
    if fields.password.is_empty() {
        errors.set(Field::Password, PASSWORD_REQUIRED);
    }

    if mode.is_sign_up() {
        if fields.confirm_password != fields.password {
            errors.set(Field::Password, PASSWORD_MISMATCH);
            errors.set(Field::ConfirmPassword, CONFIRM_MISMATCH);
        }
        if fields.confirm_password.is_empty() {
            errors.set(Field::ConfirmPassword, CONFIRM_REQUIRED);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Credentials {
        email: fields.email.clone(),
        password: fields.password.clone(),
        confirm_password: mode
            .is_sign_up()
            .then(|| fields.confirm_password.clone()),
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fields(email: &str, password: &str, confirm: &str) -> FormFields {
        FormFields {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn empty_sign_in_form_reports_both_fields() {
        let Err(errors) = validate(Mode::SignIn, &FormFields::default()) else {
            panic!("empty form must not validate");
        };
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_REQUIRED));
        assert!(!errors.contains(Field::ConfirmPassword));
    }

    #[test]
    fn sign_in_ignores_confirmation() {
        let credentials = validate(Mode::SignIn, &fields("a@b.com", "pw", "other"));
        assert_eq!(
            credentials.map(|c| c.confirm_password),
            Ok(None)
        );
    }

    #[test]
    fn sign_up_mismatch_marks_both_fields() {
        let Err(errors) = validate(Mode::SignUp, &fields("a@b.com", "abc", "abd")) else {
            panic!("mismatched passwords must not validate");
        };
        assert_eq!(errors.get(Field::ConfirmPassword), Some(CONFIRM_MISMATCH));
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_MISMATCH));
        assert!(!errors.contains(Field::Email));
    }

    #[test]
    fn empty_confirmation_is_required_and_mismatched() {
        let Err(errors) = validate(Mode::SignUp, &fields("a@b.com", "abc", "")) else {
            panic!("missing confirmation must not validate");
        };
        assert_eq!(errors.get(Field::ConfirmPassword), Some(CONFIRM_REQUIRED));
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_MISMATCH));
    }

    #[test]
    fn empty_password_against_confirmation_reports_mismatch() {
        let Err(errors) = validate(Mode::SignUp, &fields("a@b.com", "", "abc")) else {
            panic!("missing password must not validate");
        };
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_MISMATCH));
        assert_eq!(errors.get(Field::ConfirmPassword), Some(CONFIRM_MISMATCH));
    }

    #[test]
    fn empty_sign_up_form_asks_for_everything() {
        let Err(errors) = validate(Mode::SignUp, &FormFields::default()) else {
            panic!("empty form must not validate");
        };
        assert_eq!(errors.get(Field::Email), Some(EMAIL_REQUIRED));
        assert_eq!(errors.get(Field::Password), Some(PASSWORD_REQUIRED));
        assert_eq!(errors.get(Field::ConfirmPassword), Some(CONFIRM_REQUIRED));
    }

    #[test]
    fn valid_sign_up_carries_confirmation() {
        let credentials = validate(Mode::SignUp, &fields("a@b.com", "abc", "abc"));
        assert_eq!(
            credentials.map(|c| (c.email, c.confirm_password)),
            Ok(("a@b.com".to_string(), Some("abc".to_string())))
        );
    }
}
