//! Local form validation. Rules run in a fixed order and the first failure
//! short-circuits; its message is what the page shows in a warning toast.
//! Nothing here touches the network.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum password length accepted on sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// First failing validation rule; `Display` is the user-facing message.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please enter a username")]
    MissingUsername,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a password")]
    MissingPassword,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Sign-up form fields as entered.
#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

#[must_use]
pub fn valid_email(email: &str) -> bool {
    EMAIL_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(email))
}

/// Both login fields must be present.
///
/// # Errors
/// Returns [`FieldError::MissingFields`] if either field is empty.
pub fn validate_login(identifier: &str, password: &SecretString) -> Result<(), FieldError> {
    if identifier.trim().is_empty() || password.expose_secret().is_empty() {
        return Err(FieldError::MissingFields);
    }
    Ok(())
}

/// Email must be present and well formed.
///
/// # Errors
/// Returns the first failing rule.
pub fn validate_recovery_email(email: &str) -> Result<(), FieldError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FieldError::MissingEmail);
    }
    if !valid_email(email) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

/// Checks username → email → email format → password → length → confirmation.
///
/// # Errors
/// Returns the first failing rule.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), FieldError> {
    if form.username.trim().is_empty() {
        return Err(FieldError::MissingUsername);
    }

    validate_recovery_email(&form.email)?;

    let password = form.password.expose_secret();
    if password.is_empty() {
        return Err(FieldError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldError::PasswordTooShort);
    }
    if password != form.confirm_password.expose_secret() {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}
