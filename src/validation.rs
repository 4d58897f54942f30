//! Client-side checks on credentials, applied before any request is sent.

use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{DeskError, Result};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Symbols a password may (and must at least once) contain
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

pub const MIN_PASSWORD_LEN: usize = 8;

const PASSWORD_RULES: &str = "Password must be at least 8 characters long, contain one uppercase letter, one lowercase letter, one number, and one special character.";

pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(DeskError::validation("username", "Please enter a valid email."))
    }
}

/// Letters, digits and [`PASSWORD_SYMBOLS`] only, with at least one of each class
pub fn validate_password(password: &str) -> Result<()> {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c));
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if allowed && long_enough && has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        Err(DeskError::validation("password", PASSWORD_RULES))
    }
}

/// Username (an email address) and password for `/auth/signin`
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let password = self.password.expose_secret();
        if self.username.is_empty() || password.is_empty() {
            return Err(DeskError::validation(
                "credentials",
                "Please fill in both fields.",
            ));
        }
        validate_email(&self.username)?;
        validate_password(password)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form. The API has no sign-up route, so this only
/// checks the form before the user is pointed at an administrator.
pub struct SignUpForm {
    pub username: String,
    pub password: SecretString,
    pub retype_password: SecretString,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<()> {
        let password = self.password.expose_secret();
        let retype = self.retype_password.expose_secret();

        if password != retype {
            return Err(DeskError::validation(
                "retypePassword",
                "Passwords do not match",
            ));
        }
        if self.username.is_empty() || password.is_empty() || retype.is_empty() {
            return Err(DeskError::validation("signup", "Please fill in all fields."));
        }
        validate_email(&self.username)?;
        validate_password(password)
    }
}
