use secrecy::SecretString;

use super::read_line;
use crate::error::{DeskError, Result};
use crate::validation::SignUpForm;

/// Check a registration form. The schedule API cannot create accounts, so
/// a form that passes is reported as an error naming who to ask instead.
pub fn cmd_signup(
    username: &str,
    password: Option<&str>,
    retype_password: Option<&str>,
) -> Result<()> {
    let password = match password {
        Some(password) => password.to_string(),
        None => read_line("Password: ")?,
    };
    let retype_password = match retype_password {
        Some(retype) => retype.to_string(),
        None => read_line("Retype password: ")?,
    };

    let form = SignUpForm {
        username: username.to_string(),
        password: SecretString::from(password),
        retype_password: SecretString::from(retype_password),
    };
    form.validate()?;

    tracing::debug!("sign-up form for {username} is valid; no route to submit it");
    Err(DeskError::Other(format!(
        "the schedule API has no sign-up route; ask an administrator to create '{username}', then run 'scheduledesk login'"
    )))
}
