use owo_colors::OwoColorize;

use super::{open_store, read_line};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::ExportSink;
use crate::validation::Credentials;

/// Sign in and persist the session token
pub async fn cmd_login(username: &str, password: Option<&str>) -> Result<()> {
    let password = match password {
        Some(password) => password.to_string(),
        None => read_line("Password: ")?,
    };
    let credentials = Credentials::new(username, password);
    // fail before touching config or network
    credentials.validate()?;

    let config = Config::load()?;
    let store = open_store(&config, ExportSink::from_config(&config))?;
    let session = store.gateway().session();
    store.login(session, &credentials).await?;

    println!(
        "{} as {} (token saved to {})",
        "Logged in".green(),
        username.cyan(),
        session.token_path().display()
    );
    Ok(())
}
