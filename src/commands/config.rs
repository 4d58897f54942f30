//! Configuration commands.
//!
//! - `config show`: Display current configuration and the session state
//! - `config get`: Print one value
//! - `config set`: Validate and store one value

use owo_colors::OwoColorize;
use serde_json::json;

use super::print_json;
use crate::cli::OutputOptions;
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;
use crate::session::SessionStore;

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;
    let logged_in = SessionStore::open(&config)?.is_logged_in();
    let effective_url = config.api_base_url()?;

    if output.json {
        return print_json(&json!({
            "config": config,
            "effective_api_url": effective_url.as_str(),
            "logged_in": logged_in,
            "config_file": config_path.to_string_lossy(),
        }));
    }

    println!("{}\n", "Configuration:".cyan().bold());
    for key in CONFIG_KEYS {
        let value = config.get(key)?;
        let shown = if value.is_empty() {
            "(unset)".dimmed().to_string()
        } else {
            value
        };
        println!("  {}: {}", key.cyan(), shown);
    }

    println!();
    println!("  {}: {}", "effective API URL".cyan(), effective_url);
    let session = if logged_in {
        "logged in".green().to_string()
    } else {
        "not logged in".dimmed().to_string()
    };
    println!("  {}: {}", "session".cyan(), session);

    println!(
        "\n{}",
        format!("Config file: {}", config_path.display()).dimmed()
    );
    Ok(())
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;
    println!("Set {} to {}", key.cyan(), config.get(key)?);
    Ok(())
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    println!("{}", config.get(key)?);
    Ok(())
}
