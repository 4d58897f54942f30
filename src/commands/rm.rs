use owo_colors::OwoColorize;

use super::{open_store, read_line};
use crate::config::Config;
use crate::confirm::ConfirmationGate;
use crate::error::Result;
use crate::gateway::ExportSink;

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Delete a schedule after confirmation
pub async fn cmd_rm(id: &str, yes: bool) -> Result<()> {
    let mut gate = ConfirmationGate::default();
    gate.open(id);

    if !yes {
        let answer = read_line(&format!("Delete schedule {id}? This cannot be undone. [y/N] "))?;
        if !is_yes(&answer) {
            gate.cancel();
            println!("Kept {}", id.cyan());
            return Ok(());
        }
    }

    let Some(command) = gate.confirm() else {
        return Ok(());
    };

    let config = Config::load()?;
    let store = open_store(&config, ExportSink::from_config(&config))?;
    store.dispatch(command).await?;

    println!("{} {}", "Deleted".green(), id.cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("no"));
    }
}
