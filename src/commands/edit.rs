use owo_colors::OwoColorize;

use super::{apply_fields, missing_result, open_store, print_json};
use crate::cli::{OutputOptions, RecordFields};
use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::forms::{EditController, FormController};
use crate::gateway::ExportSink;

/// Fetch a schedule, apply flag changes and submit the update
pub async fn cmd_edit(id: &str, fields: &RecordFields, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config, ExportSink::from_config(&config))?;

    let (mut form, fetch) = EditController::open(id, config.edit.stale_subjects);
    store.dispatch(fetch).await?;
    let fetched = store
        .snapshot()
        .focused
        .ok_or_else(|| missing_result("fetch"))?;
    if !form.seed(&fetched) {
        return Err(DeskError::MalformedResponse(format!(
            "asked for schedule '{id}' but received '{}'",
            fetched.id.as_deref().unwrap_or("<no id>")
        )));
    }

    apply_fields(&mut form, fields)?;
    let submission = form.submit()?;
    store.dispatch(submission.command).await?;

    let state = store.snapshot();
    let updated = state.find(id).cloned().or(state.focused.clone());
    if output.json {
        return print_json(&serde_json::json!({
            "schedule": updated,
            "message": state.last_message,
        }));
    }

    let message = state
        .last_message
        .clone()
        .unwrap_or_else(|| "Schedule updated".to_string());
    println!("{} {} ({})", "Updated".green(), id.cyan(), message);
    Ok(())
}
