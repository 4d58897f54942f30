use std::fs;
use std::path::Path;

use owo_colors::OwoColorize;

use super::{apply_fields, missing_result, open_store, print_json};
use crate::cli::{OutputOptions, RecordFields};
use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::forms::{AddController, FormController, ScheduleDraft};
use crate::gateway::ExportSink;
use crate::types::ScheduleRecord;

/// Read a schedule from a YAML or JSON file. Any `id` in the file is ignored.
fn load_draft(path: &Path) -> Result<ScheduleDraft> {
    let content = fs::read_to_string(path).map_err(|e| {
        DeskError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read schedule file at {}: {}", path.display(), e),
        ))
    })?;
    // YAML is a superset of JSON, so one parser covers both
    let record: ScheduleRecord = serde_yaml_ng::from_str(&content)?;
    Ok(ScheduleDraft::from_record(&record.without_id()))
}

/// Create a schedule from a file and/or flags
pub async fn cmd_add(
    from: Option<&Path>,
    fields: &RecordFields,
    output: OutputOptions,
) -> Result<()> {
    let draft = match from {
        Some(path) => load_draft(path)?,
        None => ScheduleDraft::new(),
    };
    let mut form = AddController::with_draft(draft);
    apply_fields(&mut form, fields)?;
    let submission = form.submit()?;

    let config = Config::load()?;
    let store = open_store(&config, ExportSink::from_config(&config))?;
    store.dispatch(submission.command).await?;

    let created = store
        .snapshot()
        .schedules
        .last()
        .cloned()
        .ok_or_else(|| missing_result("create"))?;

    if output.json {
        return print_json(&created);
    }
    println!(
        "{} {} ({})",
        "Created".green(),
        created.id.as_deref().unwrap_or("-").cyan(),
        created.label()
    );
    Ok(())
}
