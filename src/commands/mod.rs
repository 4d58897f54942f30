mod add;
mod browse;
mod config;
mod edit;
mod export;
mod login;
mod ls;
mod rm;
mod show;
mod signup;

pub use add::cmd_add;
pub use browse::cmd_browse;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use edit::cmd_edit;
pub use export::cmd_export;
pub use login::cmd_login;
pub use ls::cmd_ls;
pub use rm::cmd_rm;
pub use show::cmd_show;
pub use signup::cmd_signup;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use owo_colors::OwoColorize;

use crate::cli::RecordFields;
use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::forms::{FieldPath, FormController, ScalarField};
use crate::gateway::{ExportSink, HttpGateway};
use crate::session::SessionStore;
use crate::store::Store;
use crate::types::ScheduleRecord;

/// Print a value as pretty JSON
pub fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Store wired to the HTTP gateway for one command invocation
pub fn open_store(config: &Config, exporter: ExportSink) -> Result<Store<HttpGateway>> {
    let session = Arc::new(SessionStore::open(config)?);
    let gateway = HttpGateway::new(config, session)?;
    Ok(Store::new(gateway, exporter))
}

/// Read one trimmed line from stdin after printing `prompt` to stderr
pub fn read_line(prompt: &str) -> Result<String> {
    eprint!("{prompt}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Apply flag values to an open form. Assignments to the row just past the
/// end append a subject row first.
pub fn apply_fields(form: &mut dyn FormController, fields: &RecordFields) -> Result<()> {
    let scalars = [
        (ScalarField::SchoolName, &fields.school_name),
        (ScalarField::PrincipalName, &fields.principal_name),
        (ScalarField::VicePrincipalName, &fields.vice_principal_name),
        (ScalarField::Standard, &fields.standard),
        (ScalarField::Division, &fields.division),
    ];
    for (field, value) in scalars {
        if let Some(value) = value {
            form.set_field(FieldPath::Scalar(field), value)?;
        }
    }

    for (path, value) in &fields.assignments {
        if let Some(row) = path.row() {
            if row == form.draft().subjects.len() {
                form.add_subject_row();
            }
        }
        form.set_field(*path, value)?;
    }
    Ok(())
}

/// Print a schedule's header fields and its weekly timetable
pub fn print_record(record: &ScheduleRecord) {
    use tabled::builder::Builder;
    use tabled::settings::Style;

    use crate::types::Day;

    println!(
        "{} {}",
        record.school_name.bold(),
        format!("{}-{}", record.standard, record.division).cyan()
    );
    println!("{:<20} {}", "ID:".dimmed(), record.id.as_deref().unwrap_or("-"));
    println!("{:<20} {}", "Principal:".dimmed(), record.principal_name);
    println!("{:<20} {}", "Vice principal:".dimmed(), record.vice_principal_name);

    if record.subjects.is_empty() {
        println!("\nNo subjects.");
        return;
    }

    let mut builder = Builder::default();
    let mut header = vec!["Subject".to_string()];
    header.extend(Day::ALL.iter().map(|day| day.short_name().to_string()));
    builder.push_record(header);

    for subject in &record.subjects {
        let mut row = vec![
            subject
                .name
                .map(|name| name.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ];
        row.extend(
            subject
                .lectures
                .iter()
                .map(|(_, slot)| slot.map(|s| s.to_string()).unwrap_or_default()),
        );
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    println!("\n{table}");
}

/// The error a command reports when a dispatched call left no result behind
pub(crate) fn missing_result(what: &str) -> DeskError {
    DeskError::Other(format!("{what} finished without a result"))
}
