use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{open_store, print_json};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::ExportSink;
use crate::list_view::ListView;
use crate::store::Command;

#[derive(Tabled)]
struct ScheduleRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "School")]
    school_name: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Principal")]
    principal_name: String,
    #[tabled(rename = "Subjects")]
    subjects: usize,
}

/// List one page of schedules
pub async fn cmd_ls(page: usize, page_size: Option<usize>, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config, ExportSink::from_config(&config))?;
    store.dispatch(Command::FetchAll).await?;

    let state = store.snapshot();
    let total = state.schedules.len();
    let mut view = ListView::new(page_size.unwrap_or_else(|| config.page_size()));
    view.set_page(page, total);
    let visible = view.visible(&state);

    if output.json {
        return print_json(&json!({
            "page": view.page(),
            "page_count": view.page_count(total),
            "page_size": view.page_size(),
            "total": total,
            "schedules": visible,
        }));
    }

    if total == 0 {
        println!("No schedules found.");
        return Ok(());
    }

    let offset = (view.page() - 1) * view.page_size();
    let rows: Vec<ScheduleRow> = visible
        .iter()
        .enumerate()
        .map(|(index, record)| ScheduleRow {
            number: offset + index + 1,
            id: record.id.clone().unwrap_or_default(),
            school_name: record.school_name.clone(),
            class: format!("{}-{}", record.standard, record.division),
            principal_name: record.principal_name.clone(),
            subjects: record.subjects.len(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!(
        "\nPage {} of {} ({} schedule(s))",
        view.page(),
        view.page_count(total),
        total
    );
    Ok(())
}
