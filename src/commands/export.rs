use std::path::Path;

use owo_colors::OwoColorize;

use super::{missing_result, open_store};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::ExportSink;
use crate::store::Command;

/// Download a schedule's PDF into the export directory
pub async fn cmd_export(id: &str, out_dir: Option<&Path>) -> Result<()> {
    let config = Config::load()?;
    let exporter = match out_dir {
        Some(dir) => ExportSink::new(dir, config.export.legacy_filename),
        None => ExportSink::from_config(&config),
    };
    let store = open_store(&config, exporter)?;
    store.dispatch(Command::Export(id.to_string())).await?;

    let path = store
        .snapshot()
        .last_export
        .ok_or_else(|| missing_result("export"))?;
    println!("{} {}", "Exported to".green(), path.display());
    Ok(())
}
