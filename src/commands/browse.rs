use std::sync::Arc;

use iocraft::prelude::*;

use super::open_store;
use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::gateway::ExportSink;
use crate::tui::ScheduleBrowser;

/// Open the full-screen schedule browser
pub async fn cmd_browse() -> Result<()> {
    let config = Config::load()?;
    let store = Arc::new(open_store(&config, ExportSink::from_config(&config))?);

    element!(ScheduleBrowser(
        store: Some(store),
        page_size: config.page_size(),
        policy: config.edit.stale_subjects,
    ))
    .fullscreen()
    .await
    .map_err(|e| DeskError::Other(format!("TUI error: {}", e)))
}
