use super::{missing_result, open_store, print_json, print_record};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::ExportSink;
use crate::store::Command;

/// Fetch and display one schedule
pub async fn cmd_show(id: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let store = open_store(&config, ExportSink::from_config(&config))?;
    store.dispatch(Command::FetchOne(id.to_string())).await?;

    let record = store
        .snapshot()
        .focused
        .ok_or_else(|| missing_result("fetch"))?;

    if output.json {
        return print_json(&record);
    }
    print_record(&record);
    Ok(())
}
