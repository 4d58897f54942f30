use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use scheduledesk::cli::{Cli, Commands, ConfigAction};
use scheduledesk::commands::{
    cmd_add, cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show, cmd_edit, cmd_export,
    cmd_login, cmd_ls, cmd_rm, cmd_show, cmd_signup,
};

/// Environment variable holding the log filter, e.g. `scheduledesk=debug`
const LOG_ENV: &str = "SCHEDULEDESK_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login { username, password } => {
            cmd_login(&username, password.as_deref()).await
        }
        Commands::Signup {
            username,
            password,
            retype_password,
        } => cmd_signup(&username, password.as_deref(), retype_password.as_deref()),

        Commands::Ls {
            page,
            page_size,
            output,
        } => cmd_ls(page, page_size, output).await,
        Commands::Show { id, output } => cmd_show(&id, output).await,
        Commands::Add {
            from,
            fields,
            output,
        } => cmd_add(from.as_deref(), &fields, output).await,
        Commands::Edit { id, fields, output } => cmd_edit(&id, &fields, output).await,
        Commands::Rm { id, yes } => cmd_rm(&id, yes).await,
        Commands::Export { id, out_dir } => cmd_export(&id, out_dir.as_deref()).await,

        Commands::Config { action } => match action {
            ConfigAction::Show { output } => cmd_config_show(output),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
            ConfigAction::Get { key } => cmd_config_get(&key),
        },

        Commands::Browse => cmd_browse().await,
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
