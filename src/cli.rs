use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::forms::FieldPath;

#[derive(Parser)]
#[command(name = "scheduledesk")]
#[command(about = "Manage school timetables on a schedule server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output flags
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Field values for `add` and `edit`
#[derive(Args, Debug, Clone, Default)]
pub struct RecordFields {
    /// School name
    #[arg(long)]
    pub school_name: Option<String>,

    /// Principal's name
    #[arg(long)]
    pub principal_name: Option<String>,

    /// Vice principal's name
    #[arg(long)]
    pub vice_principal_name: Option<String>,

    /// Standard (grade)
    #[arg(long)]
    pub standard: Option<String>,

    /// Division (section)
    #[arg(long)]
    pub division: Option<String>,

    /// Set a field by path, e.g. 'subjects[0].lectures.monday=08:00 - 09:00'.
    /// A path naming the next subject row appends it.
    #[arg(long = "set", value_name = "PATH=VALUE", value_parser = parse_assignment)]
    pub assignments: Vec<(FieldPath, String)>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Account email
        #[arg(short, long)]
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check a new account's details (accounts are created by an administrator)
    Signup {
        /// Account email
        #[arg(short, long)]
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Password again (read from stdin when omitted)
        #[arg(long)]
        retype_password: Option<String>,
    },

    /// List schedules one page at a time
    #[command(visible_alias = "list")]
    Ls {
        /// Page to show, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page (default: list.page_size from config)
        #[arg(long)]
        page_size: Option<usize>,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Show one schedule with its weekly timetable
    Show {
        /// Schedule ID
        id: String,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Create a schedule
    Add {
        /// Start from a YAML or JSON schedule file
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,

        #[command(flatten)]
        fields: RecordFields,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Change an existing schedule
    Edit {
        /// Schedule ID
        id: String,

        #[command(flatten)]
        fields: RecordFields,

        #[command(flatten)]
        output: OutputOptions,
    },

    /// Delete a schedule
    #[command(visible_alias = "delete")]
    Rm {
        /// Schedule ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Download a schedule as PDF
    Export {
        /// Schedule ID
        id: String,

        /// Directory to write into (default: export.dir from config, else the current directory)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Open the interactive schedule browser
    Browse,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        #[command(flatten)]
        output: OutputOptions,
    },
    /// Set a configuration value
    Set {
        /// Key, e.g. api.base_url
        key: String,
        value: String,
    },
    /// Get a configuration value
    Get {
        key: String,
    },
}

/// Parse `PATH=VALUE`; the value may be empty to clear a field
pub fn parse_assignment(s: &str) -> Result<(FieldPath, String), String> {
    let (path, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PATH=VALUE, got '{s}'"))?;
    let path = path.parse::<FieldPath>().map_err(|e| e.to_string())?;
    Ok((path, value.to_string()))
}
