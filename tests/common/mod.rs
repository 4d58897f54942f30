#![allow(dead_code)]

pub mod fake_api;

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use once_cell::sync::Lazy;
use regex::Regex;
use tempfile::TempDir;

static ANSI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

/// Output text with color codes removed
pub fn plain(bytes: &[u8]) -> String {
    ANSI_RE
        .replace_all(&String::from_utf8_lossy(bytes), "")
        .into_owned()
}

/// Runs the scheduledesk binary with its config and data directories inside
/// a temp directory
pub struct DeskTest {
    pub temp_dir: TempDir,
    api_url: String,
}

impl DeskTest {
    /// Point the binary at `api_url`
    pub fn new(api_url: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        DeskTest {
            temp_dir,
            api_url: api_url.to_string(),
        }
    }

    /// Nothing listens on port 9 (discard); requests fail fast
    pub fn offline() -> Self {
        Self::new("http://127.0.0.1:9")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.temp_dir.path().join("config")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.temp_dir.path().join("exports")
    }

    pub fn token_path(&self) -> PathBuf {
        self.data_dir().join("authToken")
    }

    pub fn write_token(&self, token: &str) {
        fs::create_dir_all(self.data_dir()).unwrap();
        fs::write(self.token_path(), token).unwrap();
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_scheduledesk"))
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("SCHEDULEDESK_CONFIG_DIR", self.config_dir())
            .env("SCHEDULEDESK_DATA_DIR", self.data_dir())
            .env("SCHEDULEDESK_API_URL", &self.api_url)
            .env("NO_COLOR", "1")
            .env_remove("SCHEDULEDESK_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .output()
            .expect("Failed to execute scheduledesk")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        plain(&output.stdout)
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Command {:?} should have failed\nstdout: {}",
            args,
            String::from_utf8_lossy(&output.stdout)
        );
        assert_eq!(output.status.code(), Some(1));
        plain(&output.stderr)
    }
}
