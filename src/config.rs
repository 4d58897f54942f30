//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory and includes:
//! - The schedule API base URL and request timeout
//! - List page size
//! - Export destination and file naming
//! - Edit form policy for subjects with empty lecture slots

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DeskError, Result};
use crate::forms::StaleSubjectsPolicy;

/// Overrides the directory holding `config.yaml`
pub const CONFIG_DIR_ENV: &str = "SCHEDULEDESK_CONFIG_DIR";
/// Overrides the directory holding the persisted session token
pub const DATA_DIR_ENV: &str = "SCHEDULEDESK_DATA_DIR";
/// Overrides `api.base_url`
pub const API_URL_ENV: &str = "SCHEDULEDESK_API_URL";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "list.page_size",
    "export.dir",
    "export.legacy_filename",
    "edit.stale_subjects",
];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub list: ListConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub edit: EditConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the schedule API (default: http://localhost:8080)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Rows per page in `ls` and the browser (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    10
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported documents are written to (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Write every export as `schedule.pdf` instead of `schedule-<id>.pdf`
    #[serde(default)]
    pub legacy_filename: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditConfig {
    #[serde(default)]
    pub stale_subjects: StaleSubjectsPolicy,
}

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "scheduledesk", "scheduledesk")
        .ok_or_else(|| DeskError::Config("cannot determine home directory".to_string()))
}

fn env_dir(name: &str) -> Option<PathBuf> {
    env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl Config {
    /// Directory holding `config.yaml`
    pub fn config_dir() -> Result<PathBuf> {
        match env_dir(CONFIG_DIR_ENV) {
            Some(dir) => Ok(dir),
            None => Ok(project_dirs()?.config_dir().to_path_buf()),
        }
    }

    /// Directory holding the persisted session token
    pub fn data_dir() -> Result<PathBuf> {
        match env_dir(DATA_DIR_ENV) {
            Some(dir) => Ok(dir),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DeskError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// Base URL of the schedule API, environment first, then config file
    pub fn api_base_url(&self) -> Result<Url> {
        let raw = env::var(API_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone());

        let url = Url::parse(raw.trim())
            .map_err(|e| DeskError::Config(format!("invalid API base URL '{raw}': {e}")))?;
        if url.cannot_be_a_base() {
            return Err(DeskError::Config(format!(
                "API base URL '{raw}' cannot carry a path"
            )));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn page_size(&self) -> usize {
        self.list.page_size.max(1)
    }

    /// Read a single value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "api.base_url" => self.api.base_url.clone(),
            "api.timeout_secs" => self.api.timeout_secs.to_string(),
            "list.page_size" => self.list.page_size.to_string(),
            "export.dir" => self
                .export
                .dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            "export.legacy_filename" => self.export.legacy_filename.to_string(),
            "edit.stale_subjects" => self.edit.stale_subjects.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a single value by dotted key, validating it first
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                Url::parse(value)
                    .map_err(|e| DeskError::Config(format!("invalid URL '{value}': {e}")))?;
                self.api.base_url = value.to_string();
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = parse_number(key, value)?;
            }
            "list.page_size" => {
                let size: usize = parse_number(key, value)?;
                if size == 0 {
                    return Err(DeskError::Config(
                        "list.page_size must be at least 1".to_string(),
                    ));
                }
                self.list.page_size = size;
            }
            "export.dir" => {
                self.export.dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "export.legacy_filename" => {
                self.export.legacy_filename = value.parse().map_err(|_| {
                    DeskError::Config(format!("{key} must be 'true' or 'false', got '{value}'"))
                })?;
            }
            "edit.stale_subjects" => {
                self.edit.stale_subjects = value.parse()?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DeskError::Config(format!("{key} must be a whole number, got '{value}'")))
}

fn unknown_key(key: &str) -> DeskError {
    DeskError::Config(format!(
        "unknown config key '{key}', expected one of: {}",
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.list.page_size, 10);
        assert!(config.export.dir.is_none());
        assert!(!config.export.legacy_filename);
        assert_eq!(config.edit.stale_subjects, StaleSubjectsPolicy::KeepEdits);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "api:\n  base_url: https://schedules.example.org\n";
        let config: Config = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "https://schedules.example.org");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.list.page_size, 10);
    }

    #[test]
    fn test_set_and_get_roundtrip_keys() {
        let mut config = Config::default();
        config.set("list.page_size", "25").unwrap();
        config.set("export.legacy_filename", "true").unwrap();
        config.set("edit.stale_subjects", "legacy_fallback").unwrap();
        config.set("export.dir", "/tmp/exports").unwrap();

        assert_eq!(config.get("list.page_size").unwrap(), "25");
        assert_eq!(config.get("export.legacy_filename").unwrap(), "true");
        assert_eq!(config.get("edit.stale_subjects").unwrap(), "legacy_fallback");
        assert_eq!(config.get("export.dir").unwrap(), "/tmp/exports");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("list.page_size", "0").is_err());
        assert!(config.set("list.page_size", "ten").is_err());
        assert!(config.set("api.base_url", "not a url").is_err());
        assert!(config.set("export.legacy_filename", "maybe").is_err());
        assert!(config.set("auth.token", "x").is_err());
    }

    #[test]
    fn test_save_and_load_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let mut config = Config::default();
        config.set("api.base_url", "https://api.example.org").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api.base_url, "https://api.example.org");
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(loaded.list.page_size, 10);
    }

    #[test]
    #[serial]
    fn test_api_url_env_overrides_file() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { env::set_var(API_URL_ENV, "https://override.example.org/") };
        let url = Config::default().api_base_url();
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { env::remove_var(API_URL_ENV) };

        assert_eq!(url.unwrap().as_str(), "https://override.example.org/");
    }

    #[test]
    #[serial]
    fn test_blank_api_url_env_is_ignored() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { env::set_var(API_URL_ENV, "   ") };
        let url = Config::default().api_base_url();
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { env::remove_var(API_URL_ENV) };

        assert_eq!(url.unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    #[serial]
    fn test_config_dir_env_override() {
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { env::set_var(CONFIG_DIR_ENV, "/tmp/scheduledesk-test") };
        let path = Config::config_path();
        // SAFETY: We use #[serial] to ensure single-threaded access
        unsafe { env::remove_var(CONFIG_DIR_ENV) };

        assert_eq!(
            path.unwrap(),
            PathBuf::from("/tmp/scheduledesk-test/config.yaml")
        );
    }

    #[test]
    #[serial]
    fn test_bad_api_url_is_config_error() {
        let mut config = Config::default();
        config.api.base_url = "localhost".to_string();
        assert!(matches!(config.api_base_url(), Err(DeskError::Config(_))));
    }
}
