use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("schedule '{0}' not found")]
    NotFound(String),

    #[error("cannot reach schedule API: {0}")]
    Transport(String),

    #[error("schedule API error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("malformed response from schedule API: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl DeskError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DeskError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Coarse category used for status flags and exit reporting
    pub fn kind(&self) -> ErrorKind {
        match self {
            DeskError::Validation { .. } => ErrorKind::Validation,
            DeskError::Auth(_) => ErrorKind::Auth,
            DeskError::NotFound(_) => ErrorKind::NotFound,
            DeskError::Transport(_) => ErrorKind::Transport,
            DeskError::Server { .. } | DeskError::MalformedResponse(_) => ErrorKind::Server,
            DeskError::Config(_)
            | DeskError::Io(_)
            | DeskError::YamlParse(_)
            | DeskError::Json(_)
            | DeskError::Other(_) => ErrorKind::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Transport,
    Server,
    Local,
}

pub type Result<T> = std::result::Result<T, DeskError>;
