//! Login and the persisted bearer token.
//!
//! The token received from `/auth/signin` is written to a single file named
//! `authToken` in the data directory and read back by every later process.
//! It is held in memory as a [`SecretString`] and never formatted.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::gateway::endpoint;
use crate::gateway::error::{server_message, transport_error};
use crate::validation::Credentials;

pub const TOKEN_FILE_NAME: &str = "authToken";

const SIGNIN_PATH: &[&str] = &["auth", "signin"];

/// Result of a successful login
pub struct AuthSession {
    pub token: SecretString,
    /// Login response with the token removed
    pub user: Value,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Serialize)]
struct SignInBody<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct SessionStore {
    client: Client,
    base_url: Url,
    token_path: PathBuf,
    token: RwLock<Option<SecretString>>,
}

impl SessionStore {
    /// Open the session for the configured API, loading any persisted token
    pub fn open(config: &Config) -> Result<Self> {
        let token_path = Config::data_dir()?.join(TOKEN_FILE_NAME);
        Self::with_paths(config.api_base_url()?, token_path, config.timeout())
    }

    pub fn with_paths(base_url: Url, token_path: PathBuf, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeskError::Transport(format!("failed to build HTTP client: {e}")))?;

        let token = read_token(&token_path)?;
        if token.is_some() {
            tracing::debug!("loaded session token from {}", token_path.display());
        }

        Ok(Self {
            client,
            base_url,
            token_path,
            token: RwLock::new(token),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    pub fn current_token(&self) -> Option<SecretString> {
        self.token
            .read()
            .as_ref()
            .map(|token| SecretString::from(token.expose_secret().to_string()))
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.read().is_some()
    }

    /// Exchange credentials for a token and persist it.
    ///
    /// Credentials are checked locally first; a malformed email or weak
    /// password never reaches the network.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        credentials.validate()?;

        let url = endpoint(&self.base_url, SIGNIN_PATH)?;
        tracing::debug!("POST {url} as {}", credentials.username);
        let response = self
            .client
            .post(url)
            .json(&SignInBody {
                username: &credentials.username,
                password: credentials.password.expose_secret(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = server_message(&body).unwrap_or_else(|| status.to_string());
            tracing::warn!("sign-in rejected ({status}): {message}");
            return Err(match status.as_u16() {
                400 | 401 | 403 => DeskError::Auth(message),
                code => DeskError::Server {
                    status: code,
                    message,
                },
            });
        }

        let session = parse_signin(&body)?;
        self.store_token(&session.token)?;
        tracing::info!("signed in as {}", credentials.username);
        Ok(session)
    }

    fn store_token(&self, token: &SecretString) -> Result<()> {
        if let Some(parent) = self.token_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.token_path, token.expose_secret()).map_err(|e| {
            DeskError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to write session token at {}: {}",
                    self.token_path.display(),
                    e
                ),
            ))
        })?;

        // Owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.token_path, fs::Permissions::from_mode(0o600))?;
        }

        *self.token.write() = Some(SecretString::from(token.expose_secret().to_string()));
        Ok(())
    }
}

fn read_token(path: &Path) -> Result<Option<SecretString>> {
    match fs::read_to_string(path) {
        Ok(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(SecretString::from(trimmed.to_string())))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_signin(body: &str) -> Result<AuthSession> {
    let mut payload: Value = serde_json::from_str(body)
        .map_err(|e| DeskError::MalformedResponse(format!("sign-in response: {e}")))?;

    let token = payload
        .as_object_mut()
        .and_then(|fields| fields.remove("token"))
        .and_then(|token| token.as_str().map(str::to_string))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            DeskError::MalformedResponse("sign-in response has no token".to_string())
        })?;

    Ok(AuthSession {
        token: SecretString::from(token),
        user: payload,
    })
}
