//! Mapping HTTP failures onto [`DeskError`].

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::DeskError;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Human-readable message from an error body.
///
/// JSON bodies contribute their `message` (or `error`) field; anything else
/// is used as plain text.
pub fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(trimmed) {
        return parsed
            .message
            .or(parsed.error)
            .filter(|message| !message.trim().is_empty());
    }

    Some(trimmed.to_string())
}

/// Classify a non-success response.
///
/// `resource_id` is set for by-id routes so a 404 becomes `NotFound`.
pub fn classify_status(status: StatusCode, body: &str, resource_id: Option<&str>) -> DeskError {
    let message = server_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    });

    match (status, resource_id) {
        (StatusCode::UNAUTHORIZED, _) => DeskError::Auth(message),
        (StatusCode::NOT_FOUND, Some(id)) => DeskError::NotFound(id.to_string()),
        _ => DeskError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

pub fn transport_error(err: reqwest::Error) -> DeskError {
    if err.is_decode() {
        DeskError::MalformedResponse(err.to_string())
    } else if err.is_timeout() {
        DeskError::Transport(format!("request timed out: {err}"))
    } else {
        DeskError::Transport(err.to_string())
    }
}
