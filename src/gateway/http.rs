//! [`RecordGateway`] over the schedule API's REST routes.
//!
//! # Security Note
//!
//! The bearer token is attached as a header value marked sensitive, so
//! reqwest and hyper never print it, even with `SCHEDULEDESK_LOG=reqwest=trace`.
//! Request logs in this module name the method and URL only.

use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use reqwest::{Client, Method, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::{DeskError, Result};
use crate::session::SessionStore;
use crate::types::ScheduleRecord;

use super::error::{classify_status, transport_error};
use super::{RecordGateway, UpdateOutcome, endpoint};

const API_PREFIX: [&str; 2] = ["api", "v1"];

/// Fields only a stored record carries. A reply holding none of them is an
/// acknowledgement, whatever else it contains.
const RECORD_FIELDS: [&str; 3] = ["schoolName", "principalName", "subjects"];

/// Interpret the reply to `PUT /schedule/{id}`: either the stored record or
/// an acknowledgement, in which case `sent` is what the server now holds.
fn read_update_reply(id: &str, sent: ScheduleRecord, reply: Value) -> Result<UpdateOutcome> {
    let is_record = reply
        .as_object()
        .is_some_and(|fields| RECORD_FIELDS.iter().any(|key| fields.contains_key(*key)));

    if is_record {
        let record: ScheduleRecord = serde_json::from_value(reply)
            .map_err(|e| DeskError::MalformedResponse(e.to_string()))?;
        let record = if record.id.is_some() {
            record
        } else {
            record.with_id(id)
        };
        return Ok(UpdateOutcome {
            record,
            message: None,
        });
    }

    let message = reply
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    tracing::info!(
        "schedule {id} updated: {}",
        message.as_deref().unwrap_or("no message")
    );
    Ok(UpdateOutcome {
        record: sent,
        message,
    })
}

pub struct HttpGateway {
    client: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl HttpGateway {
    pub fn new(config: &Config, session: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DeskError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: session.base_url().clone(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn route(&self, segments: &[&str]) -> Result<Url> {
        let path: Vec<&str> = API_PREFIX.iter().chain(segments).copied().collect();
        endpoint(&self.base_url, &path)
    }

    fn authorization(&self) -> Result<HeaderValue> {
        let token = self.session.current_token().ok_or_else(|| {
            DeskError::Auth("not logged in. Run: scheduledesk login".to_string())
        })?;

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| DeskError::Auth("stored token is not a valid header value".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Send an authenticated request and reject non-success statuses.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&ScheduleRecord>,
        resource_id: Option<&str>,
    ) -> Result<Response> {
        let auth = self.authorization()?;

        tracing::debug!("{method} {url}");
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(header::AUTHORIZATION, auth);
        if let Some(record) = body {
            request = request.json(record);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{method} {url} failed: {e}");
            transport_error(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let err = classify_status(status, &text, resource_id);
        tracing::warn!("{method} {url} returned {status}: {err}");
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let text = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&text).map_err(|e| DeskError::MalformedResponse(e.to_string()))
    }
}

impl RecordGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<ScheduleRecord>> {
        let url = self.route(&["get-schedules"])?;
        let response = self.send(Method::GET, url, None, None).await?;
        Self::read_json(response).await
    }

    async fn get_by_id(&self, id: &str) -> Result<ScheduleRecord> {
        let url = self.route(&["get-schedule", id])?;
        let response = self.send(Method::GET, url, None, Some(id)).await?;
        let record: ScheduleRecord = Self::read_json(response).await?;
        if record.id.is_some() {
            Ok(record)
        } else {
            Ok(record.with_id(id))
        }
    }

    async fn create(&self, draft: &ScheduleRecord) -> Result<ScheduleRecord> {
        if draft.id.is_some() {
            return Err(DeskError::validation(
                "id",
                "a new schedule must not carry an id",
            ));
        }

        let url = self.route(&["add-schedule"])?;
        let response = self.send(Method::POST, url, Some(draft), None).await?;
        let created: ScheduleRecord = Self::read_json(response).await?;
        if created.id.is_none() {
            return Err(DeskError::MalformedResponse(
                "created schedule has no id".to_string(),
            ));
        }
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &ScheduleRecord) -> Result<UpdateOutcome> {
        let body = patch.clone().with_id(id);
        let url = self.route(&["schedule", id])?;
        let response = self.send(Method::PUT, url, Some(&body), Some(id)).await?;

        let reply: Value = Self::read_json(response).await?;
        read_update_reply(id, body, reply)
    }

    async fn remove(&self, id: &str) -> Result<()> {
        let url = self.route(&["remove-schedule", id])?;
        self.send(Method::DELETE, url, None, Some(id)).await?;
        Ok(())
    }

    async fn export_document(&self, id: &str) -> Result<Vec<u8>> {
        let url = self.route(&["get-schedule-pdf", id])?;
        let response = self.send(Method::GET, url, None, Some(id)).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sent() -> ScheduleRecord {
        ScheduleRecord {
            id: Some("s1".into()),
            school_name: "Sunrise".into(),
            division: "B".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_acknowledgement_with_extra_keys_keeps_sent_record() {
        let reply = json!({"message": "Schedule updated successfully", "success": true});
        let outcome = read_update_reply("s1", sent(), reply).unwrap();
        assert_eq!(outcome.record, sent());
        assert_eq!(
            outcome.message.as_deref(),
            Some("Schedule updated successfully")
        );
    }

    #[test]
    fn test_acknowledgement_without_message() {
        let outcome = read_update_reply("s1", sent(), json!({"ok": 1})).unwrap();
        assert_eq!(outcome.record, sent());
        assert_eq!(outcome.message, None);
    }

    #[test]
    fn test_echoed_record_gets_route_id() {
        let reply = json!({
            "schoolName": "Moonrise",
            "principalName": "P",
            "vicePrincipalName": "VP",
            "standard": "7",
            "division": "C",
            "subjects": []
        });
        let outcome = read_update_reply("s1", sent(), reply).unwrap();
        assert_eq!(outcome.record.id.as_deref(), Some("s1"));
        assert_eq!(outcome.record.school_name, "Moonrise");
        assert_eq!(outcome.message, None);
    }
}
