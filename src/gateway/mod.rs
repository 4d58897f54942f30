//! Access to schedule records held by the remote schedule API.
//!
//! [`RecordGateway`] is the seam between the application store and the
//! network. [`HttpGateway`] talks to the real API; tests substitute an
//! in-memory implementation.

pub mod error;
pub mod export;
pub mod http;

use url::Url;

use crate::error::{DeskError, Result};
use crate::types::ScheduleRecord;

pub use export::ExportSink;
pub use http::HttpGateway;

/// Stored record after an update, plus the server's acknowledgement when
/// it answered with one instead of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub record: ScheduleRecord,
    pub message: Option<String>,
}

/// CRUD and export operations against the schedule API
pub trait RecordGateway: Send + Sync {
    /// All schedules visible to the current session
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<ScheduleRecord>>> + Send;

    /// One schedule; an unknown id is [`DeskError::NotFound`]
    fn get_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<ScheduleRecord>> + Send;

    /// Persist a draft. The draft must not carry an id; the returned record does.
    fn create(
        &self,
        draft: &ScheduleRecord,
    ) -> impl std::future::Future<Output = Result<ScheduleRecord>> + Send;

    /// Replace the stored record with `patch`
    fn update(
        &self,
        id: &str,
        patch: &ScheduleRecord,
    ) -> impl std::future::Future<Output = Result<UpdateOutcome>> + Send;

    fn remove(&self, id: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Rendered PDF for one schedule
    fn export_document(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Join path segments onto the API base URL, percent-encoding each segment.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| DeskError::Config(format!("invalid API base URL '{base}'")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
