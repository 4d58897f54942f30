use std::path::PathBuf;

use serde_json::Value;

use crate::error::ErrorKind;
use crate::types::ScheduleRecord;

use super::state::OpFamily;

/// An effect requested by a view or controller and evaluated by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchAll,
    FetchOne(String),
    Add(ScheduleRecord),
    Update { id: String, record: ScheduleRecord },
    Delete(String),
    Export(String),
}

impl Command {
    pub fn family(&self) -> OpFamily {
        match self {
            Command::FetchAll => OpFamily::FetchAll,
            Command::FetchOne(_) => OpFamily::FetchOne,
            Command::Add(_) => OpFamily::Add,
            Command::Update { .. } => OpFamily::Update,
            Command::Delete(_) => OpFamily::Delete,
            Command::Export(_) => OpFamily::Export,
        }
    }
}

/// Input to [`reduce`](super::reduce)
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Started(OpFamily),
    LoggedIn(Value),
    FetchedAll(Vec<ScheduleRecord>),
    FetchedOne(ScheduleRecord),
    Added(ScheduleRecord),
    Updated {
        record: ScheduleRecord,
        message: Option<String>,
    },
    Deleted(String),
    Exported(PathBuf),
    Failed {
        family: OpFamily,
        kind: ErrorKind,
        message: String,
    },
}

impl Action {
    pub fn family(&self) -> OpFamily {
        match self {
            Action::Started(family) | Action::Failed { family, .. } => *family,
            Action::LoggedIn(_) => OpFamily::Login,
            Action::FetchedAll(_) => OpFamily::FetchAll,
            Action::FetchedOne(_) => OpFamily::FetchOne,
            Action::Added(_) => OpFamily::Add,
            Action::Updated { .. } => OpFamily::Update,
            Action::Deleted(_) => OpFamily::Delete,
            Action::Exported(_) => OpFamily::Export,
        }
    }
}
