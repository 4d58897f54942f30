use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;

use crate::error::ErrorKind;
use crate::types::ScheduleRecord;

/// Lifecycle of the most recent call in one operation family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpFamily {
    Login,
    FetchAll,
    FetchOne,
    Add,
    Update,
    Delete,
    Export,
}

impl OpFamily {
    pub const ALL: [OpFamily; 7] = [
        OpFamily::Login,
        OpFamily::FetchAll,
        OpFamily::FetchOne,
        OpFamily::Add,
        OpFamily::Update,
        OpFamily::Delete,
        OpFamily::Export,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            OpFamily::Login => "login",
            OpFamily::FetchAll => "load schedules",
            OpFamily::FetchOne => "load schedule",
            OpFamily::Add => "add schedule",
            OpFamily::Update => "update schedule",
            OpFamily::Delete => "delete schedule",
            OpFamily::Export => "export schedule",
        }
    }
}

/// One status flag per operation family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusBoard {
    pub login: OpStatus,
    pub fetch_all: OpStatus,
    pub fetch_one: OpStatus,
    pub add: OpStatus,
    pub update: OpStatus,
    pub delete: OpStatus,
    pub export: OpStatus,
    /// Bumped each time a family reaches `Succeeded` or `Failed`, so a
    /// subscriber that never saw `Loading` still notices the call settled.
    #[serde(skip)]
    settled: [u64; OpFamily::ALL.len()],
}

impl StatusBoard {
    pub fn get(&self, family: OpFamily) -> OpStatus {
        match family {
            OpFamily::Login => self.login,
            OpFamily::FetchAll => self.fetch_all,
            OpFamily::FetchOne => self.fetch_one,
            OpFamily::Add => self.add,
            OpFamily::Update => self.update,
            OpFamily::Delete => self.delete,
            OpFamily::Export => self.export,
        }
    }

    pub fn set(&mut self, family: OpFamily, status: OpStatus) {
        let slot = match family {
            OpFamily::Login => &mut self.login,
            OpFamily::FetchAll => &mut self.fetch_all,
            OpFamily::FetchOne => &mut self.fetch_one,
            OpFamily::Add => &mut self.add,
            OpFamily::Update => &mut self.update,
            OpFamily::Delete => &mut self.delete,
            OpFamily::Export => &mut self.export,
        };
        *slot = status;
        if matches!(status, OpStatus::Succeeded | OpStatus::Failed) {
            self.settled[family.index()] += 1;
        }
    }

    /// How many calls in `family` have finished so far
    pub fn settled(&self, family: OpFamily) -> u64 {
        self.settled[family.index()]
    }

    pub fn any_loading(&self) -> bool {
        OpFamily::ALL
            .iter()
            .any(|family| self.get(*family) == OpStatus::Loading)
    }
}

/// Everything the views render from
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppState {
    /// Identity payload of the signed-in user
    pub user: Option<Value>,
    pub schedules: Vec<ScheduleRecord>,
    /// Record loaded for editing
    pub focused: Option<ScheduleRecord>,
    pub status: StatusBoard,
    pub last_error: Option<String>,
    pub last_error_kind: Option<ErrorKind>,
    /// Server acknowledgement of the last update
    pub last_message: Option<String>,
    pub last_export: Option<PathBuf>,
}

impl AppState {
    pub fn find(&self, id: &str) -> Option<&ScheduleRecord> {
        self.schedules
            .iter()
            .find(|record| record.id.as_deref() == Some(id))
    }
}
