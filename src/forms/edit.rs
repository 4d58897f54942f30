use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};
use crate::store::Command;
use crate::types::ScheduleRecord;

use super::{FormController, ScheduleDraft, Submission};

/// How the edit form treats subjects when the fetched record has gaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleSubjectsPolicy {
    /// Submit the subjects as edited
    #[default]
    KeepEdits,
    /// Submit the fetched subjects unchanged whenever any fetched subject
    /// has an empty lecture slot
    LegacyFallback,
}

impl fmt::Display for StaleSubjectsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleSubjectsPolicy::KeepEdits => write!(f, "keep_edits"),
            StaleSubjectsPolicy::LegacyFallback => write!(f, "legacy_fallback"),
        }
    }
}

impl FromStr for StaleSubjectsPolicy {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "keep_edits" => Ok(StaleSubjectsPolicy::KeepEdits),
            "legacy_fallback" => Ok(StaleSubjectsPolicy::LegacyFallback),
            other => Err(DeskError::Config(format!(
                "edit.stale_subjects must be 'keep_edits' or 'legacy_fallback', got '{other}'"
            ))),
        }
    }
}

/// Edit form for one existing schedule.
///
/// Opening the form requests the current record; the draft stays empty
/// until [`seed`](EditController::seed) receives it.
#[derive(Debug, Clone)]
pub struct EditController {
    id: String,
    policy: StaleSubjectsPolicy,
    fetched: Option<ScheduleRecord>,
    draft: ScheduleDraft,
}

impl EditController {
    pub fn open(id: impl Into<String>, policy: StaleSubjectsPolicy) -> (Self, Command) {
        let id = id.into();
        let controller = Self {
            id: id.clone(),
            policy,
            fetched: None,
            draft: ScheduleDraft::default(),
        };
        (controller, Command::FetchOne(id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_seeded(&self) -> bool {
        self.fetched.is_some()
    }

    /// Fill the draft from the fetched record. Records for another id are
    /// ignored; returns whether the draft was seeded.
    pub fn seed(&mut self, record: &ScheduleRecord) -> bool {
        if record.id.as_deref() != Some(self.id.as_str()) {
            return false;
        }
        self.draft = ScheduleDraft::from_record(record);
        self.fetched = Some(record.clone());
        true
    }

    fn submitted_record(&self, fetched: &ScheduleRecord) -> ScheduleRecord {
        let mut record = self.draft.to_record(Some(self.id.clone()));
        if self.policy == StaleSubjectsPolicy::LegacyFallback
            && fetched
                .subjects
                .iter()
                .any(|subject| subject.lectures.has_empty_slot())
        {
            tracing::debug!(
                "schedule {}: fetched subjects have empty slots, submitting them unchanged",
                self.id
            );
            record.subjects = fetched.subjects.clone();
        }
        record
    }
}

impl FormController for EditController {
    fn draft(&self) -> &ScheduleDraft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut ScheduleDraft {
        &mut self.draft
    }

    fn title(&self) -> &'static str {
        "Schedule Details"
    }

    fn submit(&mut self) -> Result<Submission> {
        let fetched = self.fetched.as_ref().ok_or_else(|| {
            DeskError::validation("schedule", "still loading the schedule; try again")
        })?;
        self.draft.validate()?;

        let record = self.submitted_record(fetched);
        self.draft.clear();
        Ok(Submission {
            command: Command::Update {
                id: self.id.clone(),
                record,
            },
            close: true,
        })
    }
}
