use crate::error::Result;
use crate::store::Command;

use super::{FormController, ScheduleDraft, Submission};

#[derive(Debug, Clone, Default)]
pub struct AddController {
    draft: ScheduleDraft,
}

impl AddController {
    pub fn new() -> Self {
        Self {
            draft: ScheduleDraft::new(),
        }
    }

    /// Start from existing values, e.g. a file passed to `add --from`
    pub fn with_draft(draft: ScheduleDraft) -> Self {
        Self { draft }
    }
}

impl FormController for AddController {
    fn draft(&self) -> &ScheduleDraft {
        &self.draft
    }

    fn draft_mut(&mut self) -> &mut ScheduleDraft {
        &mut self.draft
    }

    fn title(&self) -> &'static str {
        "Add Schedule"
    }

    fn submit(&mut self) -> Result<Submission> {
        self.draft.validate()?;
        let record = self.draft.to_record(None);
        self.draft.clear();
        Ok(Submission {
            command: Command::Add(record),
            close: true,
        })
    }
}
