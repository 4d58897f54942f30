//! Add and edit form controllers.
//!
//! A controller owns a [`ScheduleDraft`] while its form is open. Submitting
//! validates the draft and yields a [`Submission`] carrying the store
//! [`Command`] to run; the controller never calls the gateway itself.

mod add;
mod draft;
mod edit;

use crate::error::Result;
use crate::store::Command;

pub use add::AddController;
pub use draft::{FieldPath, ScalarField, ScheduleDraft, SubjectDraft};
pub use edit::{EditController, StaleSubjectsPolicy};

/// What a successful submit asks of its caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub command: Command,
    /// Close the form after dispatching
    pub close: bool,
}

pub trait FormController {
    fn draft(&self) -> &ScheduleDraft;

    fn draft_mut(&mut self) -> &mut ScheduleDraft;

    fn title(&self) -> &'static str;

    fn set_field(&mut self, path: FieldPath, value: &str) -> Result<()> {
        self.draft_mut().set_field(path, value)
    }

    fn add_subject_row(&mut self) -> usize {
        self.draft_mut().add_subject_row()
    }

    fn remove_subject_row(&mut self, row: usize) -> Result<()> {
        self.draft_mut().remove_subject_row(row).map(|_| ())
    }

    /// Validate and produce the command. The draft is cleared on success and
    /// left untouched on failure.
    fn submit(&mut self) -> Result<Submission>;
}
