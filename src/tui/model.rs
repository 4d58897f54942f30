//! Browser model types for testable state management
//!
//! The iocraft component in `view.rs` only wires hooks to these functions:
//! keys become [`BrowserAction`]s via [`key_to_action`], actions go through
//! [`reduce_browser_state`], and rendering reads [`compute_browser_view`].

use iocraft::prelude::{KeyCode, KeyModifiers};

use crate::confirm::ConfirmationGate;
use crate::forms::{
    AddController, EditController, FieldPath, FormController, StaleSubjectsPolicy,
};
use crate::list_view::ListView;
use crate::store::{AppState, Command, OpFamily, OpStatus};
use crate::tui::components::footer::{
    Shortcut, confirm_shortcuts, form_shortcuts, list_shortcuts,
};
use crate::tui::components::toast::Toast;
use crate::types::ScheduleRecord;

// ============================================================================
// State Types
// ============================================================================

#[derive(Debug, Clone, Default)]
pub enum Modal {
    #[default]
    None,
    Add(AddController),
    Edit(EditController),
    Confirm,
}

#[derive(Debug, Clone)]
pub struct BrowserState {
    /// Latest store snapshot
    pub app: AppState,
    pub list: ListView,
    /// Row index within the visible page
    pub selected: usize,
    pub modal: Modal,
    pub gate: ConfirmationGate,
    /// Index into the open form's field list
    pub cursor: usize,
    pub toast: Option<Toast>,
    pub policy: StaleSubjectsPolicy,
    pub should_exit: bool,
}

impl BrowserState {
    pub fn new(page_size: usize, policy: StaleSubjectsPolicy) -> Self {
        Self {
            app: AppState::default(),
            list: ListView::new(page_size),
            selected: 0,
            modal: Modal::None,
            gate: ConfirmationGate::Closed,
            cursor: 0,
            toast: None,
            policy,
            should_exit: false,
        }
    }

    pub fn visible(&self) -> &[ScheduleRecord] {
        self.list.visible(&self.app)
    }

    pub fn selected_record(&self) -> Option<&ScheduleRecord> {
        self.visible().get(self.selected)
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_record().and_then(|record| record.id.clone())
    }

    fn form(&self) -> Option<&dyn FormController> {
        match &self.modal {
            Modal::Add(form) => Some(form as &dyn FormController),
            Modal::Edit(form) => Some(form as &dyn FormController),
            Modal::None | Modal::Confirm => None,
        }
    }

    fn form_mut(&mut self) -> Option<&mut dyn FormController> {
        match &mut self.modal {
            Modal::Add(form) => Some(form as &mut dyn FormController),
            Modal::Edit(form) => Some(form as &mut dyn FormController),
            Modal::None | Modal::Confirm => None,
        }
    }

    /// Field under the form cursor
    pub fn focused_field(&self) -> Option<FieldPath> {
        self.form()
            .and_then(|form| form.draft().fields().get(self.cursor).copied())
    }

    fn clamp_selection(&mut self) {
        let total = self.app.schedules.len();
        self.list.clamp(total);
        let visible = self.visible().len();
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    fn clamp_cursor(&mut self) {
        let len = self.form().map(|form| form.draft().fields().len()).unwrap_or(0);
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

// ============================================================================
// Actions
// ============================================================================

#[derive(Debug, Clone)]
pub enum BrowserAction {
    Mount,
    StoreUpdated(AppState),

    // List
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    OpenAdd,
    OpenEdit,
    RequestDelete,
    Export,
    Refresh,
    Quit,

    // Forms
    NextField,
    PrevField,
    TypeChar(char),
    Backspace,
    CycleNext,
    CyclePrev,
    AddSubjectRow,
    RemoveSubjectRow,
    Submit,
    CloseModal,

    // Confirmation
    ConfirmDelete,
    CancelDelete,
}

// ============================================================================
// Reducer
// ============================================================================

/// Apply an action, returning the new state and the store commands to run
pub fn reduce_browser_state(
    mut state: BrowserState,
    action: BrowserAction,
) -> (BrowserState, Vec<Command>) {
    let mut commands = Vec::new();

    if !matches!(action, BrowserAction::StoreUpdated(_)) {
        state.toast = None;
    }

    match action {
        BrowserAction::Mount => commands.extend(state.list.on_mount()),
        BrowserAction::StoreUpdated(app) => {
            let previous = std::mem::replace(&mut state.app, app);
            announce_settled(&mut state, &previous);
            seed_edit_form(&mut state, &previous);
            state.clamp_selection();
        }

        BrowserAction::MoveUp => state.selected = state.selected.saturating_sub(1),
        BrowserAction::MoveDown => {
            let visible = state.visible().len();
            if visible > 0 {
                state.selected = (state.selected + 1).min(visible - 1);
            }
        }
        BrowserAction::NextPage => {
            state.list.next_page(state.app.schedules.len());
            state.selected = 0;
        }
        BrowserAction::PrevPage => {
            state.list.prev_page(state.app.schedules.len());
            state.selected = 0;
        }
        BrowserAction::OpenAdd => {
            state.modal = Modal::Add(AddController::new());
            state.cursor = 0;
        }
        BrowserAction::OpenEdit => {
            if let Some(id) = state.selected_id() {
                let (controller, fetch) = EditController::open(id, state.policy);
                state.modal = Modal::Edit(controller);
                state.cursor = 0;
                commands.push(fetch);
            }
        }
        BrowserAction::RequestDelete => {
            if let Some(id) = state.selected_id() {
                if state.gate.open(id) {
                    state.modal = Modal::Confirm;
                }
            }
        }
        BrowserAction::Export => {
            if let Some(id) = state.selected_id() {
                commands.push(Command::Export(id));
            }
        }
        BrowserAction::Refresh => {
            state.toast = Some(Toast::info("Reloading schedules"));
            commands.push(Command::FetchAll);
        }
        BrowserAction::Quit => state.should_exit = true,

        BrowserAction::NextField => {
            let len = state.form().map(|f| f.draft().fields().len()).unwrap_or(0);
            if len > 0 {
                state.cursor = (state.cursor + 1) % len;
            }
        }
        BrowserAction::PrevField => {
            let len = state.form().map(|f| f.draft().fields().len()).unwrap_or(0);
            if len > 0 {
                state.cursor = (state.cursor + len - 1) % len;
            }
        }
        BrowserAction::TypeChar(c) => {
            if let (Some(path @ FieldPath::Scalar(_)), Some(form)) =
                (state.focused_field(), state.form_mut())
            {
                let mut value = form.draft().field_value(path).unwrap_or_default();
                value.push(c);
                let _ = form.set_field(path, &value);
            }
        }
        BrowserAction::Backspace => {
            if let (Some(path), Some(form)) = (state.focused_field(), state.form_mut()) {
                let value = if path.is_enumerated() {
                    String::new()
                } else {
                    let mut value = form.draft().field_value(path).unwrap_or_default();
                    value.pop();
                    value
                };
                let _ = form.set_field(path, &value);
            }
        }
        BrowserAction::CycleNext | BrowserAction::CyclePrev => {
            let forward = matches!(action, BrowserAction::CycleNext);
            let focused = state.focused_field().filter(FieldPath::is_enumerated);
            if let (Some(path), Some(form)) = (focused, state.form_mut()) {
                let choices = path.choices();
                let current = form.draft().field_value(path).unwrap_or_default();
                let index = choices.iter().position(|c| *c == current).unwrap_or(0);
                let next = if forward {
                    (index + 1) % choices.len()
                } else {
                    (index + choices.len() - 1) % choices.len()
                };
                let _ = form.set_field(path, choices[next]);
            }
        }
        BrowserAction::AddSubjectRow => {
            if let Some(form) = state.form_mut() {
                let row = form.add_subject_row();
                let fields = form.draft().fields();
                if let Some(index) = fields
                    .iter()
                    .position(|field| *field == FieldPath::SubjectName(row))
                {
                    state.cursor = index;
                }
            }
        }
        BrowserAction::RemoveSubjectRow => {
            let row = state.focused_field().and_then(|field| field.row());
            if let (Some(row), Some(form)) = (row, state.form_mut()) {
                if form.remove_subject_row(row).is_ok() {
                    state.clamp_cursor();
                }
            }
        }
        BrowserAction::Submit => {
            let outcome = state.form_mut().map(|form| form.submit());
            match outcome {
                Some(Ok(submission)) => {
                    commands.push(submission.command);
                    if submission.close {
                        state.modal = Modal::None;
                        state.cursor = 0;
                    }
                }
                Some(Err(err)) => state.toast = Some(Toast::error(err.to_string())),
                None => {}
            }
        }
        BrowserAction::CloseModal => {
            state.gate.cancel();
            state.modal = Modal::None;
            state.cursor = 0;
        }

        BrowserAction::ConfirmDelete => {
            commands.extend(state.gate.confirm());
            state.modal = Modal::None;
        }
        BrowserAction::CancelDelete => {
            state.gate.cancel();
            state.modal = Modal::None;
        }
    }

    (state, commands)
}

/// Toast the outcome of any family that finished a call since `previous`.
/// Compares settle counts, since the watch channel may skip `Loading`.
fn announce_settled(state: &mut BrowserState, previous: &AppState) {
    for family in OpFamily::ALL {
        if state.app.status.settled(family) == previous.status.settled(family) {
            continue;
        }
        match state.app.status.get(family) {
            OpStatus::Failed => {
                let message = state
                    .app
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string());
                state.toast = Some(Toast::error(format!(
                    "Failed to {}: {}",
                    family.label(),
                    message
                )));
            }
            OpStatus::Succeeded => {
                let message = match family {
                    OpFamily::Add => Some("Schedule added".to_string()),
                    OpFamily::Update => Some(
                        state
                            .app
                            .last_message
                            .clone()
                            .unwrap_or_else(|| "Schedule updated".to_string()),
                    ),
                    OpFamily::Delete => Some("Schedule deleted".to_string()),
                    OpFamily::Export => state
                        .app
                        .last_export
                        .as_ref()
                        .map(|path| format!("Exported to {}", path.display())),
                    _ => None,
                };
                if let Some(message) = message {
                    state.toast = Some(Toast::success(message));
                }
            }
            OpStatus::Idle | OpStatus::Loading => {}
        }
    }
}

/// Seed a waiting edit form once its record arrives, or close it if the
/// fetch failed.
fn seed_edit_form(state: &mut BrowserState, previous: &AppState) {
    let Modal::Edit(controller) = &mut state.modal else {
        return;
    };
    let family = OpFamily::FetchOne;
    if controller.is_seeded()
        || state.app.status.settled(family) == previous.status.settled(family)
    {
        return;
    }

    match state.app.status.fetch_one {
        OpStatus::Succeeded => {
            if let Some(record) = &state.app.focused {
                controller.seed(record);
            }
        }
        OpStatus::Failed => state.modal = Modal::None,
        OpStatus::Idle | OpStatus::Loading => {}
    }
}

// ============================================================================
// Key Mapping
// ============================================================================

pub fn key_to_action(
    code: KeyCode,
    modifiers: KeyModifiers,
    state: &BrowserState,
) -> Option<BrowserAction> {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match &state.modal {
        Modal::Confirm => match code {
            KeyCode::Char('y') | KeyCode::Enter => Some(BrowserAction::ConfirmDelete),
            KeyCode::Char('n') | KeyCode::Esc => Some(BrowserAction::CancelDelete),
            _ => None,
        },
        Modal::Add(_) | Modal::Edit(_) => match code {
            KeyCode::Char('s') if ctrl => Some(BrowserAction::Submit),
            KeyCode::Char('n') if ctrl => Some(BrowserAction::AddSubjectRow),
            KeyCode::Char('d') if ctrl => Some(BrowserAction::RemoveSubjectRow),
            KeyCode::Esc => Some(BrowserAction::CloseModal),
            KeyCode::Tab | KeyCode::Down => Some(BrowserAction::NextField),
            KeyCode::BackTab | KeyCode::Up => Some(BrowserAction::PrevField),
            KeyCode::Right => Some(BrowserAction::CycleNext),
            KeyCode::Left => Some(BrowserAction::CyclePrev),
            KeyCode::Backspace => Some(BrowserAction::Backspace),
            KeyCode::Char(c) if !ctrl => Some(BrowserAction::TypeChar(c)),
            _ => None,
        },
        Modal::None => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(BrowserAction::Quit),
            KeyCode::Char('c') if ctrl => Some(BrowserAction::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(BrowserAction::MoveDown),
            KeyCode::Char('k') | KeyCode::Up => Some(BrowserAction::MoveUp),
            KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown => {
                Some(BrowserAction::NextPage)
            }
            KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp => {
                Some(BrowserAction::PrevPage)
            }
            KeyCode::Char('a') => Some(BrowserAction::OpenAdd),
            KeyCode::Char('e') | KeyCode::Enter => Some(BrowserAction::OpenEdit),
            KeyCode::Char('d') => Some(BrowserAction::RequestDelete),
            KeyCode::Char('x') => Some(BrowserAction::Export),
            KeyCode::Char('r') => Some(BrowserAction::Refresh),
            _ => None,
        },
    }
}

// ============================================================================
// View Model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowViewModel {
    pub number: usize,
    pub school_name: String,
    pub class: String,
    pub principal_name: String,
    pub subjects: usize,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormLineViewModel {
    pub label: String,
    pub value: String,
    pub is_focused: bool,
    pub is_enumerated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormViewModel {
    pub title: String,
    pub lines: Vec<FormLineViewModel>,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub struct BrowserViewModel {
    pub rows: Vec<RowViewModel>,
    pub page_label: String,
    pub loading: bool,
    pub empty_message: Option<String>,
    pub form: Option<FormViewModel>,
    pub confirm_target: Option<String>,
    pub shortcuts: Vec<Shortcut>,
}

fn form_line(form: &dyn FormController, path: FieldPath, focused: bool) -> FormLineViewModel {
    let label = match path {
        FieldPath::Scalar(field) => field.label().to_string(),
        FieldPath::SubjectName(row) => format!("Subject {}", row + 1),
        FieldPath::Lecture { day, .. } => format!("  {day}"),
    };
    FormLineViewModel {
        label,
        value: form.draft().field_value(path).unwrap_or_default(),
        is_focused: focused,
        is_enumerated: path.is_enumerated(),
    }
}

pub fn compute_browser_view(state: &BrowserState) -> BrowserViewModel {
    let offset = (state.list.page() - 1) * state.list.page_size();
    let rows = state
        .visible()
        .iter()
        .enumerate()
        .map(|(index, record)| RowViewModel {
            number: offset + index + 1,
            school_name: record.school_name.clone(),
            class: format!("{}-{}", record.standard, record.division),
            principal_name: record.principal_name.clone(),
            subjects: record.subjects.len(),
            is_selected: index == state.selected,
        })
        .collect::<Vec<_>>();

    let total = state.app.schedules.len();
    let loading = state.app.status.any_loading();
    let empty_message = (rows.is_empty() && !loading).then(|| {
        if state.app.status.fetch_all == OpStatus::Failed {
            "Could not load schedules. Press r to retry.".to_string()
        } else {
            "No schedules yet. Press a to add one.".to_string()
        }
    });

    let form = state.form().map(|form| {
        let loading = matches!(&state.modal, Modal::Edit(edit) if !edit.is_seeded());
        FormViewModel {
            title: form.title().to_string(),
            lines: form
                .draft()
                .fields()
                .into_iter()
                .enumerate()
                .map(|(index, path)| form_line(form, path, index == state.cursor))
                .collect(),
            loading,
        }
    });

    let shortcuts = match &state.modal {
        Modal::None => list_shortcuts(),
        Modal::Add(_) | Modal::Edit(_) => form_shortcuts(),
        Modal::Confirm => confirm_shortcuts(),
    };

    BrowserViewModel {
        rows,
        page_label: format!(
            "Page {} of {} ({} schedules)",
            state.list.page(),
            state.list.page_count(total),
            total
        ),
        loading,
        empty_message,
        form,
        confirm_target: state
            .gate
            .target()
            .map(|id| state.app.find(id).map(|r| r.label()).unwrap_or_else(|| id.to_string())),
        shortcuts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Action, reduce};

    fn record(id: &str) -> ScheduleRecord {
        ScheduleRecord {
            id: Some(id.to_string()),
            school_name: format!("School {id}"),
            standard: "7".into(),
            division: "A".into(),
            ..Default::default()
        }
    }

    fn loaded(n: usize) -> BrowserState {
        let mut state = BrowserState::new(10, StaleSubjectsPolicy::KeepEdits);
        state.app.schedules = (0..n).map(|i| record(&i.to_string())).collect();
        state
    }

    fn key(state: &BrowserState, code: KeyCode) -> Option<BrowserAction> {
        key_to_action(code, KeyModifiers::NONE, state)
    }

    #[test]
    fn test_mount_emits_fetch_once() {
        let state = loaded(0);
        let (state, commands) = reduce_browser_state(state, BrowserAction::Mount);
        assert_eq!(commands, vec![Command::FetchAll]);
        let (_, commands) = reduce_browser_state(state, BrowserAction::Mount);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_move_down_stops_at_last_visible_row() {
        let mut state = loaded(3);
        for _ in 0..5 {
            state = reduce_browser_state(state, BrowserAction::MoveDown).0;
        }
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_open_edit_requests_selected_record() {
        let state = loaded(2);
        let (state, _) = reduce_browser_state(state, BrowserAction::MoveDown);
        let (state, commands) = reduce_browser_state(state, BrowserAction::OpenEdit);
        assert_eq!(commands, vec![Command::FetchOne("1".into())]);
        assert!(matches!(state.modal, Modal::Edit(_)));
    }

    #[test]
    fn test_delete_goes_through_confirmation() {
        let state = loaded(1);
        let (state, commands) = reduce_browser_state(state, BrowserAction::RequestDelete);
        assert!(commands.is_empty());
        assert!(matches!(state.modal, Modal::Confirm));

        let (state, commands) = reduce_browser_state(state, BrowserAction::ConfirmDelete);
        assert_eq!(commands, vec![Command::Delete("0".into())]);
        assert!(matches!(state.modal, Modal::None));
        assert!(!state.gate.is_open());
    }

    #[test]
    fn test_cancel_delete_emits_nothing() {
        let state = loaded(1);
        let (state, _) = reduce_browser_state(state, BrowserAction::RequestDelete);
        let (state, commands) = reduce_browser_state(state, BrowserAction::CancelDelete);
        assert!(commands.is_empty());
        assert!(matches!(state.modal, Modal::None));
    }

    #[test]
    fn test_typing_edits_focused_scalar() {
        let state = loaded(0);
        let (mut state, _) = reduce_browser_state(state, BrowserAction::OpenAdd);
        for c in "Sunrisf".chars() {
            state = reduce_browser_state(state, BrowserAction::TypeChar(c)).0;
        }
        state = reduce_browser_state(state, BrowserAction::Backspace).0;
        state = reduce_browser_state(state, BrowserAction::TypeChar('e')).0;
        let Modal::Add(form) = &state.modal else {
            panic!("add form should be open");
        };
        assert_eq!(form.draft().school_name, "Sunrise");
    }

    #[test]
    fn test_cycle_enumerated_field_wraps() {
        let state = loaded(0);
        let (mut state, _) = reduce_browser_state(state, BrowserAction::OpenAdd);
        // five scalar fields, then the first subject name
        for _ in 0..5 {
            state = reduce_browser_state(state, BrowserAction::NextField).0;
        }
        assert_eq!(state.focused_field(), Some(FieldPath::SubjectName(0)));

        state = reduce_browser_state(state, BrowserAction::CycleNext).0;
        assert_eq!(
            state.form().unwrap().draft().field_value(FieldPath::SubjectName(0)).as_deref(),
            Some("English")
        );
        state = reduce_browser_state(state, BrowserAction::CyclePrev).0;
        state = reduce_browser_state(state, BrowserAction::CyclePrev).0;
        assert_eq!(
            state.form().unwrap().draft().field_value(FieldPath::SubjectName(0)).as_deref(),
            Some("Drawing")
        );
    }

    #[test]
    fn test_invalid_submit_keeps_form_open_with_toast() {
        let state = loaded(0);
        let (state, _) = reduce_browser_state(state, BrowserAction::OpenAdd);
        let (state, commands) = reduce_browser_state(state, BrowserAction::Submit);
        assert!(commands.is_empty());
        assert!(matches!(state.modal, Modal::Add(_)));
        assert!(state.toast.is_some());
    }

    #[test]
    fn test_store_update_seeds_waiting_edit_form() {
        let state = loaded(1);
        let (state, _) = reduce_browser_state(state, BrowserAction::OpenEdit);

        let loading = reduce(state.app.clone(), Action::Started(OpFamily::FetchOne));
        let (state, _) = reduce_browser_state(state, BrowserAction::StoreUpdated(loading.clone()));
        let fetched = reduce(loading, Action::FetchedOne(record("0")));
        let (state, _) = reduce_browser_state(state, BrowserAction::StoreUpdated(fetched));

        let Modal::Edit(form) = &state.modal else {
            panic!("edit form should stay open");
        };
        assert!(form.is_seeded());
        assert_eq!(form.draft().school_name, "School 0");
    }

    #[test]
    fn test_failed_operation_raises_error_toast() {
        let state = loaded(1);
        let loading = reduce(state.app.clone(), Action::Started(OpFamily::Export));
        let (state, _) = reduce_browser_state(state, BrowserAction::StoreUpdated(loading.clone()));
        let failed = reduce(
            loading,
            Action::Failed {
                family: OpFamily::Export,
                kind: crate::error::ErrorKind::Transport,
                message: "connection refused".into(),
            },
        );
        let (state, _) = reduce_browser_state(state, BrowserAction::StoreUpdated(failed));
        let toast = state.toast.unwrap();
        assert!(toast.message.contains("connection refused"));
    }

    #[test]
    fn test_keys_depend_on_modal() {
        let mut state = loaded(1);
        assert!(matches!(key(&state, KeyCode::Char('d')), Some(BrowserAction::RequestDelete)));

        state.modal = Modal::Add(AddController::new());
        assert!(matches!(key(&state, KeyCode::Char('d')), Some(BrowserAction::TypeChar('d'))));
        assert!(matches!(
            key_to_action(KeyCode::Char('s'), KeyModifiers::CONTROL, &state),
            Some(BrowserAction::Submit)
        ));

        state.modal = Modal::Confirm;
        assert!(matches!(key(&state, KeyCode::Char('y')), Some(BrowserAction::ConfirmDelete)));
        assert!(key(&state, KeyCode::Char('a')).is_none());
    }

    #[test]
    fn test_view_model_rows_and_page_label() {
        let mut state = loaded(12);
        state = reduce_browser_state(state, BrowserAction::NextPage).0;
        let view = compute_browser_view(&state);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].number, 11);
        assert_eq!(view.rows[0].class, "7-A");
        assert!(view.rows[0].is_selected);
        assert_eq!(view.page_label, "Page 2 of 2 (12 schedules)");
    }
}
