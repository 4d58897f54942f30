use super::action::Action;
use super::state::{AppState, OpStatus};

/// Apply one action to the state. Pure: no I/O, no clock.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    let family = action.family();

    match action {
        Action::Started(_) => {
            state.status.set(family, OpStatus::Loading);
            return state;
        }
        Action::Failed { kind, message, .. } => {
            state.status.set(family, OpStatus::Failed);
            state.last_error = Some(message);
            state.last_error_kind = Some(kind);
            return state;
        }
        Action::LoggedIn(user) => {
            state.user = Some(user);
        }
        Action::FetchedAll(records) => {
            state.schedules = records;
        }
        Action::FetchedOne(record) => {
            state.focused = Some(record);
        }
        Action::Added(record) => {
            state.schedules.push(record);
        }
        Action::Updated { record, message } => {
            if let Some(id) = record.id.as_deref() {
                if let Some(slot) = state
                    .schedules
                    .iter_mut()
                    .find(|existing| existing.id.as_deref() == Some(id))
                {
                    *slot = record.clone();
                }
                if state
                    .focused
                    .as_ref()
                    .is_some_and(|focused| focused.id.as_deref() == Some(id))
                {
                    state.focused = Some(record);
                }
            }
            state.last_message = message;
        }
        Action::Deleted(id) => {
            state
                .schedules
                .retain(|record| record.id.as_deref() != Some(id.as_str()));
            if state
                .focused
                .as_ref()
                .is_some_and(|focused| focused.id.as_deref() == Some(id.as_str()))
            {
                state.focused = None;
            }
        }
        Action::Exported(path) => {
            state.last_export = Some(path);
        }
    }

    state.status.set(family, OpStatus::Succeeded);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::store::state::OpFamily;
    use crate::types::ScheduleRecord;

    fn record(id: &str, school: &str) -> ScheduleRecord {
        ScheduleRecord {
            id: Some(id.to_string()),
            school_name: school.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_started_then_fetched_all() {
        let state = reduce(AppState::default(), Action::Started(OpFamily::FetchAll));
        assert_eq!(state.status.fetch_all, OpStatus::Loading);

        let state = reduce(
            state,
            Action::FetchedAll(vec![record("1", "A"), record("2", "B")]),
        );
        assert_eq!(state.status.fetch_all, OpStatus::Succeeded);
        assert_eq!(state.schedules.len(), 2);
    }

    #[test]
    fn test_added_appends() {
        let state = AppState {
            schedules: vec![record("1", "A")],
            ..Default::default()
        };
        let state = reduce(state, Action::Added(record("2", "B")));
        let ids: Vec<_> = state.schedules.iter().filter_map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(state.status.add, OpStatus::Succeeded);
    }

    #[test]
    fn test_updated_replaces_in_place_and_refreshes_focus() {
        let state = AppState {
            schedules: vec![record("1", "A"), record("2", "B")],
            focused: Some(record("2", "B")),
            ..Default::default()
        };
        let state = reduce(
            state,
            Action::Updated {
                record: record("2", "B2"),
                message: Some("Schedule updated".into()),
            },
        );
        assert_eq!(state.schedules[1].school_name, "B2");
        assert_eq!(state.schedules[0].school_name, "A");
        assert_eq!(state.focused.unwrap().school_name, "B2");
        assert_eq!(state.last_message.as_deref(), Some("Schedule updated"));
    }

    #[test]
    fn test_updated_unknown_id_leaves_list_alone() {
        let state = AppState {
            schedules: vec![record("1", "A")],
            ..Default::default()
        };
        let state = reduce(
            state,
            Action::Updated {
                record: record("9", "Z"),
                message: None,
            },
        );
        assert_eq!(state.schedules, vec![record("1", "A")]);
    }

    #[test]
    fn test_deleted_filters_and_clears_focus() {
        let state = AppState {
            schedules: vec![record("1", "A"), record("2", "B")],
            focused: Some(record("1", "A")),
            ..Default::default()
        };
        let state = reduce(state, Action::Deleted("1".into()));
        assert_eq!(state.schedules, vec![record("2", "B")]);
        assert!(state.focused.is_none());
    }

    #[test]
    fn test_failed_records_error_and_keeps_data() {
        let state = AppState {
            schedules: vec![record("1", "A")],
            ..Default::default()
        };
        let state = reduce(
            state,
            Action::Failed {
                family: OpFamily::Delete,
                kind: ErrorKind::Transport,
                message: "connection refused".into(),
            },
        );
        assert_eq!(state.status.delete, OpStatus::Failed);
        assert_eq!(state.last_error.as_deref(), Some("connection refused"));
        assert_eq!(state.last_error_kind, Some(ErrorKind::Transport));
        assert_eq!(state.schedules.len(), 1);
    }
}
