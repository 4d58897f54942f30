//! Field list of the add and edit modals

use iocraft::prelude::*;

use crate::tui::model::FormLineViewModel;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct ScheduleFormProps {
    pub lines: Vec<FormLineViewModel>,
    /// Edit form still waiting for its record
    pub loading: bool,
}

#[component]
pub fn ScheduleForm(props: &ScheduleFormProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    if props.loading {
        return element! {
            View(padding: 1) {
                Text(content: "Loading schedule…", color: theme.loading)
            }
        };
    }

    // keep the cursor on screen in long forms
    let focused = props.lines.iter().position(|line| line.is_focused).unwrap_or(0);
    let skip = focused.saturating_sub(12);

    element! {
        View(flex_direction: FlexDirection::Column) {
            #(props.lines.iter().skip(skip).map(|line| {
                let marker = if line.is_focused { "›" } else { " " };
                let (value, color) = match (line.value.is_empty(), line.is_enumerated) {
                    (true, true) => ("(none)".to_string(), theme.empty_value),
                    (true, false) => (String::new(), theme.text),
                    (false, true) => (format!("‹ {} ›", line.value), theme.enumerated),
                    (false, false) => (line.value.clone(), theme.text),
                };
                let value = if line.is_focused && !line.is_enumerated {
                    format!("{value}▏")
                } else {
                    value
                };
                element! {
                    View(
                        flex_direction: FlexDirection::Row,
                        background_color: line.is_focused.then_some(theme.selected_background),
                    ) {
                        View(width: 2) { Text(content: marker, color: theme.highlight) }
                        View(width: 22) { Text(content: line.label.clone(), color: theme.label) }
                        Text(content: value, color: color)
                    }
                }
            }))
        }
    }
}
