//! Paged schedule table

use iocraft::prelude::*;

use crate::tui::model::RowViewModel;
use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct ScheduleTableProps {
    pub rows: Vec<RowViewModel>,
    /// Shown in place of the rows when there are none
    pub empty_message: Option<String>,
}

#[component]
pub fn ScheduleTable(props: &ScheduleTableProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            flex_grow: 1.0,
            width: 100pct,
            flex_direction: FlexDirection::Column,
            border_style: BorderStyle::Round,
            border_color: theme.border,
            overflow: Overflow::Hidden,
        ) {
            View(flex_direction: FlexDirection::Row, padding_left: 1, padding_right: 1) {
                View(width: 5) { Text(content: "#", color: theme.text_dimmed, weight: Weight::Bold) }
                View(flex_grow: 1.0) { Text(content: "School", color: theme.text_dimmed, weight: Weight::Bold) }
                View(width: 10) { Text(content: "Class", color: theme.text_dimmed, weight: Weight::Bold) }
                View(width: 24) { Text(content: "Principal", color: theme.text_dimmed, weight: Weight::Bold) }
                View(width: 9) { Text(content: "Subjects", color: theme.text_dimmed, weight: Weight::Bold) }
            }
            #(props.empty_message.clone().map(|message| element! {
                View(flex_grow: 1.0, justify_content: JustifyContent::Center, align_items: AlignItems::Center) {
                    Text(content: message, color: theme.text_dimmed)
                }
            }))
            #(props.rows.iter().map(|row| {
                let background = row.is_selected.then_some(theme.selected_background);
                element! {
                    View(
                        flex_direction: FlexDirection::Row,
                        padding_left: 1,
                        padding_right: 1,
                        background_color: background,
                    ) {
                        View(width: 5) { Text(content: row.number.to_string(), color: theme.row_number) }
                        View(flex_grow: 1.0) { Text(content: row.school_name.clone(), color: theme.school) }
                        View(width: 10) { Text(content: row.class.clone(), color: theme.class) }
                        View(width: 24) { Text(content: row.principal_name.clone(), color: theme.text) }
                        View(width: 9) { Text(content: row.subjects.to_string(), color: theme.text) }
                    }
                }
            }))
        }
    }
}
