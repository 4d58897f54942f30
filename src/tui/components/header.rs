//! App header bar component

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct HeaderProps {
    /// Right-hand summary, e.g. "Page 1 of 3 (24 schedules)"
    pub summary: Option<String>,
    /// Show a loading indicator next to the title
    pub loading: bool,
}

#[component]
pub fn Header(props: &HeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
            background_color: theme.highlight,
        ) {
            View(flex_direction: FlexDirection::Row, gap: 1) {
                Text(content: "scheduledesk", color: theme.text, weight: Weight::Bold)
                #(props.loading.then(|| element! {
                    Text(content: "loading…", color: theme.loading)
                }))
            }
            #(props.summary.clone().map(|summary| element! {
                Text(content: summary, color: theme.text)
            }))
        }
    }
}
