//! Keyboard shortcuts bar component

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcut {
    /// Key or chord, e.g. "q" or "C-s"
    pub key: String,
    pub action: String,
}

impl Shortcut {
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub shortcuts: Vec<Shortcut>,
}

/// Keyboard shortcuts bar at the bottom of the screen
#[component]
pub fn Footer(props: &FooterProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            min_height: 1,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            flex_shrink: 0.0,
            padding_left: 1,
            padding_right: 1,
            column_gap: 2,
            background_color: theme.border,
        ) {
            #(props.shortcuts.iter().map(|shortcut| {
                element! {
                    View(flex_direction: FlexDirection::Row) {
                        Text(
                            content: format!("[{}]", shortcut.key),
                            color: theme.highlight,
                            weight: Weight::Bold,
                        )
                        Text(
                            content: format!(" {}", shortcut.action),
                            color: theme.text,
                        )
                    }
                }
            }))
        }
    }
}

fn shortcuts(pairs: &[(&str, &str)]) -> Vec<Shortcut> {
    pairs
        .iter()
        .map(|(key, action)| Shortcut::new(*key, *action))
        .collect()
}

/// Shortcuts for the schedule list
pub fn list_shortcuts() -> Vec<Shortcut> {
    shortcuts(&[
        ("j/k", "Row"),
        ("n/p", "Page"),
        ("a", "Add"),
        ("e", "Edit"),
        ("d", "Delete"),
        ("x", "Export PDF"),
        ("r", "Refresh"),
        ("q", "Quit"),
    ])
}

/// Shortcuts for the add and edit forms
pub fn form_shortcuts() -> Vec<Shortcut> {
    shortcuts(&[
        ("Tab", "Next Field"),
        ("S-Tab", "Prev Field"),
        ("←/→", "Choose"),
        ("C-n", "Add Subject"),
        ("C-d", "Remove Subject"),
        ("C-s", "Save"),
        ("Esc", "Cancel"),
    ])
}

/// Shortcuts for the delete confirmation
pub fn confirm_shortcuts() -> Vec<Shortcut> {
    shortcuts(&[("y", "Delete"), ("n/Esc", "Keep")])
}
