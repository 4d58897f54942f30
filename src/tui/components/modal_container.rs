//! Bordered modal box with a title bar and an optional footer line

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Clone, Copy, Default)]
pub enum ModalBorderColor {
    #[default]
    Focused,
    Warning,
}

impl ModalBorderColor {
    pub fn to_color(self) -> Color {
        match self {
            Self::Focused => theme().border_focused,
            Self::Warning => Color::Yellow,
        }
    }
}

#[derive(Default, Props)]
pub struct ModalContainerProps<'a> {
    /// Width in columns, default 60
    pub width: Option<u32>,
    /// Height as a percentage of the terminal; sized to content when unset
    pub height_percent: Option<u32>,
    pub border_color: Option<ModalBorderColor>,
    pub title: Option<String>,
    pub footer_text: Option<String>,
    pub children: Vec<AnyElement<'a>>,
}

#[component]
pub fn ModalContainer<'a>(props: &mut ModalContainerProps<'a>) -> impl Into<AnyElement<'a>> {
    let theme = theme();

    let border_color = props.border_color.unwrap_or_default().to_color();
    let width = Size::Length(props.width.unwrap_or(60));
    let height = props
        .height_percent
        .map(|n| Size::Percent(n as f32))
        .unwrap_or(Size::Auto);
    let title = props.title.clone();
    let footer = props.footer_text.clone();

    element! {
        View(
            width: width,
            height: height,
            background_color: theme.background,
            border_style: BorderStyle::Double,
            border_color: border_color,
            padding: 1,
            flex_direction: FlexDirection::Column,
        ) {
            #(title.map(|title| element! {
                View(
                    width: 100pct,
                    padding_bottom: 1,
                    border_edges: Edges::Bottom,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    Text(content: title, color: Color::Cyan, weight: Weight::Bold)
                }
            }))

            View(
                flex_grow: 1.0,
                width: 100pct,
                flex_direction: FlexDirection::Column,
                overflow: Overflow::Hidden,
            ) {
                #(std::mem::take(&mut props.children))
            }

            #(footer.map(|footer| element! {
                View(
                    width: 100pct,
                    padding_top: 1,
                    border_edges: Edges::Top,
                    border_style: BorderStyle::Single,
                    border_color: theme.border,
                ) {
                    Text(content: footer, color: theme.text_dimmed)
                }
            }))
        }
    }
}
