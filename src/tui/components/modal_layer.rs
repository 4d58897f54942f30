//! Full-screen layer that floats one modal above the browser

use iocraft::prelude::*;

use crate::tui::theme::theme;

#[derive(Default, Props)]
pub struct ModalLayerProps<'a> {
    /// Leave the browser visible behind the modal instead of dimming it
    pub clear: bool,
    pub children: Vec<AnyElement<'a>>,
}

fn layer_fill(clear: bool) -> Option<Color> {
    (!clear).then(|| theme().backdrop)
}

#[component]
pub fn ModalLayer<'a>(props: &mut ModalLayerProps<'a>) -> impl Into<AnyElement<'a>> {
    let fill = layer_fill(props.clear);
    let modal = std::mem::take(&mut props.children);

    element! {
        View(
            position: Position::Absolute,
            top: 0,
            left: 0,
            width: 100pct,
            height: 100pct,
            background_color: fill,
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
        ) {
            #(modal)
        }
    }
}
