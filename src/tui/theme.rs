//! Theme system for TUI colors and styles
//!
//! Colors line up with the CLI table output in `commands/mod.rs`.

use iocraft::prelude::Color;

const GREY: Color = Color::Rgb {
    r: 120,
    g: 120,
    b: 120,
};

#[derive(Debug, Clone)]
pub struct Theme {
    // Table
    pub school: Color,
    pub class: Color,
    pub row_number: Color,
    pub selected_background: Color,

    // Form
    pub label: Color,
    pub enumerated: Color,
    pub empty_value: Color,

    // UI colors
    pub border: Color,
    pub border_focused: Color,
    pub background: Color,
    /// Fill behind an open modal
    pub backdrop: Color,
    pub text: Color,
    pub text_dimmed: Color,
    pub highlight: Color,
    pub loading: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            school: Color::White,
            class: Color::Cyan,
            row_number: GREY,
            selected_background: Color::Blue,

            label: Color::Yellow,
            enumerated: Color::Magenta,
            empty_value: GREY,

            border: GREY,
            border_focused: Color::Blue,
            background: Color::Reset,
            backdrop: Color::Rgb {
                r: 30,
                g: 30,
                b: 30,
            },
            text: Color::White,
            text_dimmed: GREY,
            highlight: Color::Blue,
            loading: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Global theme instance
pub static THEME: std::sync::LazyLock<Theme> = std::sync::LazyLock::new(Theme::default);

pub fn theme() -> &'static Theme {
    &THEME
}
