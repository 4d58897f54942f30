//! Full-screen schedule browser
//!
//! - `model` - pure state, reducer and key bindings
//! - `view` - iocraft component wiring the model to the store

pub mod components;
pub mod model;
pub mod theme;
pub mod view;

pub use model::{BrowserAction, BrowserState, Modal};
pub use theme::Theme;
pub use view::{ScheduleBrowser, ScheduleBrowserProps};
