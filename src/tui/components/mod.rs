//! Reusable pieces of the schedule browser

pub mod footer;
pub mod header;
pub mod modal_container;
pub mod modal_layer;
pub mod schedule_form;
pub mod schedule_table;
pub mod toast;

pub use footer::{Footer, FooterProps, Shortcut};
pub use header::{Header, HeaderProps};
pub use modal_container::{ModalBorderColor, ModalContainer, ModalContainerProps};
pub use modal_layer::{ModalLayer, ModalLayerProps};
pub use schedule_form::{ScheduleForm, ScheduleFormProps};
pub use schedule_table::{ScheduleTable, ScheduleTableProps};
pub use toast::{Toast, ToastLevel, render_toast};
