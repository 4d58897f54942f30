pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod list_view;
pub mod session;
pub mod store;
pub mod tui;
pub mod types;
pub mod validation;

pub use config::Config;
pub use confirm::ConfirmationGate;
pub use error::{DeskError, ErrorKind, Result};
pub use gateway::{ExportSink, HttpGateway, RecordGateway};
pub use session::{AuthSession, SessionStore};
pub use store::{AppState, Command, OpFamily, OpStatus, Store};
pub use types::{Day, Lectures, ScheduleRecord, Subject, SubjectEntry, TimeSlot};
pub use validation::{Credentials, SignUpForm};
