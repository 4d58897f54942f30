//! Application state store.
//!
//! State changes only through typed [`Action`]s applied by the pure
//! [`reduce`] function. Views and controllers never touch the state; they
//! hand [`Command`]s to [`Store::dispatch`], which performs the gateway call
//! and applies the resulting actions.

mod action;
mod dispatcher;
mod reducer;
mod state;

pub use action::{Action, Command};
pub use dispatcher::Store;
pub use reducer::reduce;
pub use state::{AppState, OpFamily, OpStatus, StatusBoard};
