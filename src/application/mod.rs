//! Application layer managing state and user workflows.
//!
//! Coordinates the task list with the host controls: the text input, the
//! add trigger, the list container and modal dialogs.

pub mod controller;
pub mod dialogs;
pub mod state;

pub use controller::*;
pub use dialogs::*;
pub use state::*;
