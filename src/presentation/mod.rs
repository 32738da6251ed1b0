//! Presentation layer handling the terminal UI and user input.
//!
//! Draws the task list with ratatui, routes keyboard and mouse events, and
//! supplies the modal dialogs the application layer asks for.

pub mod dialogs;
pub mod input;
pub mod layout;
pub mod ui;

pub use dialogs::*;
pub use input::*;
pub use layout::*;
pub use ui::*;
