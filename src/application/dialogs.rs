//! Blocking user prompts, injected into the operations that need them.

pub const EMPTY_TASK_ALERT: &str = "Cannot add an empty task";
pub const DELETE_PROMPT: &str = "Delete this task?";

/// Host-supplied modal dialogs.
///
/// Both calls block until the user answers. Implementations decide how the
/// prompt is shown; the task list only sees the outcome.
pub trait Dialogs {
    /// Shows a notice the user must dismiss.
    fn alert(&mut self, message: &str);

    /// Asks a yes/no question. `true` means the user agreed.
    fn confirm(&mut self, prompt: &str) -> bool;
}
