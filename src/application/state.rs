//! Application state for the terminal task list.
//!
//! Wraps the [`TaskListController`] together with the host controls it works
//! with: the text input, keyboard focus and the list selection.

use crate::application::controller::{ClickOutcome, ClickTarget, RowPart, TaskListController};
use crate::application::dialogs::Dialogs;

/// Which control receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The "New task" text input
    Input,
    /// The task list, navigated with the selection
    List,
}

/// Single-line text input.
///
/// The cursor is a character index, so multi-byte text edits cleanly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    cursor: usize,
    focused: bool,
}

impl InputField {
    /// Current raw text, untrimmed.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.char_len();
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use tasklist::application::{App, ControllerOptions, Focus, TaskListController};
/// use tasklist::domain::SystemClock;
/// use tasklist::infrastructure::MemoryStore;
///
/// let controller = TaskListController::initialize(
///     Box::new(MemoryStore::new()),
///     Box::new(SystemClock),
///     ControllerOptions::default(),
/// );
/// let app = App::new(controller);
/// assert_eq!(app.focus, Focus::Input);
/// assert!(app.input.is_focused());
/// ```
pub struct App {
    /// Owner of the task list and the rendered rows
    pub controller: TaskListController,
    /// The "New task" text input
    pub input: InputField,
    /// Control that receives typed keys
    pub focus: Focus,
    /// Selected row while the list has focus (zero-based)
    pub selected: usize,
    /// First row visible in the list viewport
    pub scroll: usize,
    /// Number of rows the list viewport can show
    pub viewport_rows: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Set once the user asked to leave
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: TaskListController) -> Self {
        let mut input = InputField::default();
        input.focus();
        Self {
            controller,
            input,
            focus: Focus::Input,
            selected: 0,
            scroll: 0,
            viewport_rows: 10,
            status_message: None,
            should_quit: false,
        }
    }

    /// Runs the add trigger: the Add button and Enter in the input both land here.
    ///
    /// On success the input is cleared and refocused. On blank input the
    /// controller has already alerted the user and nothing else changes.
    ///
    /// # Arguments
    ///
    /// * `dialogs` - Host dialogs used for the validation notice
    pub fn trigger_add(&mut self, dialogs: &mut dyn Dialogs) {
        match self.controller.add(self.input.value(), dialogs) {
            Ok(_) => {
                self.input.clear();
                self.focus_input();
                self.selected = self.controller.container().len().saturating_sub(1);
                self.ensure_selection_visible();
                self.status_message = Some("Task added".to_string());
            }
            Err(e) => {
                tracing::debug!(error = %e, "add rejected");
            }
        }
    }

    /// Routes a click that landed in the list container.
    ///
    /// # Arguments
    ///
    /// * `target` - Row and row part under the pointer
    /// * `dialogs` - Host dialogs used for the delete confirmation
    pub fn click_list(&mut self, target: ClickTarget, dialogs: &mut dyn Dialogs) -> ClickOutcome {
        if let ClickTarget::Row { index, .. } = target
            && index < self.controller.container().len()
        {
            self.selected = index;
        }

        let outcome = self.controller.handle_click(target, dialogs);
        match outcome {
            ClickOutcome::Toggled(_) => self.status_message = None,
            ClickOutcome::Deleted(_) => {
                self.status_message = Some("Task deleted".to_string());
                self.clamp_selection();
            }
            ClickOutcome::Ignored => {}
        }
        outcome
    }

    /// Acts on the selected row as if `part` of it had been clicked.
    pub fn activate_selected(&mut self, part: RowPart, dialogs: &mut dyn Dialogs) -> ClickOutcome {
        if self.controller.container().is_empty() {
            return ClickOutcome::Ignored;
        }
        let target = ClickTarget::Row {
            index: self.selected,
            part,
        };
        self.click_list(target, dialogs)
    }

    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
        self.input.focus();
    }

    pub fn focus_list(&mut self) {
        self.focus = Focus::List;
        self.input.blur();
        self.clamp_selection();
    }

    pub fn toggle_focus(&mut self) {
        match self.focus {
            Focus::Input => self.focus_list(),
            Focus::List => self.focus_input(),
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.controller.container().len() {
            self.selected += 1;
            self.ensure_selection_visible();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.ensure_selection_visible();
        }
    }

    /// Updates the list viewport height.
    ///
    /// Only clamps `scroll` so the viewport never runs past the last row; the
    /// selection is left alone so wheel scrolling survives the next frame.
    pub fn update_viewport_rows(&mut self, rows: usize) {
        self.viewport_rows = rows.max(1);
        let len = self.controller.container().len();
        self.scroll = self.scroll.min(len.saturating_sub(self.viewport_rows));
    }

    /// Scrolls the list viewport by `delta` rows without moving the selection.
    pub fn scroll_by(&mut self, delta: isize) {
        let len = self.controller.container().len();
        let max = len.saturating_sub(self.viewport_rows);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    /// Keeps the selection inside the rendered rows and scrolls to it.
    pub fn clamp_selection(&mut self) {
        let len = self.controller.container().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.scroll = self.scroll.min(len.saturating_sub(1));
        self.ensure_selection_visible();
    }

    /// Scrolls the list so the selected row is visible.
    pub fn ensure_selection_visible(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + self.viewport_rows {
            self.scroll = self.selected + 1 - self.viewport_rows;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::controller::ControllerOptions;
    use crate::application::dialogs::EMPTY_TASK_ALERT;
    use crate::application::dialogs::testing::ScriptedDialogs;
    use crate::domain::FixedClock;
    use crate::infrastructure::MemoryStore;
    use chrono::{Local, TimeZone};

    fn app() -> App {
        let clock = FixedClock(Local.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).single().unwrap());
        let controller = TaskListController::initialize(
            Box::new(MemoryStore::new()),
            Box::new(clock),
            ControllerOptions::default(),
        );
        App::new(controller)
    }

    fn add(app: &mut App, text: &str) {
        let mut dialogs = ScriptedDialogs::default();
        app.input.set_value(text);
        app.trigger_add(&mut dialogs);
    }

    #[test]
    fn test_app_default() {
        let app = app();
        assert_eq!(app.focus, Focus::Input);
        assert!(app.input.is_focused());
        assert!(app.input.value().is_empty());
        assert_eq!(app.selected, 0);
        assert_eq!(app.scroll, 0);
        assert!(app.status_message.is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_input_editing() {
        let mut input = InputField::default();
        for c in "buy mlk".chars() {
            input.insert_char(c);
        }
        input.move_left();
        input.move_left();
        input.insert_char('i');
        assert_eq!(input.value(), "buy milk");

        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "buy mil");

        input.move_home();
        input.delete();
        assert_eq!(input.value(), "uy mil");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_input_handles_multibyte_text() {
        let mut input = InputField::default();
        input.set_value("写作业");
        assert_eq!(input.cursor(), 3);
        input.move_left();
        input.backspace();
        assert_eq!(input.value(), "写业");
        input.insert_char('好');
        assert_eq!(input.value(), "写好业");
    }

    #[test]
    fn test_trigger_add_clears_and_refocuses_input() {
        let mut app = app();
        app.focus_list();
        add(&mut app, "  buy milk  ");

        assert_eq!(app.controller.tasks().len(), 1);
        assert!(app.input.value().is_empty());
        assert_eq!(app.focus, Focus::Input);
        assert!(app.input.is_focused());
        assert_eq!(app.status_message.as_deref(), Some("Task added"));
    }

    #[test]
    fn test_trigger_add_blank_keeps_input() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::default();
        app.input.set_value("   ");
        app.trigger_add(&mut dialogs);

        assert!(app.controller.tasks().is_empty());
        assert_eq!(app.input.value(), "   ");
        assert_eq!(dialogs.alerts, vec![EMPTY_TASK_ALERT.to_string()]);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_activate_selected_routes_through_click_path() {
        let mut app = app();
        add(&mut app, "A");
        add(&mut app, "B");
        app.focus_list();
        app.select_previous();
        assert_eq!(app.selected, 0);

        let mut dialogs = ScriptedDialogs::accepting();
        let outcome = app.activate_selected(RowPart::Label, &mut dialogs);
        assert!(matches!(outcome, ClickOutcome::Toggled(_)));
        assert!(app.controller.container().row(0).unwrap().completed);

        app.select_next();
        let outcome = app.activate_selected(RowPart::DeleteButton, &mut dialogs);
        assert!(matches!(outcome, ClickOutcome::Deleted(_)));
        assert_eq!(app.selected, 0);
        assert_eq!(app.controller.container().len(), 1);
    }

    #[test]
    fn test_activate_selected_on_empty_list() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::accepting();
        assert_eq!(
            app.activate_selected(RowPart::DeleteButton, &mut dialogs),
            ClickOutcome::Ignored
        );
        assert!(dialogs.prompts.is_empty());
    }

    #[test]
    fn test_selection_scrolls_viewport() {
        let mut app = app();
        for i in 0..6 {
            add(&mut app, &format!("task {i}"));
        }
        app.update_viewport_rows(3);
        assert_eq!(app.selected, 5);
        assert_eq!(app.scroll, 0);

        app.ensure_selection_visible();
        assert_eq!(app.scroll, 3);

        app.selected = 0;
        app.ensure_selection_visible();
        assert_eq!(app.scroll, 0);

        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected, 3);
        assert_eq!(app.scroll, 1);
    }

    #[test]
    fn test_viewport_update_keeps_manual_scroll() {
        let mut app = app();
        app.update_viewport_rows(3);
        for i in 0..6 {
            add(&mut app, &format!("task {i}"));
        }
        assert_eq!(app.scroll, 3);

        app.scroll_by(-2);
        app.update_viewport_rows(3);
        assert_eq!(app.scroll, 1);
        assert_eq!(app.selected, 5);

        app.scroll_by(10);
        assert_eq!(app.scroll, 3);

        app.update_viewport_rows(10);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let mut app = app();
        add(&mut app, "A");
        add(&mut app, "B");
        let mut dialogs = ScriptedDialogs::accepting();
        let target = ClickTarget::Row { index: 1, part: RowPart::DeleteButton };
        app.click_list(target, &mut dialogs);
        assert_eq!(app.selected, 0);
        assert_eq!(app.status_message.as_deref(), Some("Task deleted"));
    }

    #[test]
    fn test_toggle_focus() {
        let mut app = app();
        app.toggle_focus();
        assert_eq!(app.focus, Focus::List);
        assert!(!app.input.is_focused());
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Input);
    }
}
