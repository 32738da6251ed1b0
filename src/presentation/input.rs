use crate::application::{App, Dialogs, Focus, RowPart};
use crate::presentation::layout::{Hit, ScreenLayout};
use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

pub struct InputHandler;

impl InputHandler {
    /// Dispatches one terminal event.
    ///
    /// `area` is the full screen the last frame was drawn into; mouse
    /// positions are resolved against the same layout.
    pub fn handle_event(app: &mut App, event: Event, area: Rect, dialogs: &mut dyn Dialogs) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Self::handle_key_event(app, key.code, key.modifiers, dialogs);
            }
            Event::Mouse(mouse) => Self::handle_mouse_event(app, mouse, area, dialogs),
            Event::Resize(width, height) => {
                let layout = ScreenLayout::new(Rect::new(0, 0, width, height));
                app.update_viewport_rows(layout.list_capacity());
            }
            _ => {}
        }
    }

    pub fn handle_key_event(
        app: &mut App,
        key: KeyCode,
        modifiers: KeyModifiers,
        dialogs: &mut dyn Dialogs,
    ) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if matches!(key, KeyCode::Char('c') | KeyCode::Char('q')) {
                app.quit();
            }
            return;
        }

        match key {
            KeyCode::Tab | KeyCode::BackTab => {
                app.status_message = None;
                app.toggle_focus();
                return;
            }
            _ => {}
        }

        match app.focus {
            Focus::Input => Self::handle_input_focus(app, key, dialogs),
            Focus::List => Self::handle_list_focus(app, key, dialogs),
        }
    }

    fn handle_input_focus(app: &mut App, key: KeyCode, dialogs: &mut dyn Dialogs) {
        match key {
            // Same path as clicking the Add button.
            KeyCode::Enter => app.trigger_add(dialogs),
            KeyCode::Backspace => app.input.backspace(),
            KeyCode::Delete => app.input.delete(),
            KeyCode::Left => app.input.move_left(),
            KeyCode::Right => app.input.move_right(),
            KeyCode::Home => app.input.move_home(),
            KeyCode::End => app.input.move_end(),
            KeyCode::Down => app.focus_list(),
            KeyCode::Char(c) => {
                app.status_message = None;
                app.input.insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_list_focus(app: &mut App, key: KeyCode, dialogs: &mut dyn Dialogs) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => {
                app.selected = 0;
                app.ensure_selection_visible();
            }
            KeyCode::End => {
                app.selected = app.controller.container().len().saturating_sub(1);
                app.ensure_selection_visible();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                app.activate_selected(RowPart::Label, dialogs);
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                app.activate_selected(RowPart::DeleteButton, dialogs);
            }
            KeyCode::Esc => app.focus_input(),
            _ => {}
        }
    }

    fn handle_mouse_event(app: &mut App, mouse: MouseEvent, area: Rect, dialogs: &mut dyn Dialogs) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let layout = ScreenLayout::new(area);
                let hit =
                    layout.hit(mouse.column, mouse.row, app.controller.container(), app.scroll);
                match hit {
                    Hit::AddButton => app.trigger_add(dialogs),
                    Hit::Input => app.focus_input(),
                    Hit::List(target) => {
                        app.click_list(target, dialogs);
                    }
                    Hit::Nothing => {}
                }
            }
            MouseEventKind::ScrollDown => app.scroll_by(1),
            MouseEventKind::ScrollUp => app.scroll_by(-1),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dialogs::testing::ScriptedDialogs;
    use crate::application::{ControllerOptions, EMPTY_TASK_ALERT, TaskListController};
    use crate::domain::FixedClock;
    use crate::infrastructure::MemoryStore;
    use chrono::{Local, TimeZone};
    use crossterm::event::KeyEvent;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 50,
        height: 20,
    };

    fn app() -> App {
        let clock = FixedClock(Local.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).single().unwrap());
        let controller = TaskListController::initialize(
            Box::new(MemoryStore::new()),
            Box::new(clock),
            ControllerOptions::default(),
        );
        App::new(controller)
    }

    fn type_text(app: &mut App, text: &str, dialogs: &mut ScriptedDialogs) {
        for c in text.chars() {
            press(app, KeyCode::Char(c), dialogs);
        }
    }

    fn press(app: &mut App, code: KeyCode, dialogs: &mut ScriptedDialogs) {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        InputHandler::handle_event(app, event, SCREEN, dialogs);
    }

    fn mouse(
        app: &mut App,
        kind: MouseEventKind,
        at: (u16, u16),
        area: Rect,
        dialogs: &mut ScriptedDialogs,
    ) {
        let event = Event::Mouse(MouseEvent {
            kind,
            column: at.0,
            row: at.1,
            modifiers: KeyModifiers::NONE,
        });
        InputHandler::handle_event(app, event, area, dialogs);
    }

    fn click(app: &mut App, column: u16, row: u16, dialogs: &mut ScriptedDialogs) {
        let left = MouseEventKind::Down(MouseButton::Left);
        mouse(app, left, (column, row), SCREEN, dialogs);
    }

    fn labels(app: &App) -> Vec<(String, bool)> {
        app.controller
            .container()
            .rows()
            .iter()
            .map(|r| (r.text.clone(), r.completed))
            .collect()
    }

    #[test]
    fn test_enter_adds_typed_task() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::default();
        type_text(&mut app, "buy milk", &mut dialogs);
        press(&mut app, KeyCode::Enter, &mut dialogs);

        assert_eq!(labels(&app), vec![("buy milk".to_string(), false)]);
        assert!(app.input.value().is_empty());
    }

    #[test]
    fn test_add_button_click_matches_enter() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::default();
        type_text(&mut app, "via click", &mut dialogs);
        click(&mut app, 45, 2, &mut dialogs);

        assert_eq!(labels(&app), vec![("via click".to_string(), false)]);
        assert!(app.input.is_focused());
    }

    #[test]
    fn test_blank_add_shows_alert() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::default();
        type_text(&mut app, "   ", &mut dialogs);
        press(&mut app, KeyCode::Enter, &mut dialogs);
        click(&mut app, 45, 2, &mut dialogs);

        assert!(app.controller.tasks().is_empty());
        assert_eq!(dialogs.alerts, vec![EMPTY_TASK_ALERT.to_string(); 2]);
    }

    #[test]
    fn test_typed_letters_do_not_trigger_list_keys() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::accepting();
        type_text(&mut app, "A", &mut dialogs);
        press(&mut app, KeyCode::Enter, &mut dialogs);
        type_text(&mut app, "d j", &mut dialogs);

        assert_eq!(app.input.value(), "d j");
        assert_eq!(app.controller.tasks().len(), 1);
        assert!(dialogs.prompts.is_empty());
    }

    #[test]
    fn test_mouse_delegation_end_to_end() {
        // Rows start at y=5; label from x=1, [Delete] at x=41..49.
        let mut app = app();
        let mut dialogs = ScriptedDialogs::accepting();
        for text in ["A", "B"] {
            type_text(&mut app, text, &mut dialogs);
            press(&mut app, KeyCode::Enter, &mut dialogs);
        }

        click(&mut app, 2, 5, &mut dialogs);
        click(&mut app, 44, 6, &mut dialogs);

        assert_eq!(labels(&app), vec![("A".to_string(), true)]);
        assert_eq!(dialogs.prompts.len(), 1);
    }

    #[test]
    fn test_clicks_outside_rows_are_ignored() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::accepting();
        type_text(&mut app, "A", &mut dialogs);
        press(&mut app, KeyCode::Enter, &mut dialogs);

        click(&mut app, 20, 5, &mut dialogs); // blank part of the row
        click(&mut app, 35, 5, &mut dialogs); // date
        click(&mut app, 2, 6, &mut dialogs); // below the last row
        click(&mut app, 0, 5, &mut dialogs); // border
        click(&mut app, 10, 0, &mut dialogs); // header

        assert_eq!(labels(&app), vec![("A".to_string(), false)]);
        assert!(dialogs.prompts.is_empty());
    }

    #[test]
    fn test_wheel_scroll_reaches_top_rows() {
        // 50x10 screen: three visible rows starting at y=5.
        let area = Rect::new(0, 0, 50, 10);
        let mut app = app();
        let mut dialogs = ScriptedDialogs::default();
        app.update_viewport_rows(ScreenLayout::new(area).list_capacity());
        for text in ["A", "B", "C", "D", "E", "F"] {
            type_text(&mut app, text, &mut dialogs);
            press(&mut app, KeyCode::Enter, &mut dialogs);
        }
        assert_eq!(app.scroll, 3);

        for _ in 0..3 {
            mouse(&mut app, MouseEventKind::ScrollUp, (10, 6), area, &mut dialogs);
            app.update_viewport_rows(ScreenLayout::new(area).list_capacity());
        }
        assert_eq!(app.scroll, 0);

        let left = MouseEventKind::Down(MouseButton::Left);
        mouse(&mut app, left, (2, 5), area, &mut dialogs);
        assert_eq!(labels(&app)[0], ("A".to_string(), true));

        mouse(&mut app, MouseEventKind::ScrollDown, (10, 6), area, &mut dialogs);
        app.update_viewport_rows(ScreenLayout::new(area).list_capacity());
        assert_eq!(app.scroll, 1);
    }

    #[test]
    fn test_list_keyboard_navigation() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::answering(&[false, true]);
        for text in ["A", "B", "C"] {
            type_text(&mut app, text, &mut dialogs);
            press(&mut app, KeyCode::Enter, &mut dialogs);
        }

        press(&mut app, KeyCode::Tab, &mut dialogs);
        assert_eq!(app.focus, Focus::List);
        press(&mut app, KeyCode::Home, &mut dialogs);
        press(&mut app, KeyCode::Char(' '), &mut dialogs);
        press(&mut app, KeyCode::Char('j'), &mut dialogs);
        press(&mut app, KeyCode::Char('d'), &mut dialogs);
        press(&mut app, KeyCode::Char('d'), &mut dialogs);

        assert_eq!(
            labels(&app),
            vec![("A".to_string(), true), ("C".to_string(), false)]
        );

        press(&mut app, KeyCode::Esc, &mut dialogs);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::default();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        InputHandler::handle_event(&mut app, event, SCREEN, &mut dialogs);
        assert!(app.should_quit);
        assert!(app.input.value().is_empty());
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut app = app();
        let mut dialogs = ScriptedDialogs::default();
        InputHandler::handle_event(&mut app, Event::Resize(80, 12), SCREEN, &mut dialogs);
        assert_eq!(app.viewport_rows, 5);
    }
}
