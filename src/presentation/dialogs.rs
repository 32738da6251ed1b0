use crate::application::Dialogs;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io;

/// Blocking source of terminal events.
pub trait EventSource {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads from the real terminal.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

enum Modal {
    Alert,
    Confirm,
}

/// Modal dialogs drawn over the last completed frame.
///
/// Each call redraws the backdrop with a centred box and blocks until the
/// user answers.
pub struct TerminalDialogs<'a, B: Backend, E: EventSource> {
    terminal: &'a mut Terminal<B>,
    events: &'a mut E,
    backdrop: Buffer,
}

impl<'a, B: Backend, E: EventSource> TerminalDialogs<'a, B, E> {
    pub fn new(terminal: &'a mut Terminal<B>, events: &'a mut E, backdrop: Buffer) -> Self {
        Self {
            terminal,
            events,
            backdrop,
        }
    }

    fn run(&mut self, modal: Modal, message: &str) -> io::Result<bool> {
        loop {
            self.draw(&modal, message)?;
            match self.events.next_event()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match modal {
                    Modal::Alert => return Ok(true),
                    Modal::Confirm => match key.code {
                        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                        _ => {}
                    },
                },
                Event::Mouse(mouse)
                    if matches!(modal, Modal::Alert)
                        && mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
                {
                    return Ok(true);
                }
                _ => {}
            }
        }
    }

    fn draw(&mut self, modal: &Modal, message: &str) -> io::Result<()> {
        let backdrop = &self.backdrop;
        self.terminal.draw(|f| {
            let area = f.area();
            let buffer = f.buffer_mut();
            if buffer.area == backdrop.area {
                buffer.clone_from(backdrop);
            }

            let (title, hint, color) = match modal {
                Modal::Alert => ("Notice", "Press any key", Color::Yellow),
                Modal::Confirm => ("Confirm", "y: yes | n/Esc: no", Color::Red),
            };
            let popup = centered(area, 44, 5);
            f.render_widget(Clear, popup);
            let body = Paragraph::new(vec![
                Line::from(message),
                Line::from(""),
                Line::from(hint).style(Style::default().fg(Color::DarkGray)),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(color)),
            );
            f.render_widget(body, popup);
        })?;
        Ok(())
    }
}

impl<B: Backend, E: EventSource> Dialogs for TerminalDialogs<'_, B, E> {
    fn alert(&mut self, message: &str) {
        if let Err(e) = self.run(Modal::Alert, message) {
            tracing::warn!(error = %e, "alert dialog failed");
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        match self.run(Modal::Confirm, prompt) {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "confirm dialog failed, treating as declined");
                false
            }
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
