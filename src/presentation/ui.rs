use crate::application::{App, Focus, RowView};
use crate::presentation::layout::{DELETE_LABEL, RowGeometry, ScreenLayout, marker};
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let layout = ScreenLayout::new(f.area());

    render_header(f, app, layout.header);
    render_input(f, app, layout.input);
    render_add_button(f, layout.add_button);
    render_list(f, app, &layout);
    render_status_bar(f, app, layout.status);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let tasks = app.controller.tasks();
    let header = Paragraph::new(format!(
        "tasklist | {} tasks, {} done",
        tasks.len(),
        tasks.completed_count()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.input.is_focused() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(app.input.value())
        .block(Block::default().borders(Borders::ALL).title("New task").border_style(border_style));
    f.render_widget(input, area);

    if app.input.is_focused() && area.width > 2 && area.height > 2 {
        let before: String = app.input.value().chars().take(app.input.cursor()).collect();
        let offset = Span::raw(before).width() as u16;
        let x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_add_button(f: &mut Frame, area: Rect) {
    let button = Paragraph::new("Add")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
}

fn render_list(f: &mut Frame, app: &App, layout: &ScreenLayout) {
    let border_style = if matches!(app.focus, Focus::List) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Tasks").border_style(border_style),
        layout.list,
    );

    let container = app.controller.container();
    if container.is_empty() {
        let hint = Paragraph::new("No tasks yet. Type one above and press Enter.")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, layout.list_inner());
        return;
    }

    for (index, view) in container.rows().iter().enumerate().skip(app.scroll) {
        let Some(area) = layout.row_area(index, app.scroll) else {
            break;
        };
        let selected = matches!(app.focus, Focus::List) && index == app.selected;
        render_row(f, view, area, selected);
    }
}

fn render_row(f: &mut Frame, view: &RowView, area: Rect, selected: bool) {
    if selected {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Blue)),
            area,
        );
    }

    let geometry = RowGeometry::new(area.width, view);
    let part = |(start, end): (u16, u16)| {
        Rect::new(area.x + start, area.y, end.saturating_sub(start), 1)
    };

    let label_style = if view.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };
    let label = Line::from(vec![
        Span::raw(marker(view.completed)),
        Span::styled(view.text.as_str(), label_style),
    ]);
    f.render_widget(Paragraph::new(label), part(geometry.label));

    f.render_widget(
        Paragraph::new(view.time.as_str()).style(Style::default().fg(Color::Yellow)),
        part(geometry.time),
    );
    f.render_widget(
        Paragraph::new(DELETE_LABEL).style(Style::default().fg(Color::Red)),
        part(geometry.delete),
    );
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(ref status) = app.status_message {
        status.clone()
    } else {
        match app.focus {
            Focus::Input => {
                "Enter: add | Tab: list | click: toggle | click [Delete]: remove | Ctrl+Q: quit"
                    .to_string()
            }
            Focus::List => {
                "↑↓/jk: select | Space: toggle | d: delete | Tab/Esc: input | Ctrl+Q: quit"
                    .to_string()
            }
        }
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
