//! Screen geometry shared by drawing and mouse hit-testing.

use crate::application::{ClickTarget, ListContainer, RowPart, RowView};
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::text::Span;

pub const ADD_BUTTON_WIDTH: u16 = 9;
pub const DELETE_LABEL: &str = "[Delete]";
pub const DONE_MARKER: &str = "[x] ";
pub const OPEN_MARKER: &str = "[ ] ";

/// Control under a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Input,
    AddButton,
    List(ClickTarget),
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub input: Rect,
    pub add_button: Rect,
    pub list: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);
        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(ADD_BUTTON_WIDTH)])
            .split(rows[1]);

        Self {
            header: rows[0],
            input: controls[0],
            add_button: controls[1],
            list: rows[2],
            status: rows[3],
        }
    }

    /// Area inside the list border where rows are drawn.
    pub fn list_inner(&self) -> Rect {
        self.list.inner(Margin::new(1, 1))
    }

    /// How many rows fit in the list viewport.
    pub fn list_capacity(&self) -> usize {
        self.list_inner().height as usize
    }

    /// Screen line of the `index`-th row, if it is scrolled into view.
    pub fn row_area(&self, index: usize, scroll: usize) -> Option<Rect> {
        let inner = self.list_inner();
        let line = index.checked_sub(scroll)?;
        if line >= inner.height as usize {
            return None;
        }
        Some(Rect::new(inner.x, inner.y + line as u16, inner.width, 1))
    }

    /// Resolves a click position to the control beneath it.
    ///
    /// Inside the list, the row is derived from rendered order and `scroll`;
    /// positions below the last row or on the border are outside any row.
    pub fn hit(&self, column: u16, row: u16, container: &ListContainer, scroll: usize) -> Hit {
        if contains(self.add_button, column, row) {
            return Hit::AddButton;
        }
        if contains(self.input, column, row) {
            return Hit::Input;
        }
        if !contains(self.list, column, row) {
            return Hit::Nothing;
        }

        let inner = self.list_inner();
        if !contains(inner, column, row) {
            return Hit::List(ClickTarget::Outside);
        }
        let index = scroll + (row - inner.y) as usize;
        let Some(view) = container.row(index) else {
            return Hit::List(ClickTarget::Outside);
        };
        let geometry = RowGeometry::new(inner.width, view);
        let part = geometry.part_at(column - inner.x);
        Hit::List(ClickTarget::Row { index, part })
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

/// Horizontal extents (start, end) of the parts of one row, relative to the row start.
///
/// The delete affordance is right-aligned, the date sits left of it and the
/// label takes whatever remains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGeometry {
    pub label: (u16, u16),
    pub time: (u16, u16),
    pub delete: (u16, u16),
}

impl RowGeometry {
    pub fn new(width: u16, view: &RowView) -> Self {
        let delete_width = Span::raw(DELETE_LABEL).width() as u16;
        let delete_start = width.saturating_sub(delete_width);

        let time_width = Span::raw(view.time.as_str()).width() as u16;
        let time_end = delete_start.saturating_sub(1);
        let time_start = time_end.saturating_sub(time_width);

        let label_room = time_start.saturating_sub(1);
        let label_width = Span::raw(marker(view.completed)).width() as u16
            + Span::raw(view.text.as_str()).width() as u16;

        Self {
            label: (0, label_width.min(label_room)),
            time: (time_start, time_end),
            delete: (delete_start, width),
        }
    }

    pub fn part_at(&self, offset: u16) -> RowPart {
        let within = |(start, end): (u16, u16)| offset >= start && offset < end;
        if within(self.delete) {
            RowPart::DeleteButton
        } else if within(self.time) {
            RowPart::Time
        } else if within(self.label) {
            RowPart::Label
        } else {
            RowPart::Blank
        }
    }
}

pub fn marker(completed: bool) -> &'static str {
    if completed { DONE_MARKER } else { OPEN_MARKER }
}
