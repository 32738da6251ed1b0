use crate::domain::{TaskId, TaskList};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write;

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// Hands out time-derived task ids that never repeat.
///
/// Each id is the current Unix time in milliseconds, bumped past the last
/// issued id when the clock has not moved (or moved backwards).
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator that continues after the largest id already in `list`.
    pub fn seeded_from(list: &TaskList) -> Self {
        Self {
            last: list.max_id().map(|id| id.0),
        }
    }

    pub fn next_id(&mut self, now: DateTime<Local>) -> TaskId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(id);
        TaskId(id)
    }
}

/// Formats creation dates with a strftime pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    pattern: String,
}

/// Default date shape, `10/15/2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

impl Default for DateFormatter {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl DateFormatter {
    /// Returns `None` when the pattern contains an unknown specifier.
    pub fn new(pattern: &str) -> Option<Self> {
        if Self::is_valid_pattern(pattern) {
            Some(Self {
                pattern: pattern.to_string(),
            })
        } else {
            None
        }
    }

    pub fn is_valid_pattern(pattern: &str) -> bool {
        !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
    }

    pub fn format(&self, at: DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", at.format(&self.pattern)).is_err() {
            out.clear();
            let _ = write!(out, "{}", at.format(DEFAULT_DATE_FORMAT));
        }
        out
    }
}
