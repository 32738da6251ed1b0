//! The task list controller.
//!
//! Owns the one mutable task list. Every mutation ends in [`TaskListController::render`]
//! which writes the snapshot and rebuilds the list container from scratch.

use crate::application::dialogs::{DELETE_PROMPT, Dialogs, EMPTY_TASK_ALERT};
use crate::domain::{Clock, DateFormatter, IdGenerator, Task, TaskId, TaskList, ValidationError};
use crate::infrastructure::{SnapshotRepository, SnapshotStore};

/// One rendered row of the list container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Task the row stands for, used only for routing clicks.
    pub id: TaskId,
    pub text: String,
    pub time: String,
    pub completed: bool,
}

/// Rows currently shown, in task list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListContainer {
    rows: Vec<RowView>,
}

impl ListContainer {
    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&RowView> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn rebuild<'a>(&mut self, tasks: impl IntoIterator<Item = &'a Task>) {
        self.rows.clear();
        self.rows.extend(tasks.into_iter().map(|task| RowView {
            id: task.id,
            text: task.text.clone(),
            time: task.time.clone(),
            completed: task.is_done,
        }));
    }
}

/// Part of a row that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPart {
    /// The task text, including its completion marker
    Label,
    /// The creation date
    Time,
    /// The delete affordance
    DeleteButton,
    /// Anywhere else inside the row
    Blank,
}

/// Where a click inside the list container landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Not inside any row
    Outside,
    /// Inside the row at `index` in rendered order
    Row { index: usize, part: RowPart },
}

/// What a routed click ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Toggled(TaskId),
    Deleted(TaskId),
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub storage_key: String,
    pub dates: DateFormatter,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            storage_key: crate::infrastructure::DEFAULT_STORAGE_KEY.to_string(),
            dates: DateFormatter::default(),
        }
    }
}

pub struct TaskListController {
    tasks: TaskList,
    store: Box<dyn SnapshotStore>,
    storage_key: String,
    ids: IdGenerator,
    clock: Box<dyn Clock>,
    dates: DateFormatter,
    container: ListContainer,
}

impl TaskListController {
    /// Loads the stored snapshot (or starts empty) and renders it.
    ///
    /// Missing or undecodable snapshots are not reported; the list simply
    /// starts empty.
    pub fn initialize(
        store: Box<dyn SnapshotStore>,
        clock: Box<dyn Clock>,
        options: ControllerOptions,
    ) -> Self {
        let tasks = SnapshotRepository::load_or_empty(store.as_ref(), &options.storage_key);
        let mut controller = Self {
            ids: IdGenerator::seeded_from(&tasks),
            tasks,
            store,
            storage_key: options.storage_key,
            clock,
            dates: options.dates,
            container: ListContainer::default(),
        };
        tracing::info!(
            key = %controller.storage_key,
            tasks = controller.tasks.len(),
            "task list initialized"
        );
        controller.render();
        controller
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn container(&self) -> &ListContainer {
        &self.container
    }

    /// Appends a new task built from `raw_text`.
    ///
    /// The text is trimmed first. Blank input raises an alert through
    /// `dialogs` and leaves the list untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyText`] for blank input.
    pub fn add(
        &mut self,
        raw_text: &str,
        dialogs: &mut dyn Dialogs,
    ) -> Result<TaskId, ValidationError> {
        let text = raw_text.trim();
        if text.is_empty() {
            dialogs.alert(EMPTY_TASK_ALERT);
            return Err(ValidationError::EmptyText);
        }

        let now = self.clock.now();
        let id = self.ids.next_id(now);
        self.tasks.push(Task::new(id, text, self.dates.format(now)));
        tracing::debug!(%id, "task added");
        self.render();
        Ok(id)
    }

    /// Flips completion of the task `id`. Unknown ids are ignored.
    pub fn toggle_complete(&mut self, id: TaskId) -> bool {
        match self.tasks.toggle(id) {
            Some(done) => {
                tracing::debug!(%id, done, "task toggled");
                self.render();
                true
            }
            None => false,
        }
    }

    /// Removes the task `id` once the user confirms.
    ///
    /// Unknown ids return `false` without prompting.
    pub fn delete(&mut self, id: TaskId, dialogs: &mut dyn Dialogs) -> bool {
        if !self.tasks.contains(id) {
            return false;
        }
        if !dialogs.confirm(DELETE_PROMPT) {
            return false;
        }
        let removed = self.tasks.remove_all(id);
        tracing::debug!(%id, removed, "task deleted");
        self.render();
        true
    }

    /// Routes a click inside the list container.
    ///
    /// The row is resolved from the rendered order; its task id then goes to
    /// `delete` for the delete affordance or `toggle_complete` for the label.
    pub fn handle_click(&mut self, target: ClickTarget, dialogs: &mut dyn Dialogs) -> ClickOutcome {
        let ClickTarget::Row { index, part } = target else {
            return ClickOutcome::Ignored;
        };
        let Some(id) = self.container.row(index).map(|row| row.id) else {
            return ClickOutcome::Ignored;
        };

        match part {
            RowPart::DeleteButton => {
                if self.delete(id, dialogs) {
                    ClickOutcome::Deleted(id)
                } else {
                    ClickOutcome::Ignored
                }
            }
            RowPart::Label => {
                if self.toggle_complete(id) {
                    ClickOutcome::Toggled(id)
                } else {
                    ClickOutcome::Ignored
                }
            }
            RowPart::Time | RowPart::Blank => ClickOutcome::Ignored,
        }
    }

    /// Persists the whole list, then redraws the container.
    fn render(&mut self) {
        let saved = SnapshotRepository::save(self.store.as_mut(), &self.storage_key, &self.tasks);
        if let Err(e) = saved {
            tracing::warn!(key = %self.storage_key, error = %e, "failed to persist task list");
        }
        self.container.rebuild(&self.tasks);
    }
}
