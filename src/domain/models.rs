use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a task, unique within its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single entry of the task list.
///
/// Field names on the wire match the browser snapshot format, so `is_done`
/// is stored as `isDone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub time: String,
    #[serde(rename = "isDone")]
    pub is_done: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            time: time.into(),
            is_done: false,
        }
    }
}

/// Ordered sequence of tasks. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// First task with the given id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// Flips `is_done` on the first task with `id`.
    ///
    /// Returns the new state, or `None` when no task matches.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.is_done = !task.is_done;
        Some(task.is_done)
    }

    /// Removes every task carrying `id` and returns how many were dropped.
    pub fn remove_all(&mut self, id: TaskId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        before - self.tasks.len()
    }

    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|task| task.id).max()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.is_done).count()
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
