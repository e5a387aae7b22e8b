//! Task list domain model
//!
//! A list is a named, ordered container of tasks. A task's only mutable
//! field after creation is its completion flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ListId, TaskId};
use crate::error::{NameKind, Result, TaskListError};

/// Maximum length of a list or task name, in characters
pub const MAX_NAME_LEN: usize = 14;

/// Checks that a name is non-empty and at most [`MAX_NAME_LEN`] characters
pub fn validate_name(name: &str, kind: NameKind) -> Result<()> {
    if name.is_empty() {
        return Err(TaskListError::EmptyName(kind));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(TaskListError::NameTooLong {
            kind,
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// A single unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub complete: bool,
}

impl Task {
    /// Creates an incomplete task
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            complete: false,
        }
    }

    /// Flips the completion flag and returns the new value
    pub fn toggle(&mut self) -> bool {
        self.complete = !self.complete;
        self.complete
    }
}

/// A named list of tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TaskList {
    /// Creates an empty list
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Appends a new task with a fresh ID unique within this list
    pub fn push_task(&mut self, name: impl Into<String>, now: DateTime<Utc>) -> &Task {
        let id = TaskId::fresh(self.tasks.iter().map(|t| &t.id), now);
        self.tasks.push(Task::new(id, name));
        // Just pushed, so the sequence is non-empty
        &self.tasks[self.tasks.len() - 1]
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    /// Number of tasks not yet complete
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|t| !t.complete).count()
    }

    /// Drops completed tasks, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.complete);
        before - self.tasks.len()
    }
}

/// Remaining-count label for a list
pub fn render_task_count(list: &TaskList) -> String {
    match list.remaining() {
        0 => "No ongoing tasks!".to_string(),
        1 => "1 task remaining".to_string(),
        n => format!("{} tasks remaining", n),
    }
}
