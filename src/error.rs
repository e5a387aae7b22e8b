//! Error types shared by the domain, storage and controller layers

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::TaskId;

/// What kind of thing a name was entered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    List,
    Task,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::List => write!(f, "list"),
            NameKind::Task => write!(f, "task"),
        }
    }
}

#[derive(Debug, Error)]
pub enum TaskListError {
    #[error("Please enter the name of a new {0}")]
    EmptyName(NameKind),

    #[error("The {kind} name should be at most {max} characters")]
    NameTooLong { kind: NameKind, max: usize },

    #[error("No active list. Select a list first.")]
    NoActiveList,

    #[error("Task not found in the selected list: {0}")]
    TaskNotFound(TaskId),

    #[error("Failed to write store at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize lists: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TaskListError {
    /// Returns true for rejections the user can fix by changing input
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TaskListError::EmptyName(_)
                | TaskListError::NameTooLong { .. }
                | TaskListError::NoActiveList
                | TaskListError::TaskNotFound(_)
        )
    }
}

pub type Result<T, E = TaskListError> = std::result::Result<T, E>;
