//! Tasklist CLI - A local-first task list manager
//!
//! Users create named lists, add short tasks to the selected list, mark
//! tasks complete, clear completed tasks and delete whole lists. State
//! lives in a small key-value store file and the board is redrawn from
//! that state after every change.

pub mod domain;
pub mod error;
pub mod storage;
pub mod view;
pub mod controller;
pub mod cli;

pub use controller::Controller;
pub use domain::{AppState, ListId, Task, TaskId, TaskList};
pub use error::{NameKind, TaskListError};
