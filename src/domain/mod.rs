//! Domain models for task lists
//!
//! Contains the list/task model and the in-memory application state,
//! without any I/O concerns.

mod id;
mod list;
mod state;

pub use id::{ListId, TaskId};
pub use list::{render_task_count, validate_name, Task, TaskList, MAX_NAME_LEN};
pub use state::AppState;
