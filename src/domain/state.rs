//! In-memory application state
//!
//! [`AppState`] owns the list collection and the selection. Every
//! mutation here is pure: persisting and re-rendering are sequenced by
//! the controller after a mutation succeeds.
//!
//! The selection is a lookup key, not a reference. It may dangle (point
//! at an id that is not in the collection); [`AppState::selected_list`]
//! is the single place that resolves it, and a dangling id resolves to
//! "no selection".

use chrono::{DateTime, Utc};

use super::id::{ListId, TaskId};
use super::list::{validate_name, Task, TaskList};
use crate::error::{NameKind, Result, TaskListError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    lists: Vec<TaskList>,
    selected_list_id: Option<ListId>,
}

impl AppState {
    pub fn new(lists: Vec<TaskList>, selected_list_id: Option<ListId>) -> Self {
        Self {
            lists,
            selected_list_id,
        }
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    /// The raw selection key, which may not match any list
    pub fn selected_list_id(&self) -> Option<&ListId> {
        self.selected_list_id.as_ref()
    }

    /// Resolves the selection to a list, if it names one
    pub fn selected_list(&self) -> Option<&TaskList> {
        let id = self.selected_list_id.as_ref()?;
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Like [`selected_list`](Self::selected_list), but a missing list is an error
    pub fn active_list_mut(&mut self) -> Result<&mut TaskList> {
        let id = self
            .selected_list_id
            .as_ref()
            .ok_or(TaskListError::NoActiveList)?;
        self.lists
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or(TaskListError::NoActiveList)
    }

    pub fn list(&self, id: &ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    /// Validates `name` and appends a new empty list. Selection is unchanged.
    pub fn create_list(&mut self, name: &str, now: DateTime<Utc>) -> Result<&TaskList> {
        validate_name(name, NameKind::List)?;

        let id = ListId::fresh(self.lists.iter().map(|l| &l.id), now);
        self.lists.push(TaskList::new(id, name));
        Ok(&self.lists[self.lists.len() - 1])
    }

    /// Sets the selection without checking that the list exists
    pub fn select_list(&mut self, id: ListId) {
        self.selected_list_id = Some(id);
    }

    /// Removes the selected list (if it exists) and clears the selection
    pub fn delete_list(&mut self) -> Option<TaskList> {
        let selected = self.selected_list_id.take()?;
        let index = self.lists.iter().position(|l| l.id == selected)?;
        Some(self.lists.remove(index))
    }

    /// Validates `name` and appends a new task to the active list
    pub fn add_task(&mut self, name: &str, now: DateTime<Utc>) -> Result<&Task> {
        validate_name(name, NameKind::Task)?;

        let list = self.active_list_mut()?;
        Ok(list.push_task(name, now))
    }

    /// Flips a task's completion flag in the active list, returning the new value
    pub fn toggle_complete(&mut self, task_id: &TaskId) -> Result<bool> {
        let list = self.active_list_mut()?;
        let task = list
            .task_mut(task_id)
            .ok_or_else(|| TaskListError::TaskNotFound(task_id.clone()))?;
        Ok(task.toggle())
    }

    /// Removes completed tasks from the active list, returning how many went
    pub fn clear_completed(&mut self) -> Result<usize> {
        let list = self.active_list_mut()?;
        Ok(list.clear_completed())
    }
}
