//! List operations: create, select, delete

use chrono::{DateTime, Utc};

use super::Controller;
use crate::domain::{ListId, TaskList};
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::view::View;

impl<S: KeyValueStore, V: View> Controller<S, V> {
    /// Creates a list named `name`. The new list is not selected.
    pub fn create_list(&mut self, name: &str) -> Result<TaskList> {
        self.create_list_at(name, Utc::now())
    }

    /// [`create_list`](Self::create_list) with an explicit creation time
    pub fn create_list_at(&mut self, name: &str, now: DateTime<Utc>) -> Result<TaskList> {
        let prev = self.state.clone();
        let list = self.state.create_list(name, now)?.clone();
        tracing::debug!(id = %list.id, name = %list.name, "Created list");

        self.save_and_render(prev)?;
        Ok(list)
    }

    /// Selects `id`, whether or not a list with that id exists
    pub fn select_list(&mut self, id: ListId) -> Result<()> {
        tracing::debug!(id = %id, "Selecting list");
        let prev = self.state.clone();
        self.state.select_list(id);

        self.save_and_render(prev)
    }

    /// Deletes the selected list and clears the selection
    pub fn delete_list(&mut self) -> Result<Option<TaskList>> {
        let prev = self.state.clone();
        let removed = self.state.delete_list();
        match &removed {
            Some(list) => tracing::debug!(id = %list.id, "Deleted list"),
            None => tracing::debug!("No selected list to delete"),
        }

        self.save_and_render(prev)?;
        Ok(removed)
    }
}
