//! Persistence of the application state
//!
//! State lives under two fixed keys of a [`KeyValueStore`]:
//!
//! | Key | Value |
//! |-----|-------|
//! | `task.lists` | JSON array of `{id, name, tasks: [{id, name, complete}]}` |
//! | `task.selectedListId` | selected list id as a plain string, or absent |
//!
//! An empty collection is never written: saving it removes both keys.

use super::kv::KeyValueStore;
use crate::domain::{AppState, ListId, TaskList};
use crate::error::Result;

pub const LISTS_KEY: &str = "task.lists";
pub const SELECTED_LIST_ID_KEY: &str = "task.selectedListId";

/// Loads and saves [`AppState`] through a key-value store
pub struct StateStore<S> {
    store: S,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store
    pub fn inner(&self) -> &S {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Reads the lists and selection. Malformed list data loads as empty.
    pub fn load(&self) -> (Vec<TaskList>, Option<ListId>) {
        let lists = match self.store.get(LISTS_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(key = LISTS_KEY, error = %e, "Ignoring malformed stored lists");
                Vec::new()
            }),
            None => Vec::new(),
        };

        let selected = self.store.get(SELECTED_LIST_ID_KEY).map(ListId::from);

        tracing::debug!(lists = lists.len(), selected = ?selected, "Loaded state");
        (lists, selected)
    }

    /// Loads straight into an [`AppState`]
    pub fn load_state(&self) -> AppState {
        let (lists, selected) = self.load();
        AppState::new(lists, selected)
    }

    /// Writes the lists and selection, or clears both keys if there are no lists.
    ///
    /// Both keys go to the store in one batch.
    pub fn save(&mut self, lists: &[TaskList], selected: Option<&ListId>) -> Result<()> {
        if lists.is_empty() {
            tracing::debug!("No lists left, clearing stored state");
            return self
                .store
                .write_batch(&[(LISTS_KEY, None), (SELECTED_LIST_ID_KEY, None)]);
        }

        let raw = serde_json::to_string(lists)?;
        self.store.write_batch(&[
            (LISTS_KEY, Some(raw.as_str())),
            (SELECTED_LIST_ID_KEY, selected.map(ListId::as_str)),
        ])?;

        tracing::debug!(lists = lists.len(), selected = ?selected, "Saved state");
        Ok(())
    }

    /// Saves an [`AppState`]
    pub fn save_state(&mut self, state: &AppState) -> Result<()> {
        self.save(state.lists(), state.selected_list_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, TaskId};
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn sample_lists() -> Vec<TaskList> {
        let mut groceries = TaskList::new(ListId::from("100"), "Groceries");
        groceries.tasks.push(Task::new(TaskId::from("101"), "Milk"));
        let mut eggs = Task::new(TaskId::from("102"), "Eggs");
        eggs.complete = true;
        groceries.tasks.push(eggs);

        vec![groceries, TaskList::new(ListId::from("200"), "Work")]
    }

    #[test]
    fn load_empty_store() {
        let store = StateStore::new(MemoryStore::new());
        let (lists, selected) = store.load();
        assert!(lists.is_empty());
        assert!(selected.is_none());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let mut store = StateStore::new(MemoryStore::new());
        let lists = sample_lists();
        let selected = ListId::from("200");

        store.save(&lists, Some(&selected)).unwrap();
        let (loaded, loaded_selected) = store.load();

        assert_eq!(loaded, lists);
        assert_eq!(loaded_selected, Some(selected));
    }

    #[test]
    fn save_without_selection_removes_key() {
        let mut store = StateStore::new(MemoryStore::new());
        let lists = sample_lists();

        store.save(&lists, Some(&ListId::from("100"))).unwrap();
        store.save(&lists, None).unwrap();

        assert!(store.inner().get(SELECTED_LIST_ID_KEY).is_none());
        assert!(store.load().1.is_none());
    }

    #[test]
    fn saving_empty_lists_clears_both_keys() {
        let mut store = StateStore::new(MemoryStore::new());
        store.save(&sample_lists(), Some(&ListId::from("100"))).unwrap();

        store.save(&[], Some(&ListId::from("100"))).unwrap();

        assert!(store.inner().is_empty());
        let (lists, selected) = store.load();
        assert!(lists.is_empty());
        assert!(selected.is_none());
    }

    #[test]
    fn malformed_lists_load_as_empty() {
        let mut kv = MemoryStore::new();
        kv.set(LISTS_KEY, "{definitely not a list").unwrap();
        kv.set(SELECTED_LIST_ID_KEY, "100").unwrap();

        let store = StateStore::new(kv);
        let (lists, selected) = store.load();
        assert!(lists.is_empty());
        // Selection is returned verbatim
        assert_eq!(selected, Some(ListId::from("100")));
    }

    #[test]
    fn persisted_layout_matches_browser_format() {
        let mut store = StateStore::new(MemoryStore::new());
        store.save(&sample_lists(), Some(&ListId::from("100"))).unwrap();

        let raw = store.inner().get(LISTS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "100");
        assert_eq!(value[0]["name"], "Groceries");
        assert_eq!(value[0]["tasks"][1]["complete"], true);
        assert_eq!(store.inner().get(SELECTED_LIST_ID_KEY).as_deref(), Some("100"));
    }

    #[test]
    fn roundtrip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let lists = sample_lists();

        let mut store = StateStore::new(FileStore::new(&path));
        store.save(&lists, Some(&ListId::from("100"))).unwrap();

        let reopened = StateStore::new(FileStore::new(&path));
        let state = reopened.load_state();
        assert_eq!(state.lists(), lists.as_slice());
        assert_eq!(state.selected_list().map(|l| l.name.as_str()), Some("Groceries"));
    }
}
