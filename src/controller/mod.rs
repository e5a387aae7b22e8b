//! # Controller
//!
//! Couples state mutations to persistence and rendering.
//!
//! Every mutating operation runs the same steps in order:
//!
//! 1. validate input and resolve the active list (failures stop here,
//!    nothing is mutated, saved or rendered)
//! 2. mutate [`AppState`]
//! 3. persist through the [`StateStore`]; if the save fails, the state
//!    is put back the way it was before step 2 and nothing is rendered
//! 4. render through the [`View`]
//!
//! List operations live in `lists`, task operations in `tasks`.

mod lists;
mod tasks;

use crate::domain::{AppState, TaskList};
use crate::error::Result;
use crate::storage::{KeyValueStore, StateStore};
use crate::view::{BoardView, View};

pub struct Controller<S, V> {
    state: AppState,
    store: StateStore<S>,
    view: V,
}

impl<S: KeyValueStore, V: View> Controller<S, V> {
    /// Loads state from `store`. Nothing is drawn until the first render.
    pub fn open(store: S, view: V) -> Self {
        let store = StateStore::new(store);
        let state = store.load_state();

        Self { state, store, view }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// The selected list, if the selection names one
    pub fn selected_list(&self) -> Option<&TaskList> {
        self.state.selected_list()
    }

    /// Projects the current state
    pub fn board(&self) -> BoardView {
        BoardView::project(&self.state)
    }

    /// Writes the current state to the store
    pub fn persist(&mut self) -> Result<()> {
        self.store.save_state(&self.state)
    }

    /// Redraws the whole board from the current state
    pub fn render(&mut self) {
        let board = BoardView::project(&self.state);
        self.view.render(&board);
    }

    /// Persists, then redraws. A failed save restores `prev`.
    pub fn save_and_render(&mut self, prev: AppState) -> Result<()> {
        self.persist_or_restore(prev)?;
        self.render();
        Ok(())
    }

    /// Persists the current state, or puts `prev` back if the save fails
    fn persist_or_restore(&mut self, prev: AppState) -> Result<()> {
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "Save failed, discarding change");
            self.state = prev;
            return Err(e);
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{open_empty, open_flaky};
    use super::*;
    use crate::domain::ListId;
    use crate::error::TaskListError;
    use crate::storage::{MemoryStore, LISTS_KEY, SELECTED_LIST_ID_KEY};
    use crate::view::BoardCache;

    #[test]
    fn open_does_not_render() {
        let controller = open_empty();
        assert_eq!(controller.view().renders(), 0);
        assert!(controller.state().lists().is_empty());
    }

    #[test]
    fn open_loads_persisted_state() {
        let mut kv = MemoryStore::new();
        kv.set(LISTS_KEY, r#"[{"id":"1","name":"Work","tasks":[]}]"#).unwrap();
        kv.set(SELECTED_LIST_ID_KEY, "1").unwrap();

        let controller = Controller::open(kv, BoardCache::new());
        assert_eq!(controller.state().lists().len(), 1);
        assert_eq!(controller.selected_list().map(|l| l.name.as_str()), Some("Work"));
        assert!(controller.board().detail.is_some());
    }

    #[test]
    fn open_with_dangling_selection_shows_no_detail() {
        let mut kv = MemoryStore::new();
        kv.set(LISTS_KEY, r#"[{"id":"1","name":"Work","tasks":[]}]"#).unwrap();
        kv.set(SELECTED_LIST_ID_KEY, "null").unwrap();

        let controller = Controller::open(kv, BoardCache::new());
        assert_eq!(controller.state().selected_list_id(), Some(&ListId::from("null")));
        assert!(controller.board().detail.is_none());
    }

    #[test]
    fn save_and_render_persists_then_redraws() {
        let mut controller = open_empty();
        let prev = controller.state().clone();
        controller.save_and_render(prev).unwrap();

        assert_eq!(controller.view().renders(), 1);
        // Empty state is never written
        assert!(controller.store().is_empty());
    }

    #[test]
    fn failed_save_discards_the_change() {
        let mut controller = open_flaky();
        let work = controller.create_list("Work").unwrap();
        controller.select_list(work.id.clone()).unwrap();
        let renders = controller.view().renders();
        let before = controller.state().clone();

        controller.store.store_mut().failing = true;
        let err = controller.create_list("Home").unwrap_err();
        assert!(matches!(err, TaskListError::Storage { .. }));
        assert!(controller.add_task("Email").is_err());
        assert!(controller.delete_list().is_err());

        assert_eq!(controller.state(), &before);
        assert_eq!(controller.view().renders(), renders);

        // The next successful save carries none of the failed changes
        controller.store.store_mut().failing = false;
        controller.add_task("Report").unwrap();
        let stored = Controller::open(controller.store().inner.clone(), BoardCache::new());
        assert_eq!(stored.state().lists().len(), 1);
        let tasks = &stored.selected_list().unwrap().tasks;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Report");
    }

    #[test]
    fn failed_toggle_keeps_flag() {
        let mut controller = open_flaky();
        let work = controller.create_list("Work").unwrap();
        controller.select_list(work.id).unwrap();
        let task = controller.add_task("Email").unwrap();

        controller.store.store_mut().failing = true;
        assert!(controller.toggle_complete(&task.id).is_err());
        assert!(!controller.selected_list().unwrap().tasks[0].complete);
        assert!(controller.clear_completed().is_err());
        assert_eq!(controller.selected_list().unwrap().tasks.len(), 1);
    }

    #[test]
    fn board_matches_cached_view() {
        let mut controller = open_empty();
        controller.create_list("Work").unwrap();
        assert_eq!(&controller.board(), controller.view().board());
    }
}
