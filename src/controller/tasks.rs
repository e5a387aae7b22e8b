//! Task operations on the selected list: add, toggle, clear completed
//!
//! All of these require an active list and fail with
//! [`TaskListError::NoActiveList`](crate::error::TaskListError::NoActiveList)
//! otherwise.

use chrono::{DateTime, Utc};

use super::Controller;
use crate::domain::{Task, TaskId};
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::view::View;

impl<S: KeyValueStore, V: View> Controller<S, V> {
    /// Appends a task named `name` to the selected list
    pub fn add_task(&mut self, name: &str) -> Result<Task> {
        self.add_task_at(name, Utc::now())
    }

    /// [`add_task`](Self::add_task) with an explicit creation time
    pub fn add_task_at(&mut self, name: &str, now: DateTime<Utc>) -> Result<Task> {
        let prev = self.state.clone();
        let task = self.state.add_task(name, now)?.clone();
        tracing::debug!(id = %task.id, name = %task.name, "Added task");

        self.save_and_render(prev)?;
        Ok(task)
    }

    /// Flips a task's completion flag and returns the new value.
    ///
    /// Only the remaining-count indicator is refreshed, not the whole board.
    pub fn toggle_complete(&mut self, task_id: &TaskId) -> Result<bool> {
        let prev = self.state.clone();
        let complete = self.state.toggle_complete(task_id)?;
        tracing::debug!(id = %task_id, complete, "Toggled task");

        self.persist_or_restore(prev)?;
        if let Some(list) = self.state.selected_list() {
            self.view.render_task_count(list);
        }
        Ok(complete)
    }

    /// Removes completed tasks from the selected list, returning how many went
    pub fn clear_completed(&mut self) -> Result<usize> {
        let prev = self.state.clone();
        let removed = self.state.clear_completed()?;
        tracing::debug!(removed, "Cleared completed tasks");

        self.save_and_render(prev)?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{open_empty, TestController};
    use crate::domain::TaskId;
    use crate::error::TaskListError;
    use crate::storage::{KeyValueStore, LISTS_KEY};

    fn with_selected(name: &str) -> TestController {
        let mut controller = open_empty();
        let list = controller.create_list(name).unwrap();
        controller.select_list(list.id).unwrap();
        controller
    }

    #[test]
    fn add_task_appends_incomplete_task() {
        let mut controller = with_selected("Groceries");
        let renders = controller.view().renders();

        let task = controller.add_task("Milk").unwrap();

        assert!(!task.complete);
        let list = controller.selected_list().unwrap();
        assert_eq!(list.tasks, vec![task]);
        assert_eq!(controller.view().renders(), renders + 1);
        assert!(controller.store().get(LISTS_KEY).unwrap().contains("Milk"));
    }

    #[test]
    fn add_task_without_selection_fails() {
        let mut controller = open_empty();
        controller.create_list("Work").unwrap();
        let before = controller.state().clone();

        let err = controller.add_task("Email").unwrap_err();
        assert!(matches!(err, TaskListError::NoActiveList));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn add_task_rejects_bad_names() {
        let mut controller = with_selected("Work");

        assert!(matches!(
            controller.add_task("").unwrap_err(),
            TaskListError::EmptyName(_)
        ));
        assert!(matches!(
            controller.add_task("fifteen chars!!").unwrap_err(),
            TaskListError::NameTooLong { .. }
        ));
        assert!(controller.selected_list().unwrap().tasks.is_empty());
    }

    #[test]
    fn toggle_refreshes_count_without_full_render() {
        let mut controller = with_selected("Work");
        let task = controller.add_task("Email").unwrap();
        let renders = controller.view().renders();

        assert!(controller.toggle_complete(&task.id).unwrap());

        assert_eq!(controller.view().renders(), renders);
        let detail = controller.view().board().detail.as_ref().unwrap();
        assert_eq!(detail.remaining, "No ongoing tasks!");
        assert!(controller.store().get(LISTS_KEY).unwrap().contains("\"complete\":true"));
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut controller = with_selected("Work");
        let task = controller.add_task("Email").unwrap();

        controller.toggle_complete(&task.id).unwrap();
        assert!(!controller.toggle_complete(&task.id).unwrap());
        assert!(!controller.selected_list().unwrap().tasks[0].complete);
    }

    #[test]
    fn toggle_unknown_task_fails() {
        let mut controller = with_selected("Work");

        let err = controller.toggle_complete(&TaskId::from("missing")).unwrap_err();
        assert!(matches!(err, TaskListError::TaskNotFound(_)));
    }

    #[test]
    fn clear_completed_is_idempotent() {
        let mut controller = with_selected("Work");
        let a = controller.add_task("A").unwrap();
        controller.add_task("B").unwrap();
        controller.toggle_complete(&a.id).unwrap();

        assert_eq!(controller.clear_completed().unwrap(), 1);
        let after_first = controller.state().clone();
        assert_eq!(controller.clear_completed().unwrap(), 0);
        assert_eq!(controller.state(), &after_first);
    }

    #[test]
    fn groceries_scenario() {
        let mut controller = with_selected("Groceries");
        let milk = controller.add_task("Milk").unwrap();
        controller.toggle_complete(&milk.id).unwrap();
        controller.clear_completed().unwrap();

        assert!(controller.selected_list().unwrap().tasks.is_empty());
        assert!(controller.view().board().detail.as_ref().unwrap().tasks.is_empty());
    }
}
