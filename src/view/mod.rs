//! # Board rendering
//!
//! Rendering is a full rebuild: [`BoardView::project`] turns the whole
//! [`AppState`] into a fresh projection on every call, and a [`View`]
//! presents it. Nothing is diffed.
//!
//! | View | Used by |
//! |------|---------|
//! | [`TextView`] | one-shot commands, text format |
//! | [`JsonView`] | one-shot commands, `--format json` |
//! | [`BoardCache`] | interactive board, which draws from the latest projection |

mod text;

use serde::Serialize;

use crate::domain::{render_task_count, AppState, ListId, TaskId, TaskList};

pub use text::{format_board, format_task_count, JsonView, TextView};

/// One entry in the list-of-lists panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    pub id: ListId,
    pub name: String,
    pub active: bool,
}

/// One task row in the detail panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub name: String,
    pub complete: bool,
}

/// The detail panel for the selected list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPanel {
    pub list_id: ListId,
    pub title: String,
    pub remaining: String,
    pub tasks: Vec<TaskRow>,
}

impl DetailPanel {
    fn from_list(list: &TaskList) -> Self {
        Self {
            list_id: list.id.clone(),
            title: list.name.clone(),
            remaining: render_task_count(list),
            tasks: list
                .tasks
                .iter()
                .map(|t| TaskRow {
                    id: t.id.clone(),
                    name: t.name.clone(),
                    complete: t.complete,
                })
                .collect(),
        }
    }
}

/// Everything a view needs to draw the board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub lists: Vec<ListRow>,
    /// Present only when the selection names an existing list
    pub detail: Option<DetailPanel>,
}

impl BoardView {
    /// Projects the current state
    pub fn project(state: &AppState) -> Self {
        let selected = state.selected_list_id();

        let lists = state
            .lists()
            .iter()
            .map(|l| ListRow {
                id: l.id.clone(),
                name: l.name.clone(),
                active: selected == Some(&l.id),
            })
            .collect();

        Self {
            lists,
            detail: state.selected_list().map(DetailPanel::from_list),
        }
    }
}

/// Presents board projections
pub trait View {
    /// Redraws the whole board
    fn render(&mut self, board: &BoardView);

    /// Refreshes only the remaining-count indicator of `list`
    fn render_task_count(&mut self, _list: &TaskList) {}
}

/// Keeps the latest projection for views that draw on their own schedule
#[derive(Debug, Clone, Default)]
pub struct BoardCache {
    board: BoardView,
    renders: usize,
}

impl BoardCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &BoardView {
        &self.board
    }

    /// Number of full renders received
    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl View for BoardCache {
    fn render(&mut self, board: &BoardView) {
        self.board = board.clone();
        self.renders += 1;
    }

    fn render_task_count(&mut self, list: &TaskList) {
        let Some(detail) = self.board.detail.as_mut() else {
            return;
        };
        if detail.list_id != list.id {
            return;
        }

        detail.remaining = render_task_count(list);
        for row in &mut detail.tasks {
            if let Some(task) = list.task(&row.id) {
                row.complete = task.complete;
            }
        }
    }
}
