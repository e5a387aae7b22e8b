//! Plain text and JSON renderers for one-shot commands

use std::io::{self, Write};

use super::{BoardView, View};
use crate::domain::{render_task_count, TaskList};

/// Formats the whole board as text
pub fn format_board(board: &BoardView) -> String {
    let mut out = String::new();

    if board.lists.is_empty() {
        out.push_str("No lists yet\n");
        return out;
    }

    out.push_str("Lists:\n");
    for row in &board.lists {
        let marker = if row.active { ">" } else { " " };
        out.push_str(&format!("{} {:<16} {}\n", marker, row.name, row.id));
    }

    out.push('\n');
    match &board.detail {
        None => out.push_str("No list selected\n"),
        Some(detail) => {
            out.push_str(&format!("{} ({})\n", detail.title, detail.remaining));
            for task in &detail.tasks {
                let check = if task.complete { "[x]" } else { "[ ]" };
                out.push_str(&format!("  {} {:<16} {}\n", check, task.name, task.id));
            }
        }
    }

    out
}

/// Formats the remaining-count line for a list
pub fn format_task_count(list: &TaskList) -> String {
    format!("{}: {}\n", list.name, render_task_count(list))
}

/// Writes boards as text
pub struct TextView<W> {
    out: W,
}

impl TextView<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TextView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write board");
        }
    }
}

impl<W: Write> View for TextView<W> {
    fn render(&mut self, board: &BoardView) {
        self.emit(&format_board(board));
    }

    fn render_task_count(&mut self, list: &TaskList) {
        self.emit(&format_task_count(list));
    }
}

/// Writes boards as single-line JSON documents
pub struct JsonView<W> {
    out: W,
}

impl JsonView<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, value: &serde_json::Value) {
        if let Err(e) = writeln!(self.out, "{}", value).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write board");
        }
    }
}

impl<W: Write> View for JsonView<W> {
    fn render(&mut self, board: &BoardView) {
        self.emit(&serde_json::json!(board));
    }

    fn render_task_count(&mut self, list: &TaskList) {
        self.emit(&serde_json::json!({
            "list_id": list.id,
            "remaining": render_task_count(list),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppState, ListId};
    use chrono::{TimeZone, Utc};

    fn sample_board() -> BoardView {
        let mut state = AppState::default();
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let id = state.create_list("Groceries", now).unwrap().id.clone();
        state.create_list("Work", now).unwrap();
        state.select_list(id);
        let milk = state.add_task("Milk", now).unwrap().id.clone();
        state.add_task("Eggs", now).unwrap();
        state.toggle_complete(&milk).unwrap();
        BoardView::project(&state)
    }

    #[test]
    fn empty_board() {
        assert_eq!(format_board(&BoardView::default()), "No lists yet\n");
    }

    #[test]
    fn board_shows_lists_and_tasks() {
        let text = format_board(&sample_board());

        assert!(text.contains("> Groceries"));
        assert!(text.contains("  Work"));
        assert!(text.contains("Groceries (1 task remaining)"));
        assert!(text.contains("[x] Milk"));
        assert!(text.contains("[ ] Eggs"));
    }

    #[test]
    fn board_without_selection() {
        let mut board = sample_board();
        board.detail = None;
        for row in &mut board.lists {
            row.active = false;
        }

        let text = format_board(&board);
        assert!(text.contains("No list selected"));
        assert!(!text.contains("[ ]"));
    }

    #[test]
    fn text_view_writes_board() {
        let mut view = TextView::new(Vec::new());
        view.render(&sample_board());

        let written = String::from_utf8(view.into_inner()).unwrap();
        assert_eq!(written, format_board(&sample_board()));
    }

    #[test]
    fn json_view_writes_projection() {
        let mut view = JsonView::new(Vec::new());
        view.render(&sample_board());

        let written = String::from_utf8(view.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(value["lists"][0]["name"], "Groceries");
        assert_eq!(value["lists"][0]["active"], true);
        assert_eq!(value["detail"]["remaining"], "1 task remaining");
    }

    #[test]
    fn task_count_line() {
        let mut list = TaskList::new(ListId::from("1"), "Work");
        list.push_task("Email", Utc.timestamp_millis_opt(1).unwrap());
        assert_eq!(format_task_count(&list), "Work: 1 task remaining\n");
    }
}
