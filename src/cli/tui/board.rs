//! Board layout: lists panel, task panel (only with a selection), status bar
//!
//! Each frame is drawn from scratch out of the cached [`BoardView`].

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::app::{App, Focus, InputMode};
use crate::storage::KeyValueStore;
use crate::view::{DetailPanel, ListRow};

/// Draw the whole board
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Panels
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    match &app.board().detail {
        Some(detail) => {
            let panels = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(main_chunks[0]);

            draw_lists_panel(frame, app, panels[0]);
            draw_tasks_panel(frame, app, detail, panels[1]);
        }
        // No selection: the task panel is hidden
        None => draw_lists_panel(frame, app, main_chunks[0]),
    }

    draw_status_bar(frame, app, main_chunks[1]);
}

fn panel_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn highlight(focused: bool) -> Style {
    Style::default()
        .bg(if focused { Color::DarkGray } else { Color::Black })
        .add_modifier(Modifier::BOLD)
}

fn list_item(row: &ListRow) -> ListItem<'static> {
    if row.active {
        ListItem::new(format!("* {}", row.name))
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ListItem::new(format!("  {}", row.name))
    }
}

fn draw_lists_panel<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let focused = app.focus() == Focus::Lists;
    let board = app.board();

    if board.lists.is_empty() {
        let hint = Paragraph::new("No lists yet. Press 'n' to create one.")
            .block(panel_block("Lists".to_string(), focused));
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = board.lists.iter().map(list_item).collect();
    let list = List::new(items)
        .block(panel_block(format!("Lists ({})", board.lists.len()), focused))
        .highlight_style(highlight(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.list_index()));

    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tasks_panel<S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<S>,
    detail: &DetailPanel,
    area: Rect,
) {
    let focused = app.focus() == Focus::Tasks;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area.inner(Margin::new(1, 1)));

    frame.render_widget(panel_block(detail.title.clone(), focused), area);
    frame.render_widget(
        Paragraph::new(detail.remaining.as_str()).style(Style::default().fg(Color::Yellow)),
        chunks[0],
    );

    let items: Vec<ListItem> = detail
        .tasks
        .iter()
        .map(|t| {
            if t.complete {
                ListItem::new(format!("[x] {}", t.name)).style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ListItem::new(format!("[ ] {}", t.name))
            }
        })
        .collect();

    let list = List::new(items)
        .highlight_style(highlight(focused))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !detail.tasks.is_empty() {
        state.select(Some(app.task_index()));
    }

    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn draw_status_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let (content, style) = match (app.notice(), app.input_mode()) {
        (_, InputMode::NewList(name)) => (
            format!("New list: {}_", name),
            Style::default().fg(Color::Green),
        ),
        (_, InputMode::NewTask(name)) => (
            format!("New task: {}_", name),
            Style::default().fg(Color::Green),
        ),
        (_, InputMode::ConfirmDelete) => {
            let title = app
                .board()
                .detail
                .as_ref()
                .map(|d| d.title.as_str())
                .unwrap_or("");
            (
                format!("Delete list '{}' and its tasks? [y/n]", title),
                Style::default().fg(Color::Yellow),
            )
        }
        (Some(notice), InputMode::Normal) => (
            format!("{}  (press any key)", notice),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        (None, InputMode::Normal) => (
            "[n]ew list [a]dd task [enter]select/toggle [c]lear done [D]elete list [?]help [q]uit"
                .to_string(),
            Style::default(),
        ),
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn render(app: &App<MemoryStore>) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn empty_board_shows_hint() {
        let app = App::new(MemoryStore::new());
        assert!(render(&app).contains("No lists yet"));
    }

    #[test]
    fn task_panel_appears_after_selection() {
        let mut app = App::new(MemoryStore::new());
        press(&mut app, KeyCode::Char('n'));
        for c in "Groceries".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);

        let before = render(&app);
        assert!(before.contains("Groceries"));
        assert!(!before.contains("No ongoing tasks!"));

        press(&mut app, KeyCode::Enter);
        let after = render(&app);
        assert!(after.contains("* Groceries"));
        assert!(after.contains("No ongoing tasks!"));
    }
}
