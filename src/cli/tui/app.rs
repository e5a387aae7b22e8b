//! Interactive board state and key handling
//!
//! All list and task changes go through the [`Controller`], which saves
//! and refreshes the [`BoardCache`] the board is drawn from. Only cursor
//! position, focus and text input live here.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::board;
use super::event::{Event, EventHandler};
use super::terminal::Terminal;
use crate::controller::Controller;
use crate::domain::MAX_NAME_LEN;
use crate::error::TaskListError;
use crate::storage::KeyValueStore;
use crate::view::{BoardCache, BoardView};

const HELP: &str =
    "j/k:move tab:panel enter:select/toggle n:new list a:add task c:clear done D:delete list q:quit";

/// Which panel has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Lists,
    Tasks,
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    NewList(String),
    NewTask(String),
    ConfirmDelete,
}

/// Application state
pub struct App<S> {
    controller: Controller<S, BoardCache>,

    /// Cursor in the lists panel
    list_index: usize,

    /// Cursor in the tasks panel
    task_index: usize,

    focus: Focus,
    input_mode: InputMode,

    /// Notice shown in the status bar until the next key press
    notice: Option<String>,

    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Loads state from `store` and draws the initial board
    pub fn new(store: S) -> Self {
        let mut controller = Controller::open(store, BoardCache::new());
        controller.render();

        let mut app = Self {
            controller,
            list_index: 0,
            task_index: 0,
            focus: Focus::Lists,
            input_mode: InputMode::Normal,
            notice: None,
            should_quit: false,
        };

        // Start the cursor on the selected list
        if let Some(index) = app.board().lists.iter().position(|l| l.active) {
            app.list_index = index;
        }

        app
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize | Event::Tick => {}
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        board::draw(frame, self);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        // A notice blocks until dismissed; the dismissing key does nothing else
        if self.notice.take().is_some() && self.input_mode == InputMode::Normal {
            return Ok(());
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::NewList(_) | InputMode::NewTask(_) => self.handle_input_key(key),
            InputMode::ConfirmDelete => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),

            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.switch_focus();
            }

            KeyCode::Enter | KeyCode::Char(' ') => self.activate()?,

            KeyCode::Char('n') => self.input_mode = InputMode::NewList(String::new()),
            KeyCode::Char('a') => self.input_mode = InputMode::NewTask(String::new()),
            KeyCode::Char('c') => {
                if let Some(removed) = self.attempt(|c| c.clear_completed())? {
                    if removed > 0 {
                        self.notice = Some(format!("Cleared {} completed", removed));
                    }
                    self.clamp_cursors();
                }
            }
            KeyCode::Char('D') => {
                if self.board().detail.is_some() {
                    self.input_mode = InputMode::ConfirmDelete;
                } else {
                    self.notice = Some("Select a list to delete first".to_string());
                }
            }

            KeyCode::Char('?') => self.notice = Some(HELP.to_string()),

            _ => {}
        }

        Ok(())
    }

    /// Handle keys while typing a list or task name
    fn handle_input_key(&mut self, key: KeyEvent) -> Result<()> {
        let (mut text, is_list) = match &self.input_mode {
            InputMode::NewList(t) => (t.clone(), true),
            InputMode::NewTask(t) => (t.clone(), false),
            _ => return Ok(()),
        };

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                return Ok(());
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if is_list {
                    if let Some(list) = self.attempt(|c| c.create_list(&text))? {
                        self.notice = Some(format!("Created list: {}", list.name));
                    }
                } else if self.attempt(|c| c.add_task(&text))?.is_some() {
                    self.focus = Focus::Tasks;
                    self.task_index = self.task_count().saturating_sub(1);
                }
                return Ok(());
            }
            KeyCode::Backspace => {
                text.pop();
            }
            // Accept one character past the limit so the rejection is visible
            KeyCode::Char(c) if text.chars().count() <= MAX_NAME_LEN => text.push(c),
            _ => {}
        }

        self.input_mode = if is_list {
            InputMode::NewList(text)
        } else {
            InputMode::NewTask(text)
        };
        Ok(())
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if let Some(Some(list)) = self.attempt(|c| c.delete_list())? {
                    self.notice = Some(format!("Deleted list: {}", list.name));
                }
                self.focus = Focus::Lists;
                self.clamp_cursors();
            }
            KeyCode::Char('n') | KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {}
        }

        Ok(())
    }

    /// Enter on a list selects it; on a task, toggles it
    fn activate(&mut self) -> Result<()> {
        match self.focus {
            Focus::Lists => {
                let Some(row) = self.board().lists.get(self.list_index) else {
                    return Ok(());
                };
                let id = row.id.clone();
                self.attempt(|c| c.select_list(id))?;
                self.task_index = 0;
            }
            Focus::Tasks => {
                let Some(row) = self
                    .board()
                    .detail
                    .as_ref()
                    .and_then(|d| d.tasks.get(self.task_index))
                else {
                    return Ok(());
                };
                let id = row.id.clone();
                self.attempt(|c| c.toggle_complete(&id))?;
            }
        }

        Ok(())
    }

    /// Runs a controller operation, turning rejections into a notice.
    ///
    /// Returns `None` if the operation was rejected. Storage failures
    /// end the session.
    fn attempt<T>(
        &mut self,
        op: impl FnOnce(&mut Controller<S, BoardCache>) -> Result<T, TaskListError>,
    ) -> Result<Option<T>> {
        match op(&mut self.controller) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_rejection() => {
                self.notice = Some(e.to_string());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let (index, len) = match self.focus {
            Focus::Lists => (&mut self.list_index, self.controller.view().board().lists.len()),
            Focus::Tasks => {
                let len = self.task_count();
                (&mut self.task_index, len)
            }
        };
        if len == 0 {
            return;
        }
        *index = (*index as isize + delta).rem_euclid(len as isize) as usize;
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Lists if self.board().detail.is_some() => Focus::Tasks,
            _ => Focus::Lists,
        };
    }

    fn clamp_cursors(&mut self) {
        let lists = self.board().lists.len();
        let tasks = self.task_count();
        self.list_index = self.list_index.min(lists.saturating_sub(1));
        self.task_index = self.task_index.min(tasks.saturating_sub(1));
        if self.board().detail.is_none() {
            self.focus = Focus::Lists;
        }
    }

    fn task_count(&self) -> usize {
        self.board().detail.as_ref().map_or(0, |d| d.tasks.len())
    }

    // Accessors for drawing

    /// The latest rendered board
    pub fn board(&self) -> &BoardView {
        self.controller.view().board()
    }

    pub fn list_index(&self) -> usize {
        self.list_index
    }

    pub fn task_index(&self) -> usize {
        self.task_index
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
