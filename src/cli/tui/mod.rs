//! Interactive board
//!
//! A terminal view of the same state the one-shot commands use: the
//! lists panel on the left, the selected list's tasks on the right.

mod app;
mod board;
mod event;
mod terminal;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::Output;
use crate::storage::FileStore;
use app::App;
use event::EventHandler;

/// Launch the board on the store at `store_path`
pub fn run(output: &Output, store_path: &Path, tick_rate_ms: u64) -> Result<()> {
    // Load before touching the terminal so errors print normally
    let mut app = App::new(FileStore::new(store_path));
    output.verbose_ctx("tui", &format!("Loaded {} lists", app.board().lists.len()));

    let mut terminal = terminal::enter()?;
    let events = EventHandler::new(Duration::from_millis(tick_rate_ms));

    // Restore the terminal even if the board panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));
    let restore_result = terminal::leave();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Board panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Board panicked: {}", s))
            } else {
                Err(anyhow!("Board panicked with unknown error"))
            }
        }
    }
}
