//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Board | Render state | `show`, `tui` |
//! | List | List lifecycle | `list new`, `list select`, `list delete` |
//! | Task | Tasks of the selected list | `task add`, `task toggle`, `task clear` |
//! | Setup | Inspect settings | `config` |
//!
//! Every one-shot command loads the store, applies one operation, saves
//! and prints the redrawn board.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod list;
mod output;
mod task;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{CliView, Output, OutputFormat};
