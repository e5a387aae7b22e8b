//! Output formatting for CLI commands

use std::io::Stdout;

use serde::Serialize;

pub use crate::storage::OutputFormat;
use crate::domain::TaskList;
use crate::view::{BoardView, JsonView, TextView, View};

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message (text only; JSON callers emit data instead)
    pub fn success(&self, message: &str) {
        if self.format == OutputFormat::Text {
            println!("{}", message);
        }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                // Fallback for callers without a text rendering
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }

    /// Returns the board view matching the output format
    pub fn view(&self) -> CliView {
        match self.format {
            OutputFormat::Text => CliView::Text(TextView::stdout()),
            OutputFormat::Json => CliView::Json(JsonView::stdout()),
        }
    }
}

/// Board view writing to stdout in the selected format
pub enum CliView {
    Text(TextView<Stdout>),
    Json(JsonView<Stdout>),
}

impl View for CliView {
    fn render(&mut self, board: &BoardView) {
        match self {
            CliView::Text(view) => view.render(board),
            CliView::Json(view) => view.render(board),
        }
    }

    fn render_task_count(&mut self, list: &TaskList) {
        match self {
            CliView::Text(view) => view.render_task_count(list),
            CliView::Json(view) => view.render_task_count(list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_follows_format() {
        let text = Output::new(OutputFormat::Text, false);
        assert!(matches!(text.view(), CliView::Text(_)));
        assert!(!text.is_json());

        let json = Output::new(OutputFormat::Json, false);
        assert!(matches!(json.view(), CliView::Json(_)));
        assert!(json.is_json());
    }
}
