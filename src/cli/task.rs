//! Task CLI commands
//!
//! Every command here works on the selected list and fails if no list
//! is selected.

use anyhow::Result;
use clap::Subcommand;

use super::app::Session;
use super::output::Output;
use crate::domain::TaskId;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task to the selected list
    Add {
        /// Task name, 1-14 characters
        name: String,
    },

    /// Mark a task complete, or incomplete again
    Toggle {
        /// Task ID
        id: String,
    },

    /// Remove completed tasks from the selected list
    Clear,
}

pub fn run(cmd: TaskCommands, session: Session, output: &Output) -> Result<()> {
    match cmd {
        TaskCommands::Add { name } => add_task(session, output, &name),
        TaskCommands::Toggle { id } => toggle_task(session, output, &id),
        TaskCommands::Clear => clear_completed(session, output),
    }
}

fn add_task(mut session: Session, output: &Output, name: &str) -> Result<()> {
    output.verbose_ctx("task", &format!("Adding task: {:?}", name));
    let task = session.controller.add_task(name)?;

    output.success(&format!("Added task: {} ({})", task.name, task.id));
    Ok(())
}

fn toggle_task(mut session: Session, output: &Output, id: &str) -> Result<()> {
    let id = TaskId::from(id);
    let complete = session.controller.toggle_complete(&id)?;

    let state = if complete { "complete" } else { "incomplete" };
    output.success(&format!("Marked task {} {}", id, state));
    Ok(())
}

fn clear_completed(mut session: Session, output: &Output) -> Result<()> {
    let removed = session.controller.clear_completed()?;

    let noun = if removed == 1 { "task" } else { "tasks" };
    output.success(&format!("Cleared {} completed {}", removed, noun));
    Ok(())
}
