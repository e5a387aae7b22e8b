//! List CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::app::Session;
use super::output::Output;
use crate::domain::ListId;

#[derive(Subcommand)]
pub enum ListCommands {
    /// Create a list (not selected automatically)
    New {
        /// List name, 1-14 characters
        name: String,
    },

    /// Select the list shown in the task panel
    Select {
        /// List ID
        id: String,
    },

    /// Delete the selected list and its tasks
    Delete,
}

pub fn run(cmd: ListCommands, session: Session, output: &Output) -> Result<()> {
    match cmd {
        ListCommands::New { name } => new_list(session, output, &name),
        ListCommands::Select { id } => select_list(session, output, &id),
        ListCommands::Delete => delete_list(session, output),
    }
}

fn new_list(mut session: Session, output: &Output, name: &str) -> Result<()> {
    output.verbose_ctx("list", &format!("Creating list: {:?}", name));
    let list = session.controller.create_list(name)?;

    output.success(&format!("Created list: {} ({})", list.name, list.id));
    Ok(())
}

fn select_list(mut session: Session, output: &Output, id: &str) -> Result<()> {
    let id = ListId::from(id);
    let exists = session.controller.state().list(&id).is_some();
    output.verbose_ctx("list", &format!("Selecting {} (exists: {})", id, exists));

    session.controller.select_list(id.clone())?;

    if exists {
        output.success(&format!("Selected list: {}", id));
    } else {
        output.success(&format!("No list with id {}; nothing is selected", id));
    }
    Ok(())
}

fn delete_list(mut session: Session, output: &Output) -> Result<()> {
    match session.controller.delete_list()? {
        Some(list) => output.success(&format!("Deleted list: {} ({})", list.name, list.id)),
        None => output.success("No list selected; nothing deleted"),
    }
    Ok(())
}
