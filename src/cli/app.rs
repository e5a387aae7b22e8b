//! Main CLI application structure

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use super::output::{CliView, Output, OutputFormat};
use super::{list, task, tui};
use crate::controller::Controller;
use crate::storage::{Config, FileStore};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(author, version, about = "Local-first task lists in the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(long, global = true, env = "TASKLIST_STORE")]
    pub store: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true, env = "TASKLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all lists and the selected list's tasks
    Show,

    /// Manage lists
    #[command(subcommand)]
    List(list::ListCommands),

    /// Manage tasks in the selected list
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Open the interactive board
    Tui,

    /// Show the resolved configuration
    Config,
}

/// The controller for one command, writing renders to stdout
pub struct Session {
    pub controller: Controller<FileStore, CliView>,
}

impl Session {
    fn open(store_path: PathBuf, output: &Output) -> Self {
        output.verbose_ctx("store", &format!("Using store: {}", store_path.display()));
        Self {
            controller: Controller::open(FileStore::new(store_path), output.view()),
        }
    }
}

/// Installs the tracing subscriber. `TASKLIST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_env("TASKLIST_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::default(),
    };
    let format = cli.format.unwrap_or(config.default_format);
    let output = Output::new(format, cli.verbose);

    output.verbose("Tasklist starting");
    let store_path = config.resolve_store_path(cli.store.as_deref())?;

    match cli.command {
        Commands::Show => {
            let mut session = Session::open(store_path, &output);
            session.controller.render();
        }

        Commands::List(cmd) => list::run(cmd, Session::open(store_path, &output), &output)?,
        Commands::Task(cmd) => task::run(cmd, Session::open(store_path, &output), &output)?,

        Commands::Tui => {
            output.verbose_ctx("tui", &format!("Opening board on {}", store_path.display()));
            tui::run(&output, &store_path, config.tick_rate_ms)?
        }

        Commands::Config => show_config(&output, &config, config_path.as_deref(), &store_path),
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn show_config(output: &Output, config: &Config, config_path: Option<&Path>, store_path: &Path) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "config_path": config_path.map(|p| p.display().to_string()),
            "store_path": store_path.display().to_string(),
            "default_format": config.default_format,
            "tick_rate_ms": config.tick_rate_ms,
        }));
    } else {
        match config_path {
            Some(path) => println!("Config: {}", path.display()),
            None => println!("Config: (no config directory)"),
        }
        println!("Store: {}", store_path.display());
        println!("Default format: {:?}", config.default_format);
        println!("Tick rate: {}ms", config.tick_rate_ms);
    }
}
