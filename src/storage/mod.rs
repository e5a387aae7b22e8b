//! # Storage Layer
//!
//! Persistence for task lists.
//!
//! ## Storage Format
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Lists + selection | JSON object of string entries | `<data dir>/storage.json` |
//! | Config | TOML | `<config dir>/config.toml` |
//!
//! The store file mirrors a browser's local storage: a flat map of
//! string keys to string values. The list collection is itself a JSON
//! document stored as one of those string values.
//!
//! ## Concurrency Safety
//!
//! - [`FileStore`] uses file locking (`fs2`) for reads and writes
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`KeyValueStore`] - Synchronous string key-value access
//! - [`StateStore`] - Loads and saves the lists and selection
//! - [`Config`] - User configuration

mod config;
mod kv;
mod state_store;

pub use config::{Config, ConfigError, OutputFormat};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use state_store::{StateStore, LISTS_KEY, SELECTED_LIST_ID_KEY};
