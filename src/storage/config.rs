//! Configuration handling
//!
//! Configuration is stored in `~/.config/tasklist/config.toml` (or the
//! platform equivalent). Every field is optional.
//!
//! Store path precedence: `--store` / `TASKLIST_STORE` > `store_path` in
//! the config file > `<data dir>/storage.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Could not determine a data directory; pass --store explicitly")]
    NoDataDir,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the key-value store file lives
    pub store_path: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: OutputFormat,

    /// Tick rate of the interactive board, in milliseconds
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            default_format: OutputFormat::Text,
            tick_rate_ms: 250,
        }
    }
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "tasklist", "tasklist")
    }

    /// Returns the config file location, if a home directory is known
    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the config from a specific file, or defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Resolves the store file path, letting `cli_override` win
    pub fn resolve_store_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.store_path {
            return Ok(path.clone());
        }

        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("storage.json"))
            .ok_or_else(|| ConfigError::NoDataDir.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.store_path.is_none());
        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn parse_config() {
        let toml = r#"
store_path = "/tmp/lists.json"
default_format = "json"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.store_path, Some(PathBuf::from("/tmp/lists.json")));
        assert_eq!(config.default_format, OutputFormat::Json);
        // Unset fields keep their defaults
        assert_eq!(config.tick_rate_ms, 250);
    }

    #[test]
    fn load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.default_format, OutputFormat::Text);
    }

    #[test]
    fn load_invalid_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_format = [").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn cli_override_wins() {
        let config = Config {
            store_path: Some(PathBuf::from("/from/config.json")),
            ..Config::default()
        };

        let path = config.resolve_store_path(Some(Path::new("/from/cli.json"))).unwrap();
        assert_eq!(path, PathBuf::from("/from/cli.json"));

        let path = config.resolve_store_path(None).unwrap();
        assert_eq!(path, PathBuf::from("/from/config.json"));
    }
}
