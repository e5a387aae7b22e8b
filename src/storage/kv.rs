//! String key-value stores
//!
//! [`FileStore`] keeps every entry in one JSON object file, e.g.
//! `{"task.lists": "[...]", "task.selectedListId": "1700000000000"}`.
//! Reads take a shared lock; writes go through a locked temp file and a rename.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{Result, TaskListError};

/// A synchronous store of string values under string keys
pub trait KeyValueStore {
    /// Returns the value for `key`, or `None` if absent
    fn get(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Applies several changes at once. `None` removes the key.
    ///
    /// Stores that can write all changes in one step override this so a
    /// failure leaves none of them applied.
    fn write_batch(&mut self, changes: &[(&str, Option<&str>)]) -> Result<()> {
        for (key, value) in changes {
            match value {
                Some(value) => self.set(key, value)?,
                None => self.remove(key)?,
            }
        }
        Ok(())
    }
}

/// In-memory store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries. A missing or unreadable file reads as empty.
    pub fn read_all(&self) -> BTreeMap<String, String> {
        if !self.path.exists() {
            return BTreeMap::new();
        }

        match self.try_read_all() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable store file"
                );
                BTreeMap::new()
            }
        }
    }

    fn try_read_all(&self) -> std::result::Result<BTreeMap<String, String>, Box<dyn std::error::Error>> {
        let file = File::open(&self.path)?;

        // Acquire shared lock for reading
        file.lock_shared()?;

        let reader = BufReader::new(&file);
        let entries = serde_json::from_reader(reader)?;

        // Lock is released when file is dropped
        Ok(entries)
    }

    /// Writes all entries (full rewrite)
    pub fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let io_err = |source| TaskListError::Storage {
            path: self.path.clone(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(io_err)?;

            // Acquire exclusive lock
            file.lock_exclusive().map_err(io_err)?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writeln!(writer).map_err(io_err)?;
            writer.flush().map_err(io_err)?;
        }

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(io_err)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.write_batch(&[(key, None)])
    }

    /// One read, one atomic rewrite. Nothing is written if nothing changes.
    fn write_batch(&mut self, changes: &[(&str, Option<&str>)]) -> Result<()> {
        let before = self.read_all();
        let mut entries = before.clone();
        for (key, value) in changes {
            match value {
                Some(value) => entries.insert(key.to_string(), value.to_string()),
                None => entries.remove(*key),
            };
        }

        if entries == before {
            return Ok(());
        }
        self.write_all(&entries)
    }
}
