//! Timestamp-derived IDs for lists and tasks
//!
//! ID Format: the decimal creation time in Unix milliseconds
//! (e.g. `1700000000000`).
//!
//! IDs are unique within their scope: list IDs across the whole
//! collection, task IDs within their owning list. When the clock has
//! not advanced past the newest ID in scope, the next ID is bumped to
//! `newest + 1` so fresh IDs stay monotonic. A newest ID of `u64::MAX`
//! cannot be bumped; the lowest free value from the clock up is used instead.
//!
//! Loaded IDs are treated as opaque strings. Non-numeric IDs (from
//! hand-edited stores) are kept as-is and skipped by the bump.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Returns the next fresh ID given the IDs already in scope
fn next_id<'a>(existing: impl IntoIterator<Item = &'a str>, now: DateTime<Utc>) -> String {
    let candidate = now.timestamp_millis().max(0) as u64;

    let taken: BTreeSet<u64> = existing
        .into_iter()
        .filter_map(|id| id.parse::<u64>().ok())
        .collect();

    let next = match taken.last() {
        Some(&newest) if newest >= candidate => newest
            .checked_add(1)
            .unwrap_or_else(|| lowest_free(&taken, candidate)),
        _ => candidate,
    };
    next.to_string()
}

/// Smallest unused value, searching up from `from` and then below it
fn lowest_free(taken: &BTreeSet<u64>, from: u64) -> u64 {
    (from..=u64::MAX)
        .chain(0..from)
        .find(|n| !taken.contains(n))
        .unwrap_or(from)
}

/// List ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Creates a fresh list ID that is distinct from every ID in `existing`
    pub fn fresh<'a>(existing: impl IntoIterator<Item = &'a ListId>, now: DateTime<Utc>) -> Self {
        Self(next_id(existing.into_iter().map(|id| id.as_str()), now))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ListId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Task ID, unique within its owning list
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a fresh task ID that is distinct from every ID in `existing`
    pub fn fresh<'a>(existing: impl IntoIterator<Item = &'a TaskId>, now: DateTime<Utc>) -> Self {
        Self(next_id(existing.into_iter().map(|id| id.as_str()), now))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
