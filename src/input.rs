//! Input loading.
//!
//! Records come either from one JSON document or from a tree of
//! `.at.toml` files, one per project directory, whose records are merged.
//!
//! # JSON Shape
//! ```json
//! {
//!   "events":    [{ "name": "standup", "startTime": "2024-03-01T09:00:00Z", "endTime": "2024-03-01T09:30:00Z" }],
//!   "deadlines": [{ "name": "essay", "minutesRemaining": 120, "deadline": "2024-03-02T17:00:00Z" }],
//!   "periodics": [{ "name": "stretch", "probability": 3 }]
//! }
//! ```
//! TOML files use the same keys with `[[events]]`, `[[deadlines]]` and
//! `[[periodics]]` tables; times are RFC 3339 strings.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TimetableError};
use crate::models::{Deadline, Event, Periodic};
use crate::validation::{normalize_input, validate_input};

/// File name searched for by [`InputData::load_tree`].
pub const TREE_FILE_NAME: &str = ".at.toml";

/// The records a timetable is generated from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputData {
    /// Fixed commitments.
    pub events: Vec<Event>,
    /// Flexible work items.
    pub deadlines: Vec<Deadline>,
    /// Recurring activities.
    pub periodics: Vec<Periodic>,
}

impl InputData {
    /// Parses a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Merges every `.at.toml` file found under `root`.
    ///
    /// Files are read in path order so the merged record order is stable.
    pub fn load_tree(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let files = find_tree_files(root)?;
        if files.is_empty() {
            return Err(TimetableError::NoInputFiles {
                root: root.to_path_buf(),
            });
        }

        let mut merged = Self::default();
        for file in &files {
            debug!(path = %file.display(), "loading input file");
            let part = Self::from_toml_str(&fs::read_to_string(file)?)?;
            merged.merge(part);
        }
        Ok(merged)
    }

    /// Appends another input's records.
    pub fn merge(&mut self, other: Self) {
        self.events.extend(other.events);
        self.deadlines.extend(other.deadlines);
        self.periodics.extend(other.periodics);
    }

    /// Normalizes and validates the records against `anchor`.
    pub fn prepare(mut self, anchor: DateTime<Utc>) -> Result<Self> {
        normalize_input(&mut self);
        validate_input(&self, anchor).map_err(TimetableError::InvalidInput)?;
        Ok(self)
    }
}

/// Recursively collects `.at.toml` paths under `root`, sorted.
pub fn find_tree_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                pending.push(path);
            } else if entry.file_name() == TREE_FILE_NAME {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}
