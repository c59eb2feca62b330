//! Fixed event model.
//!
//! An event is an immovable commitment occupying the half-open interval
//! `[start_time, end_time)`. Once normalized, `start_time` sits on a slot
//! boundary (rounded down) and `end_time` on the next boundary at or after
//! the original end (rounded up), so an event covers every slot it touches.
//!
//! # Repopulation Blocks
//! An event flagged `repopulate` is time handed back to periodic
//! activities. It still blocks deadline work, but may carry no name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::{round_down, round_up};

/// A fixed calendar commitment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Display name. May be empty for repopulation blocks.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Whether the event's slots are handed back to periodic activities.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub repopulate: bool,
    /// Interval start (inclusive).
    pub start_time: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end_time: DateTime<Utc>,
}

impl Event {
    /// Creates a named event.
    pub fn new(name: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            repopulate: false,
            start_time,
            end_time,
        }
    }

    /// Creates an unnamed repopulation block.
    pub fn repopulation(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            repopulate: true,
            start_time,
            end_time,
        }
    }

    /// Marks the event as a repopulation block.
    pub fn with_repopulate(mut self) -> Self {
        self.repopulate = true;
        self
    }

    /// Snaps the interval outward to slot boundaries.
    pub fn normalize(&mut self) {
        self.start_time = round_down(self.start_time);
        self.end_time = round_up(self.end_time);
    }

    /// Whether two events overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    /// Label used in rendered output and error messages.
    pub fn label(&self) -> &str {
        if self.name.is_empty() && self.repopulate {
            "[REPOPULATE]"
        } else {
            &self.name
        }
    }
}
