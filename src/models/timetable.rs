//! Timetable (solution) model.
//!
//! A timetable is the slot grid together with the records its slots refer
//! to. Slots store indices into `events`, `deadlines` and `periodics`, so the
//! whole result is owned by one value and can be handed to a renderer as is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Deadline, Event, Periodic, Slot};
use crate::time::slot_start;

/// A slot grid anchored at a rounded "now", plus its records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    /// Start of slot 0.
    pub anchor: DateTime<Utc>,
    /// The grid, in chronological order.
    pub slots: Vec<Slot>,
    /// Fixed events, chronologically sorted.
    pub events: Vec<Event>,
    /// Deadlines, sorted by due time.
    pub deadlines: Vec<Deadline>,
    /// Periodic activities.
    pub periodics: Vec<Periodic>,
}

impl Timetable {
    /// Creates a timetable of `len` empty slots.
    pub fn new(
        anchor: DateTime<Utc>,
        len: usize,
        events: Vec<Event>,
        deadlines: Vec<Deadline>,
        periodics: Vec<Periodic>,
    ) -> Self {
        Self {
            anchor,
            slots: vec![Slot::new(); len],
            events,
            deadlines,
            periodics,
        }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the grid has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Wall-clock start of slot `index`.
    #[inline]
    pub fn slot_time(&self, index: usize) -> DateTime<Utc> {
        slot_start(self.anchor, index)
    }

    /// Event occupying slot `index`, if any.
    pub fn event_at(&self, index: usize) -> Option<&Event> {
        self.slots
            .get(index)
            .and_then(|s| s.event)
            .and_then(|e| self.events.get(e))
    }

    /// Deadline worked on in slot `index`, if any.
    pub fn deadline_at(&self, index: usize) -> Option<&Deadline> {
        self.slots
            .get(index)
            .and_then(|s| s.deadline)
            .and_then(|d| self.deadlines.get(d))
    }

    /// Periodic activities tagged on slot `index`.
    pub fn periodics_at(&self, index: usize) -> impl Iterator<Item = &Periodic> + '_ {
        self.slots
            .get(index)
            .into_iter()
            .flat_map(|s| s.periodics.iter())
            .filter_map(|&p| self.periodics.get(p))
    }

    /// Slot indices assigned to a deadline, in order.
    pub fn slots_for_deadline(&self, deadline: usize) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.deadline == Some(deadline))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of slots with deadline work.
    pub fn assigned_count(&self) -> usize {
        self.slots.iter().filter(|s| s.deadline.is_some()).count()
    }
}
