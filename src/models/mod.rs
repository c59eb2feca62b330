//! Timetabling domain models.
//!
//! Provides the core data types for describing a personal calendar and the
//! filled slot grid produced from it.
//!
//! # Record Kinds
//!
//! | Type | Moves? | Occupies slots | Source |
//! |------|--------|----------------|--------|
//! | Event | no | exclusively | input |
//! | Deadline | yes | one per work unit | input |
//! | Periodic | no (hashed) | as a tag | input |
//! | Slot | - | - | generated |

mod deadline;
mod event;
mod periodic;
mod slot;
mod timetable;

pub use deadline::Deadline;
pub use event::Event;
pub use periodic::Periodic;
pub use slot::{PeriodicPolicy, Slot};
pub use timetable::Timetable;
