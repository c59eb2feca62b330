//! Personal timetabling for the U-Engine ecosystem.
//!
//! Assigns half-hour slots of a calendar to fixed events, deadline work,
//! and recurring periodic activities, producing a printable timetable.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Event`, `Deadline`, `Periodic`, `Slot`, `Timetable`
//! - **`scheduler`**: The generation engine: grid sizing, periodic placement,
//!   event filling, feasibility, and weighted deadline allocation
//! - **`validation`**: Input integrity checks (past items, overlapping events)
//! - **`input`**: JSON and `.at.toml` loading
//! - **`render`**: Plain-text output
//!
//! # Guarantees
//!
//! A generated timetable never gives a slot to two deadlines or to both a
//! deadline and an event, and every deadline's work lands before its due
//! time. If that is impossible the generator reports the first deadline
//! that cannot be met and how many slots are missing. The result is a
//! feasible assignment, not an optimal one.

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod render;
pub mod scheduler;
pub mod time;
pub mod validation;

pub use config::GeneratorConfig;
pub use error::{Result, TimetableError};
pub use input::InputData;
pub use scheduler::TimetableGenerator;
