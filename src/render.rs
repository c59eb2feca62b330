//! Plain-text timetable output.
//!
//! One line per slot (two for deadline slots, which end with a 5-minute
//! break), times shown as `Jan 2 15:04` in the requested time zone:
//!
//! ```text
//! Mar 1 09:00-Mar 1 09:30: [EVENT] standup
//! Mar 1 09:30-Mar 1 09:55: [DEADLINE] essay
//! Mar 1 09:55-Mar 1 10:00: 5 minute break ; [PERIODIC] stretch
//! Mar 1 10:00-Mar 1 10:30: FREE SLOT
//! ```

use std::fmt;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use crate::models::Timetable;
use crate::time::{BREAK_MINUTES, SLOT_MINUTES};

const TIME_FORMAT: &str = "%b %-d %H:%M";

/// Renders the first `slots` slots (or all, if fewer) in zone `tz`.
pub fn render<Tz>(timetable: &Timetable, slots: usize, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    (0..slots.min(timetable.len()))
        .map(|index| slot_lines(timetable, index, tz))
        .collect()
}

fn slot_lines<Tz>(timetable: &Timetable, index: usize, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let start = timetable.slot_time(index);
    let end = start + TimeDelta::minutes(SLOT_MINUTES);
    let show = |t: DateTime<Utc>| t.with_timezone(tz).format(TIME_FORMAT).to_string();

    let mut lines = if let Some(event) = timetable.event_at(index) {
        format!("{}-{}: [EVENT] {}", show(start), show(end), event.label())
    } else if let Some(deadline) = timetable.deadline_at(index) {
        let work_end = end - TimeDelta::minutes(BREAK_MINUTES);
        format!(
            "{}-{}: [DEADLINE] {}\n{}-{}: 5 minute break",
            show(start),
            show(work_end),
            deadline.name,
            show(work_end),
            show(end)
        )
    } else {
        format!("{}-{}: FREE SLOT", show(start), show(end))
    };

    for periodic in timetable.periodics_at(index) {
        lines.push_str(" ; [PERIODIC] ");
        lines.push_str(&periodic.name);
    }
    lines.push('\n');
    lines
}
