//! Input validation for timetabling problems.
//!
//! Checks structural integrity of events, deadlines, and periodics
//! before generation. Detects:
//! - Events or deadlines already in the past
//! - Events ending before they start
//! - Overlapping events
//! - Unnamed events that are not repopulation blocks
//! - Negative or non-finite workloads and probabilities
//!
//! Validation expects normalized input (see [`normalize_input`]): events and
//! deadlines rounded to slot boundaries and sorted chronologically.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::input::InputData;
use crate::models::{Deadline, Event};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An event ended before the anchor time.
    EventInPast,
    /// An event's end is before its start.
    EventEndsBeforeStart,
    /// An event starts before its predecessor ends.
    OverlappingEvents,
    /// An event has no name and is not a repopulation block.
    UnnamedEvent,
    /// A deadline is due before the anchor time.
    DeadlineInPast,
    /// A workload is negative or not a number.
    InvalidWorkload,
    /// A periodic probability is negative or not a number.
    InvalidProbability,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Rounds every record to slot boundaries and sorts events by start and
/// deadlines by due time. Sorting is stable.
pub fn normalize_input(data: &mut InputData) {
    for event in &mut data.events {
        event.normalize();
    }
    for deadline in &mut data.deadlines {
        deadline.normalize();
    }
    data.events.sort_by_key(|e| e.start_time);
    data.deadlines.sort_by_key(|d| d.due);
}

/// Validates normalized input against the anchor time.
///
/// Checks:
/// 1. No event has fully elapsed by `anchor`
/// 2. Every event ends at or after its start
/// 3. Every event is named or is a repopulation block
/// 4. No event starts before the previous one ends
/// 5. No deadline is due before `anchor`
/// 6. Workloads are finite and non-negative
/// 7. Periodic probabilities are finite and non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(data: &InputData, anchor: DateTime<Utc>) -> ValidationResult {
    let mut errors = Vec::new();

    check_events(&data.events, anchor, &mut errors);
    check_deadlines(&data.deadlines, anchor, &mut errors);

    for periodic in &data.periodics {
        if !periodic.probability.is_finite() || periodic.probability < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProbability,
                format!(
                    "found a periodic {} with invalid probability {}",
                    periodic.name, periodic.probability
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_events(events: &[Event], anchor: DateTime<Utc>, errors: &mut Vec<ValidationError>) {
    for event in events {
        if event.end_time < anchor {
            errors.push(ValidationError::new(
                ValidationErrorKind::EventInPast,
                format!("found an event {} that has already passed", event.label()),
            ));
        }
        if event.end_time < event.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::EventEndsBeforeStart,
                format!("found an event {} with end time before start time", event.label()),
            ));
        }
        if event.name.is_empty() && !event.repopulate {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnnamedEvent,
                "found an event that has neither a name nor is a repopulation",
            ));
        }
    }

    for pair in events.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverlappingEvents,
                format!(
                    "found an event {} with start time before event {} ends",
                    pair[1].label(),
                    pair[0].label()
                ),
            ));
        }
    }
}

fn check_deadlines(deadlines: &[Deadline], anchor: DateTime<Utc>, errors: &mut Vec<ValidationError>) {
    for deadline in deadlines {
        if deadline.due < anchor {
            errors.push(ValidationError::new(
                ValidationErrorKind::DeadlineInPast,
                format!("found a deadline {} that has already passed", deadline.name),
            ));
        }
        if !deadline.minutes_remaining.is_finite() || deadline.minutes_remaining < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWorkload,
                format!(
                    "found a deadline {} with invalid workload {}",
                    deadline.name, deadline.minutes_remaining
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Periodic;
    use chrono::{TimeDelta, TimeZone};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn hours(h: i64) -> DateTime<Utc> {
        anchor() + TimeDelta::hours(h)
    }

    fn sample_input() -> InputData {
        InputData {
            events: vec![
                Event::new("lunch", hours(3), hours(4)),
                Event::new("standup", hours(0), hours(1)),
            ],
            deadlines: vec![
                Deadline::new("essay", 100.0, hours(8)),
                Deadline::new("slides", 50.0, hours(5)),
            ],
            periodics: vec![Periodic::new("stretch", 3.0)],
        }
    }

    #[test]
    fn test_valid_input() {
        let mut data = sample_input();
        normalize_input(&mut data);
        assert!(validate_input(&data, anchor()).is_ok());
    }

    #[test]
    fn test_normalize_sorts_and_rounds() {
        let mut data = sample_input();
        data.deadlines[0].minutes_remaining = 90.0;
        data.deadlines[0].due = hours(8) + TimeDelta::minutes(10);
        normalize_input(&mut data);

        assert_eq!(data.events[0].name, "standup");
        assert_eq!(data.deadlines[0].name, "slides");
        assert_eq!(data.deadlines[1].minutes_remaining, 100.0);
        assert_eq!(data.deadlines[1].due, hours(8));
    }

    #[test]
    fn test_event_in_past() {
        let mut data = sample_input();
        data.events.push(Event::new("breakfast", hours(-3), hours(-2)));
        normalize_input(&mut data);

        let errors = validate_input(&data, anchor()).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EventInPast));
    }

    #[test]
    fn test_event_ends_before_start() {
        let data = InputData {
            events: vec![Event::new("backwards", hours(2), hours(1))],
            ..Default::default()
        };

        let errors = validate_input(&data, anchor()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EventEndsBeforeStart));
    }

    #[test]
    fn test_overlapping_events() {
        let mut data = sample_input();
        data.events.push(Event::new("call", hours(3) + TimeDelta::minutes(30), hours(5)));
        normalize_input(&mut data);

        let errors = validate_input(&data, anchor()).unwrap_err();
        let overlap = errors
            .iter()
            .find(|e| e.kind == ValidationErrorKind::OverlappingEvents)
            .unwrap();
        assert!(overlap.message.contains("call"));
        assert!(overlap.message.contains("lunch"));
    }

    #[test]
    fn test_touching_events_are_valid() {
        let mut data = sample_input();
        data.events.push(Event::new("walk", hours(4), hours(5)));
        normalize_input(&mut data);

        assert!(validate_input(&data, anchor()).is_ok());
    }

    #[test]
    fn test_unnamed_event() {
        let data = InputData {
            events: vec![
                Event::new("", hours(1), hours(2)),
                Event::repopulation(hours(2), hours(3)),
            ],
            ..Default::default()
        };

        let errors = validate_input(&data, anchor()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::UnnamedEvent);
    }

    #[test]
    fn test_deadline_in_past() {
        let data = InputData {
            deadlines: vec![Deadline::new("late", 25.0, hours(-1))],
            ..Default::default()
        };

        let errors = validate_input(&data, anchor()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::DeadlineInPast);
    }

    #[test]
    fn test_multiple_errors() {
        let data = InputData {
            events: vec![],
            deadlines: vec![Deadline::new("broken", f64::NAN, hours(-1))],
            periodics: vec![Periodic::new("nap", -1.0)],
        };

        let errors = validate_input(&data, anchor()).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidWorkload));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidProbability));
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_input(&InputData::default(), anchor()).is_ok());
    }
}
