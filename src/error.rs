//! Error types for timetable generation.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Error types for loading input and generating timetables.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// The deadline workload cannot fit before a due time.
    #[error(
        "There's too little time to do everything before {}! Please reduce the number of events or deadlines or extend them to free at least {shortfall} slots (first unmeetable deadline: {deadline})",
        .due.format("%b %-d %H:%M")
    )]
    Infeasible {
        deadline: String,
        due: DateTime<Utc>,
        shortfall: usize,
    },

    /// The weighted retry search gave up.
    #[error("deadline allocation did not converge after {attempts} attempts")]
    NonConvergence { attempts: u32 },

    /// Input records failed validation.
    #[error("invalid input: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A directory scan found no input files.
    #[error("no input files found under {}", .root.display())]
    NoInputFiles { root: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error
    #[error("error making sense of input file: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[error("error making sense of input file: {0}")]
    Toml(#[from] toml::de::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
