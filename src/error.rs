//! Error types for timetable solving.
//!
//! Only input problems are errors. An infeasible catalog or a search cut
//! short by its budget is a normal [`SolveOutcome`](crate::search::SolveOutcome)
//! variant, not an error.

use thiserror::Error;

use crate::validation::ValidationError;

/// Failure to parse externally supplied text (clock times, week lists,
/// day digits, serialized period lists).
#[derive(Debug, Error)]
pub enum ParseError {
    /// A clock time not in `HH:MM` form.
    #[error("invalid clock time `{0}` (expected HH:MM)")]
    Clock(String),
    /// A week list not in `1-5, 7-10` form.
    #[error("invalid week list `{0}`")]
    Weeks(String),
    /// A day digit outside `1..=7`.
    #[error("invalid day digit `{0}` (expected 1-7)")]
    DayDigit(char),
    /// A numeric day that is not an integer in `1..=7`.
    #[error("invalid day value {0} (expected an integer 1-7)")]
    DayValue(f64),
    /// The serialized period list is not valid JSON of the expected shape.
    #[error("malformed period list: {0}")]
    PeriodList(#[from] serde_json::Error),
}

/// Errors reported before the search starts.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The catalog or the constraints failed validation.
    #[error("invalid input: {}", describe(.0))]
    InvalidInput(Vec<ValidationError>),
    /// Wire or text input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<Vec<ValidationError>> for SolveError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
