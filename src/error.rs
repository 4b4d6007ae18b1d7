//! Errors raised when a todo is built from user input or from server data

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

/// Why a todo (or a form draft, or a server record) has been rejected
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// The title is empty, or only made of whitespace
    EmptyTitle,
    /// The end date is earlier than the start date
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    /// A date could not be parsed as `YYYY-MM-DD`
    InvalidDate(String),
    /// A clock time could not be parsed as `HH:MM`
    InvalidTime(String),
    /// A required field is absent
    MissingField(&'static str),
    /// Shifting a date would leave the supported calendar
    DateOutOfRange,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "the title must not be empty"),
            ValidationError::EndBeforeStart{ start, end } => write!(f, "end date {} is earlier than start date {}", end, start),
            ValidationError::InvalidDate(s) => write!(f, "invalid date {:?}", s),
            ValidationError::InvalidTime(s) => write!(f, "invalid time {:?}", s),
            ValidationError::MissingField(name) => write!(f, "missing field `{}`", name),
            ValidationError::DateOutOfRange => write!(f, "date out of range"),
        }
    }
}

impl std::error::Error for ValidationError {}
