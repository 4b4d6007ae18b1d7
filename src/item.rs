//! Building blocks of a todo: its identifier, its date range and its time-of-day schedule

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use chrono::{Duration, NaiveDate, NaiveTime};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";


/// An opaque, unique todo identifier.
///
/// Identifiers are assigned by the server when a todo is created.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId {
    content: String,
}

impl TodoId {
    /// Generate a random TodoId
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TodoId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TodoId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl Display for TodoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}



/// An inclusive range of calendar dates. `start <= end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::EndBeforeStart{ start, end });
        }
        Ok(Self { start, end })
    }

    /// A range made of a single date
    pub fn single(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    pub fn start(&self) -> NaiveDate { self.start }
    pub fn end(&self) -> NaiveDate   { self.end }

    /// Number of days between the start and the end dates (0 for a single-day range)
    pub fn duration_days(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_days()
    }

    /// Whether `date` is within this range, both ends included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// The range of the same duration, that starts at `new_start`
    pub fn starting_at(&self, new_start: NaiveDate) -> Result<Self, ValidationError> {
        let new_end = new_start
            .checked_add_signed(Duration::days(self.duration_days()))
            .ok_or(ValidationError::DateOutOfRange)?;
        Ok(Self { start: new_start, end: new_end })
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        if self.is_single_day() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{} → {}", self.start, self.end)
        }
    }
}



/// When a todo happens within its dates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    /// Spans whole calendar dates, without time-of-day
    AllDay,
    /// Has a clock time range
    Timed { start: NaiveTime, end: NaiveTime },
}

impl Schedule {
    pub fn is_all_day(&self) -> bool {
        match self {
            Schedule::AllDay => true,
            _ => false,
        }
    }

    /// The configured default time range (see [`crate::config::DEFAULT_TIME_RANGE`])
    pub fn default_timed() -> Self {
        let (start, end) = crate::config::default_time_range();
        Schedule::Timed { start, end }
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        match self {
            Schedule::AllDay => None,
            Schedule::Timed{ start, .. } => Some(*start),
        }
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        match self {
            Schedule::AllDay => None,
            Schedule::Timed{ end, .. } => Some(*end),
        }
    }
}

impl Display for Schedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Schedule::AllDay => write!(f, "all day"),
            Schedule::Timed{ start, end } => write!(f, "{}–{}", format_time(*start), format_time(*end)),
        }
    }
}



/// Parse a calendar date.
///
/// Full datetimes (`2025-12-09T23:00:00.000Z`) are accepted, their time-of-day is ignored.
pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = s.trim();
    let date_part = trimmed
        .split(|c: char| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(s.to_string()))
}

/// Parse a `HH:MM` (or `HH:MM:SS`) clock time
pub fn parse_time(s: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime(s.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

impl FromStr for DateRange {
    type Err = ValidationError;

    /// Parses `YYYY-MM-DD` or `YYYY-MM-DD..YYYY-MM-DD`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once("..") {
            None => Ok(DateRange::single(parse_date(s)?)),
            Some((start, end)) => DateRange::new(parse_date(start)?, parse_date(end)?),
        }
    }
}
