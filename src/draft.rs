//! Form state of the add and edit modals

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::item::{DateRange, Schedule};
use crate::todo::{Todo, TodoFields};

/// What the user is typing in an add or edit modal.
///
/// The end date can never be set earlier than the start date (it gets clamped).
/// Times are kept while the form is open even for all-day drafts, and dropped on [`TodoDraft::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct TodoDraft {
    title: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    all_day: bool,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    completed: bool,
}

impl TodoDraft {
    /// An empty all-day draft on `date`
    pub fn on(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            start_date: date,
            end_date: date,
            all_day: true,
            start_time: None,
            end_time: None,
            completed: false,
        }
    }

    /// A draft pre-filled with an existing todo
    pub fn from_todo(todo: &Todo) -> Self {
        let schedule = todo.schedule();
        Self {
            title: todo.title().to_string(),
            start_date: todo.start_date(),
            end_date: todo.end_date(),
            all_day: schedule.is_all_day(),
            start_time: schedule.start_time(),
            end_time: schedule.end_time(),
            completed: todo.completed(),
        }
    }

    pub fn title(&self) -> &str                  { &self.title }
    pub fn start_date(&self) -> NaiveDate        { self.start_date }
    pub fn end_date(&self) -> NaiveDate          { self.end_date }
    pub fn all_day(&self) -> bool                { self.all_day }
    pub fn start_time(&self) -> Option<NaiveTime> { self.start_time }
    pub fn end_time(&self) -> Option<NaiveTime>   { self.end_time }
    pub fn completed(&self) -> bool              { self.completed }

    pub fn set_title<S: ToString>(&mut self, title: S) {
        self.title = title.to_string();
    }

    /// Move the start date. The end date follows when it would become earlier.
    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;
        if self.end_date < date {
            self.end_date = date;
        }
    }

    /// Move the end date, never earlier than the start date
    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = date.max(self.start_date);
    }

    /// Switch between all-day and timed.
    ///
    /// Going back to timed restores the default time range when no time was set.
    pub fn set_all_day(&mut self, all_day: bool) {
        if self.all_day && all_day == false {
            let (default_start, default_end) = crate::config::default_time_range();
            self.start_time.get_or_insert(default_start);
            self.end_time.get_or_insert(default_end);
        }
        self.all_day = all_day;
    }

    pub fn set_start_time(&mut self, time: NaiveTime) {
        self.start_time = Some(time);
    }

    pub fn set_end_time(&mut self, time: NaiveTime) {
        self.end_time = Some(time);
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Check the form and produce the fields to save
    pub fn validate(&self) -> Result<TodoFields, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let dates = DateRange::new(self.start_date, self.end_date)?;
        let schedule = if self.all_day {
            Schedule::AllDay
        } else {
            let (default_start, default_end) = crate::config::default_time_range();
            Schedule::Timed {
                start: self.start_time.unwrap_or(default_start),
                end: self.end_time.unwrap_or(default_end),
            }
        };

        Ok(TodoFields {
            title: title.to_string(),
            dates,
            schedule,
            completed: self.completed,
        })
    }
}
