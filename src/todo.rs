//! To-do items

use chrono::NaiveDate;

use crate::item::{DateRange, Schedule, TodoId};

/// The content of a todo, without its identifier.
///
/// This is what is sent to the server to create a todo, and what a validated form produces.
#[derive(Clone, Debug, PartialEq)]
pub struct TodoFields {
    pub title: String,
    pub dates: DateRange,
    pub schedule: Schedule,
    pub completed: bool,
}

/// A partial change to a todo. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub dates: Option<DateRange>,
    pub schedule: Option<Schedule>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self { completed: Some(completed), ..Self::default() }
    }

    pub fn dates(dates: DateRange) -> Self {
        Self { dates: Some(dates), ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.dates.is_none() && self.schedule.is_none() && self.completed.is_none()
    }
}

/// A to-do item
#[derive(Clone, Debug, PartialEq)]
pub struct Todo {
    /// Server-assigned identifier
    id: TodoId,
    /// The display text. Never empty
    title: String,
    /// The calendar dates this todo is active on
    dates: DateRange,
    /// All-day, or a time range within these dates
    schedule: Schedule,
    completed: bool,
}

impl Todo {
    /// Build a todo that has an identifier already
    pub fn new(id: TodoId, fields: TodoFields) -> Self {
        Self {
            id,
            title: fields.title,
            dates: fields.dates,
            schedule: fields.schedule,
            completed: fields.completed,
        }
    }

    pub fn id(&self) -> &TodoId           { &self.id }
    pub fn title(&self) -> &str           { &self.title }
    pub fn dates(&self) -> DateRange      { self.dates }
    pub fn start_date(&self) -> NaiveDate { self.dates.start() }
    pub fn end_date(&self) -> NaiveDate   { self.dates.end() }
    pub fn schedule(&self) -> Schedule    { self.schedule }
    pub fn all_day(&self) -> bool         { self.schedule.is_all_day() }
    pub fn completed(&self) -> bool       { self.completed }

    /// The fields of this todo, e.g. to pre-fill an edit form
    pub fn fields(&self) -> TodoFields {
        TodoFields {
            title: self.title.clone(),
            dates: self.dates,
            schedule: self.schedule,
            completed: self.completed,
        }
    }

    /// The full replacement of this todo once `patch` has been applied
    pub fn merged(&self, patch: &TodoPatch) -> Todo {
        Todo {
            id: self.id.clone(),
            title: patch.title.clone().unwrap_or_else(|| self.title.clone()),
            dates: patch.dates.unwrap_or(self.dates),
            schedule: patch.schedule.unwrap_or(self.schedule),
            completed: patch.completed.unwrap_or(self.completed),
        }
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::parse_date;

    fn sample() -> Todo {
        Todo::new(TodoId::from("t1"), TodoFields {
            title: "Renew passport".to_string(),
            dates: DateRange::new(parse_date("2025-12-09").unwrap(), parse_date("2025-12-11").unwrap()).unwrap(),
            schedule: Schedule::AllDay,
            completed: false,
        })
    }

    #[test]
    fn merged_only_touches_patched_fields() {
        let todo = sample();
        let merged = todo.merged(&TodoPatch::completed(true));
        assert!(merged.completed());
        assert_eq!(merged.title(), todo.title());
        assert_eq!(merged.dates(), todo.dates());
        assert_eq!(merged.id(), todo.id());

        let untouched = todo.merged(&TodoPatch::default());
        assert_eq!(untouched, todo);
        assert!(TodoPatch::default().is_empty());
    }
}
