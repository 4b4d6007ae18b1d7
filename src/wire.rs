//! JSON records exchanged with the REST server, and their conversion into [`Todo`]s
//!
//! Server data is decoded once, here. Anything that does not make a valid todo is rejected explicitly.

use std::convert::TryFrom;
use std::error::Error;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::item::{format_date, format_time, parse_date, parse_time, DateRange, Schedule, TodoId};
use crate::todo::{Todo, TodoFields};

/// Identifiers are strings, but some backends send numbers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl From<RecordId> for TodoId {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Text(s) => TodoId::from(s),
            RecordId::Number(n) => TodoId::from(n.to_string()),
        }
    }
}

/// A todo, as the server sends and receives it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<&TodoFields> for TodoRecord {
    fn from(fields: &TodoFields) -> Self {
        Self {
            id: None,
            title: Some(fields.title.clone()),
            start_date: Some(format_date(fields.dates.start())),
            end_date: Some(format_date(fields.dates.end())),
            all_day: Some(fields.schedule.is_all_day()),
            start_time: fields.schedule.start_time().map(format_time),
            end_time: fields.schedule.end_time().map(format_time),
            completed: Some(fields.completed),
        }
    }
}

impl From<&Todo> for TodoRecord {
    fn from(todo: &Todo) -> Self {
        Self {
            id: Some(RecordId::Text(todo.id().as_str().to_string())),
            ..Self::from(&todo.fields())
        }
    }
}

impl TryFrom<TodoRecord> for TodoFields {
    type Error = ValidationError;

    /// * a blank title, a missing or malformed date, an end before the start are rejected
    /// * `allDay` defaults to `true`; times of an all-day todo are ignored
    /// * a timed todo without (valid) times gets the default time range
    fn try_from(record: TodoRecord) -> Result<Self, Self::Error> {
        let title = record.title
            .map(|t| t.trim().to_string())
            .filter(|t| t.is_empty() == false)
            .ok_or(ValidationError::EmptyTitle)?;

        let start = parse_date(record.start_date.as_deref().ok_or(ValidationError::MissingField("startDate"))?)?;
        let end = match record.end_date.as_deref() {
            None => start,
            Some(end) => parse_date(end)?,
        };
        let dates = DateRange::new(start, end)?;

        let schedule = if record.all_day.unwrap_or(true) {
            Schedule::AllDay
        } else {
            let (default_start, default_end) = crate::config::default_time_range();
            let start_time = decode_time(record.start_time.as_deref()).unwrap_or(default_start);
            let end_time = decode_time(record.end_time.as_deref()).unwrap_or(default_end);
            Schedule::Timed { start: start_time, end: end_time }
        };

        Ok(TodoFields {
            title,
            dates,
            schedule,
            completed: record.completed.unwrap_or(false),
        })
    }
}

fn decode_time(value: Option<&str>) -> Option<NaiveTime> {
    let value = value?;
    match parse_time(value) {
        Ok(t) => Some(t),
        Err(err) => {
            log::warn!("Ignoring a malformed time ({}), using the default one", err);
            None
        },
    }
}

impl TryFrom<TodoRecord> for Todo {
    type Error = ValidationError;

    fn try_from(mut record: TodoRecord) -> Result<Self, Self::Error> {
        let id = record.id.take().ok_or(ValidationError::MissingField("id"))?;
        let fields = TodoFields::try_from(record)?;
        Ok(Todo::new(TodoId::from(id), fields))
    }
}

/// Decode one JSON value of a list into a [`Todo`]
///
/// A record carrying both `id` and `_id` keeps `id`.
pub fn decode_value(mut value: serde_json::Value) -> Result<Todo, Box<dyn Error>> {
    if let Some(object) = value.as_object_mut() {
        if object.contains_key("id") {
            object.remove("_id");
        }
    }
    let record: TodoRecord = serde_json::from_value(value)?;
    Ok(Todo::try_from(record)?)
}

/// Decode a list of records, skipping (and logging) the invalid ones
///
/// Every value is decoded on its own, so that a mistyped field only discards its own record.
pub fn decode_list(values: Vec<serde_json::Value>) -> Vec<Todo> {
    let mut todos = Vec::with_capacity(values.len());
    for value in values {
        let display_id = value.get("id").or_else(|| value.get("_id")).cloned().unwrap_or(serde_json::Value::Null);
        match decode_value(value) {
            Ok(todo) => todos.push(todo),
            Err(err) => {
                log::warn!("Todo {} is invalid ({}). Ignoring it.", display_id, err);
            },
        }
    }
    todos
}
