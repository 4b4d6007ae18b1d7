//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;
use chrono::NaiveTime;

/// The time range given to a todo when it stops being an all-day todo, or when a timed todo comes from the server without times.
/// Feel free to override it when initing this library.
pub static DEFAULT_TIME_RANGE: Lazy<Arc<Mutex<(NaiveTime, NaiveTime)>>> = Lazy::new(|| Arc::new(Mutex::new((
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
))));

/// Path of the todo collection on the REST server (items live at `<path>/<id>`).
/// Feel free to override it when initing this library.
pub static TODOS_PATH: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("/api/todos".to_string())));

/// Returns the current value of [`DEFAULT_TIME_RANGE`]
pub fn default_time_range() -> (NaiveTime, NaiveTime) {
    match DEFAULT_TIME_RANGE.lock() {
        Ok(range) => *range,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Returns the current value of [`TODOS_PATH`]
pub fn todos_path() -> String {
    match TODOS_PATH.lock() {
        Ok(path) => path.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}
