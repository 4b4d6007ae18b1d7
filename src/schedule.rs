//! Which todos are active on a date, and how a todo moves when it is dragged to another date
//!
//! Every comparison here is done on calendar dates only: time-of-day is stripped when todos are decoded.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::item::DateRange;
use crate::todo::Todo;

/// How a todo is painted on a calendar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    /// Starts and ends on the same date: a discrete chip
    SingleDay,
    /// Spans several dates: a continuous bar across cells
    MultiDay,
}

/// Whether `todo` is active on `date`, i.e. `start <= date <= end`
pub fn is_active_on(todo: &Todo, date: NaiveDate) -> bool {
    todo.dates().contains(date)
}

pub fn span(todo: &Todo) -> Span {
    if todo.dates().is_single_day() {
        Span::SingleDay
    } else {
        Span::MultiDay
    }
}

pub fn starts_on(todo: &Todo, date: NaiveDate) -> bool {
    todo.start_date() == date
}

pub fn ends_on(todo: &Todo, date: NaiveDate) -> bool {
    todo.end_date() == date
}

/// Todos active on a date
pub fn active_on<'a, I>(todos: I, date: NaiveDate) -> impl Iterator<Item = &'a Todo>
where
    I: IntoIterator<Item = &'a Todo>,
{
    todos.into_iter().filter(move |todo| is_active_on(todo, date))
}

/// Todos of a date, split by the way they are painted
pub fn split_by_span<'a, I>(todos: I) -> (Vec<&'a Todo>, Vec<&'a Todo>)
where
    I: IntoIterator<Item = &'a Todo>,
{
    todos.into_iter().partition(|todo| span(todo) == Span::SingleDay)
}


/// The todos that concern a single date of a weekly or monthly grid
#[derive(Clone, Debug, Default)]
pub struct DayMarkers<'a> {
    /// Todos active on this date
    pub active: Vec<&'a Todo>,
    /// Todos that start on this date (left caps of the bars)
    pub starts_here: Vec<&'a Todo>,
    /// Todos that end on this date (right caps of the bars)
    pub ends_here: Vec<&'a Todo>,
}

impl<'a> DayMarkers<'a> {
    pub fn compute<I>(todos: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a Todo>,
    {
        let mut markers = Self::default();
        for todo in todos.into_iter().filter(|todo| is_active_on(todo, date)) {
            if starts_on(todo, date) {
                markers.starts_here.push(todo);
            }
            if ends_on(todo, date) {
                markers.ends_here.push(todo);
            }
            markers.active.push(todo);
        }
        markers
    }
}


/// The new dates of `todo` once it has been dropped on `target`.
///
/// The duration of the todo is kept. Dropping a todo on its own start date changes nothing.
/// Fails when the new end date does not fit in the calendar.
pub fn reschedule(todo: &Todo, target: NaiveDate) -> Result<DateRange, ValidationError> {
    let original = todo.dates();
    if target == original.start() {
        return Ok(original);
    }
    original.starting_at(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{parse_date, Schedule, TodoId};
    use crate::todo::{TodoFields, TodoPatch};
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn todo(id: &str, start: &str, end: &str) -> Todo {
        Todo::new(TodoId::from(id), TodoFields {
            title: format!("Todo {}", id),
            dates: DateRange::new(date(start), date(end)).unwrap(),
            schedule: Schedule::AllDay,
            completed: false,
        })
    }

    #[test]
    fn active_on_inclusive_range() {
        let t = todo("a", "2025-12-09", "2025-12-11");
        for d in &["2025-12-09", "2025-12-10", "2025-12-11"] {
            assert!(is_active_on(&t, date(d)), "should be active on {}", d);
        }
        for d in &["2025-12-08", "2025-12-12"] {
            assert!(is_active_on(&t, date(d)) == false, "should not be active on {}", d);
        }
    }

    #[test]
    fn single_day_todos_are_never_bars() {
        let chip = todo("a", "2025-12-09", "2025-12-09");
        let bar = todo("b", "2025-12-08", "2025-12-09");
        assert_eq!(span(&chip), Span::SingleDay);
        assert_eq!(span(&bar), Span::MultiDay);

        let todos = vec![chip.clone(), bar.clone(), todo("c", "2025-12-10", "2025-12-10")];
        let (singles, multis) = split_by_span(active_on(&todos, date("2025-12-09")));
        assert_eq!(singles, vec![&chip]);
        assert_eq!(multis, vec![&bar]);
    }

    #[test]
    fn day_markers() {
        let todos = vec![
            todo("a", "2025-12-09", "2025-12-11"),
            todo("b", "2025-12-10", "2025-12-10"),
            todo("c", "2025-12-07", "2025-12-10"),
            todo("d", "2025-12-12", "2025-12-13"),
        ];
        let markers = DayMarkers::compute(&todos, date("2025-12-10"));
        let ids = |v: &Vec<&Todo>| v.iter().map(|t| t.id().as_str().to_string()).collect::<Vec<_>>();
        assert_eq!(ids(&markers.active), vec!["a", "b", "c"]);
        assert_eq!(ids(&markers.starts_here), vec!["b"]);
        assert_eq!(ids(&markers.ends_here), vec!["b", "c"]);
    }

    #[test]
    fn reschedule_keeps_duration() {
        let t = todo("a", "2025-12-09", "2025-12-11");
        let moved = reschedule(&t, date("2025-12-15")).unwrap();
        assert_eq!(moved.start(), date("2025-12-15"));
        assert_eq!(moved.end(), date("2025-12-17"));

        let backwards = reschedule(&t, date("2025-11-30")).unwrap();
        assert_eq!(backwards.end(), date("2025-12-02"));

        for target in &["2024-02-28", "2025-12-31", "2026-06-01"] {
            let r = reschedule(&t, date(target)).unwrap();
            assert_eq!(r.duration_days(), t.dates().duration_days());
        }
    }

    #[test]
    fn reschedule_to_same_start_is_a_noop() {
        let t = todo("a", "2025-12-09", "2025-12-11");
        assert_eq!(reschedule(&t, date("2025-12-09")), Ok(t.dates()));
    }

    #[test]
    fn single_day_reschedule_collapses() {
        let t = todo("a", "2025-12-09", "2025-12-09");
        let moved = reschedule(&t, date("2025-12-20")).unwrap();
        assert_eq!(moved, DateRange::single(date("2025-12-20")));
    }

    #[test]
    fn reschedule_beyond_the_calendar_fails() {
        let t = todo("a", "2025-12-09", "2025-12-11");
        assert_eq!(reschedule(&t, NaiveDate::MAX), Err(ValidationError::DateOutOfRange));
        assert_eq!(reschedule(&todo("b", "2025-12-09", "2025-12-09"), NaiveDate::MAX), Ok(DateRange::single(NaiveDate::MAX)));
    }

    fn day(offset: i64) -> NaiveDate {
        date("2000-01-01") + chrono::Duration::days(offset)
    }

    fn spanning(start: i64, length: i64) -> Todo {
        Todo::new(TodoId::from("p"), TodoFields {
            title: "p".to_string(),
            dates: DateRange::new(day(start), day(start + length)).unwrap(),
            schedule: Schedule::AllDay,
            completed: false,
        })
    }

    proptest! {
        #[test]
        fn prop_activity_is_the_inclusive_range(
            start in -40_000i64..40_000,
            length in 0i64..60,
            offset in -80i64..140,
        ) {
            let t = spanning(start, length);
            let d = day(start + offset);
            prop_assert_eq!(is_active_on(&t, d), 0 <= offset && offset <= length);
            prop_assert_eq!(span(&t) == Span::SingleDay, length == 0);
        }

        #[test]
        fn prop_reschedule_keeps_duration(
            start in -40_000i64..40_000,
            length in 0i64..60,
            target in -40_000i64..40_000,
        ) {
            let t = spanning(start, length);
            let moved = reschedule(&t, day(target)).unwrap();
            prop_assert_eq!(moved.start(), day(target));
            prop_assert_eq!(moved.duration_days(), t.dates().duration_days());
            prop_assert!(is_active_on(&t.merged(&TodoPatch::dates(moved)), day(target + length)));

            // dropping it back where it was restores the original dates
            let back = reschedule(&t.merged(&TodoPatch::dates(moved)), day(start)).unwrap();
            prop_assert_eq!(back, t.dates());
        }
    }
}
