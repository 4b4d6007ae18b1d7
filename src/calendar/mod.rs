//! Calendar views of the todo list (daily, weekly, monthly)
//!
//! Views never own todos: they are handed the shared list and derive what they paint from it.

pub mod cells;
pub mod view;

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bitflags::bitflags;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::todo::Todo;

/// The period a view shows at once
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Day => write!(f, "day"),
            Granularity::Week => write!(f, "week"),
            Granularity::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            other => Err(format!("unknown view {:?} (expected day, week or month)", other)),
        }
    }
}

bitflags! {
    /// Which todos a view lists, depending on their completion
    #[derive(Serialize, Deserialize)]
    pub struct CompletionFilter: u8 {
        /// Show the todos that are done
        const SHOW_COMPLETED = 1;
        /// Show the todos that are still to do
        const SHOW_INCOMPLETE = 2;
    }
}

impl Default for CompletionFilter {
    fn default() -> Self {
        Self::all()
    }
}

impl CompletionFilter {
    pub fn allows(&self, todo: &Todo) -> bool {
        if todo.completed() {
            self.contains(Self::SHOW_COMPLETED)
        } else {
            self.contains(Self::SHOW_INCOMPLETE)
        }
    }
}


/// The Sunday that starts the week of `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_sunday() as i64;
    date.checked_sub_signed(Duration::days(offset)).unwrap_or(NaiveDate::MIN)
}

/// Saturday of the week that starts on `first`
fn week_end(first: NaiveDate) -> NaiveDate {
    first.checked_add_signed(Duration::days(6)).unwrap_or(NaiveDate::MAX)
}

fn month_first(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Same day-of-month `months` months away, clamped to the length of the target month
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// The dates a view shows for a reference date.
///
/// * day: the reference date only
/// * week: Sunday to Saturday
/// * month: whole weeks, from the Sunday before the 1st to the Saturday after the last day
pub fn period_dates(granularity: Granularity, reference: NaiveDate) -> Vec<NaiveDate> {
    let (first, last) = match granularity {
        Granularity::Day => (reference, reference),
        Granularity::Week => {
            let first = week_start(reference);
            (first, week_end(first))
        },
        Granularity::Month => {
            let first_of_month = month_first(reference);
            let last_of_month = add_months(first_of_month, 1).pred_opt().unwrap_or(first_of_month);
            (week_start(first_of_month), week_end(week_start(last_of_month)))
        },
    };
    first.iter_days().take_while(|d| *d <= last).collect()
}

/// Whether `date` belongs to the period (and not to the padding of a month grid)
pub fn in_period(granularity: Granularity, reference: NaiveDate, date: NaiveDate) -> bool {
    match granularity {
        Granularity::Day => date == reference,
        Granularity::Week => week_start(date) == week_start(reference),
        Granularity::Month => date.year() == reference.year() && date.month() == reference.month(),
    }
}

/// The reference date `steps` periods away (negative steps go back in time)
pub fn shift(granularity: Granularity, reference: NaiveDate, steps: i32) -> NaiveDate {
    let shifted = match granularity {
        Granularity::Day => reference.checked_add_signed(Duration::days(steps as i64)),
        Granularity::Week => reference.checked_add_signed(Duration::weeks(steps as i64)),
        Granularity::Month => Some(add_months(reference, steps)),
    };
    shifted.unwrap_or_else(|| {
        log::warn!("Cannot move the {} view {} steps away from {}", granularity, steps, reference);
        reference
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::parse_date;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn weeks_start_on_sunday() {
        // 2025-12-10 is a Wednesday
        let dates = period_dates(Granularity::Week, date("2025-12-10"));
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[0], date("2025-12-07"));
        assert_eq!(dates[6], date("2025-12-13"));
        assert_eq!(week_start(date("2025-12-07")), date("2025-12-07"));
    }

    #[test]
    fn month_grid_is_made_of_whole_weeks() {
        let dates = period_dates(Granularity::Month, date("2025-12-10"));
        assert_eq!(dates.first(), Some(&date("2025-11-30")));
        assert_eq!(dates.last(), Some(&date("2026-01-03")));
        assert_eq!(dates.len() % 7, 0);
        assert!(in_period(Granularity::Month, date("2025-12-10"), date("2025-12-31")));
        assert!(in_period(Granularity::Month, date("2025-12-10"), date("2025-11-30")) == false);
    }

    #[test]
    fn day_period() {
        assert_eq!(period_dates(Granularity::Day, date("2025-12-10")), vec![date("2025-12-10")]);
    }

    #[test]
    fn navigation() {
        assert_eq!(shift(Granularity::Day, date("2025-12-31"), 1), date("2026-01-01"));
        assert_eq!(shift(Granularity::Week, date("2025-12-10"), -1), date("2025-12-03"));
        assert_eq!(shift(Granularity::Month, date("2026-01-31"), 1), date("2026-02-28"));
        assert_eq!(shift(Granularity::Month, date("2025-01-15"), -1), date("2024-12-15"));
        assert_eq!(shift(Granularity::Month, date("2024-03-31"), -1), date("2024-02-29"));
    }

    #[test]
    fn calendar_limits() {
        assert_eq!(shift(Granularity::Day, NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(shift(Granularity::Week, NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(shift(Granularity::Week, NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(shift(Granularity::Day, NaiveDate::MAX, -1), NaiveDate::MAX.pred_opt().unwrap());

        assert!(week_start(NaiveDate::MIN) <= NaiveDate::MIN);
        let last_week = period_dates(Granularity::Week, NaiveDate::MAX);
        assert!(last_week.is_empty() == false && last_week.len() <= 7);
        assert!(period_dates(Granularity::Month, NaiveDate::MIN).contains(&NaiveDate::MIN));
        assert!(in_period(Granularity::Week, NaiveDate::MIN, NaiveDate::MIN));
    }

    #[test]
    fn completion_filter() {
        use crate::item::{DateRange, Schedule};
        use crate::todo::TodoFields;

        let mut todo = Todo::new("a".into(), TodoFields {
            title: "a".to_string(),
            dates: DateRange::single(date("2025-12-10")),
            schedule: Schedule::AllDay,
            completed: false,
        });
        let only_done = CompletionFilter::SHOW_COMPLETED;
        assert!(CompletionFilter::default().allows(&todo));
        assert!(only_done.allows(&todo) == false);
        todo.set_completed(true);
        assert!(only_done.allows(&todo));
        assert!(CompletionFilter::empty().allows(&todo) == false);
    }

    #[test]
    fn granularity_from_str() {
        assert_eq!("Weekly".parse::<Granularity>(), Ok(Granularity::Week));
        assert!("year".parse::<Granularity>().is_err());
    }
}
