//! What gets painted in every cell of a calendar view

use chrono::{Datelike, NaiveDate, Weekday};

use crate::schedule::{self, DayMarkers, Span};
use crate::todo::Todo;

/// A piece of a multi-day bar, as painted in one cell
#[derive(Clone, Debug, PartialEq)]
pub struct BarSegment<'a> {
    pub todo: &'a Todo,
    /// The bar has a rounded left end in this cell (the todo starts here)
    pub left_cap: bool,
    /// The bar has a rounded right end in this cell (the todo ends here)
    pub right_cap: bool,
    /// The title is repeated here: first cell of the bar, or first cell of a grid row
    pub show_title: bool,
    /// First cell of a grid row, the bar coming from the row above
    pub continued_from_previous_row: bool,
    /// Last cell of a grid row, the bar going on in the row below
    pub continues_on_next_row: bool,
}

/// One date of a view
#[derive(Clone, Debug)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// `false` for the padding days of a month grid
    pub in_period: bool,
    /// Todos that start and end on this date
    pub chips: Vec<&'a Todo>,
    /// Multi-day todos crossing this date
    pub bars: Vec<BarSegment<'a>>,
    pub markers: DayMarkers<'a>,
}

impl<'a> DayCell<'a> {
    pub fn build<I>(todos: I, date: NaiveDate, in_period: bool) -> Self
    where
        I: IntoIterator<Item = &'a Todo>,
    {
        let markers = DayMarkers::compute(todos, date);
        let row_start = date.weekday() == Weekday::Sun;
        let row_end = date.weekday() == Weekday::Sat;

        let mut chips = Vec::new();
        let mut bars = Vec::new();
        for todo in &markers.active {
            match schedule::span(todo) {
                Span::SingleDay => chips.push(*todo),
                Span::MultiDay => {
                    let starts_here = markers.starts_here.iter().any(|t| t.id() == todo.id());
                    let ends_here = markers.ends_here.iter().any(|t| t.id() == todo.id());
                    bars.push(BarSegment {
                        todo: *todo,
                        left_cap: starts_here,
                        right_cap: ends_here,
                        show_title: starts_here || row_start,
                        continued_from_previous_row: row_start && starts_here == false,
                        continues_on_next_row: row_end && ends_here == false,
                    });
                },
            }
        }

        Self { date, in_period, chips, bars, markers }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.active.is_empty()
    }

    /// Number of todos active on this date
    pub fn count(&self) -> usize {
        self.markers.active.len()
    }
}

/// Build one cell per date
pub fn build_cells<'a>(todos: &[&'a Todo], dates: &[NaiveDate], in_period: impl Fn(NaiveDate) -> bool) -> Vec<DayCell<'a>> {
    dates.iter()
        .map(|date| DayCell::build(todos.iter().copied(), *date, in_period(*date)))
        .collect()
}
