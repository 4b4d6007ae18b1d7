//! Some utility functions

use chrono::{Datelike, NaiveDate};

use crate::calendar::cells::DayCell;
use crate::calendar::view::CalendarView;
use crate::calendar::Granularity;
use crate::item::Schedule;
use crate::todo::Todo;

/// One line describing a todo
pub fn format_todo(todo: &Todo) -> String {
    let completion = if todo.completed() { "✓" } else { " " };
    let when = match todo.schedule() {
        Schedule::AllDay => todo.dates().to_string(),
        timed => format!("{} {}", todo.dates(), timed),
    };
    format!("[{}] {}\t{}\t({})", completion, todo.title(), when, todo.id())
}

/// A debug utility that pretty-prints todos
pub fn print_todo(todo: &Todo) {
    println!("    {}", format_todo(todo));
}

fn print_cell(cell: &DayCell) {
    let marker = if cell.in_period { "" } else { " (outside)" };
    println!("{} {}{}", cell.date.weekday(), cell.date, marker);
    for bar in &cell.bars {
        let left = match (bar.left_cap, bar.continued_from_previous_row) {
            (true, _) => "[",
            (false, true) => "<<",
            (false, false) => "<",
        };
        let right = match (bar.right_cap, bar.continues_on_next_row) {
            (true, _) => "]",
            (false, true) => ">>",
            (false, false) => ">",
        };
        let title = if bar.show_title { bar.todo.title() } else { "" };
        println!("    {}={}={} {}", left, title, right, bar.todo.id());
    }
    for chip in &cell.chips {
        print_todo(chip);
    }
}

/// Pretty-prints what a view shows
pub fn print_view(view: &CalendarView, todos: &[Todo]) {
    let cells = view.cells(todos);
    match view.granularity() {
        Granularity::Day => println!("---- {} ----", view.selected_date()),
        Granularity::Week => println!("---- Week of {} ----", crate::calendar::week_start(view.selected_date())),
        Granularity::Month => println!("---- {} ----", view.selected_date().format("%B %Y")),
    }
    for cell in cells.iter().filter(|c| c.is_empty() == false || view.granularity() == Granularity::Day) {
        print_cell(cell);
    }
    if cells.iter().all(|c| c.is_empty()) {
        println!("    (nothing to do)");
    }
}

/// Month grid with the number of todos per day
pub fn print_month_grid(view: &CalendarView, todos: &[Todo]) {
    println!("  Su  Mo  Tu  We  Th  Fr  Sa");
    for week in view.cells(todos).chunks(7) {
        let line: Vec<String> = week.iter()
            .map(|cell| match (cell.in_period, cell.count()) {
                (false, _) => "   .".to_string(),
                (true, 0) => format!("{:>4}", cell.date.day()),
                (true, n) => format!("{:>3}{}", cell.date.day(), if n > 9 { '+' } else { std::char::from_digit(n as u32, 10).unwrap_or('+') }),
            })
            .collect();
        println!("{}", line.join(""));
    }
}

/// Today, in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
