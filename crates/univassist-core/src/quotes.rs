//! Quote of the day.

use chrono::{Datelike, NaiveDate};

/// `quotes[day_of_month % len]`, or `None` for an empty list.
pub fn quote_of_day(quotes: &[String], date: NaiveDate) -> Option<&str> {
    if quotes.is_empty() {
        return None;
    }
    let index = date.day() as usize % quotes.len();
    quotes.get(index).map(String::as_str)
}
