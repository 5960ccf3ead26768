//! Date helper functions

use chrono::{Datelike, NaiveDate};

/// Format a date in the long display format used across the site,
/// with an ordinal day: "January 1st, 2024"
pub fn long_date(date: &NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        day,
        ordinal_suffix(day),
        date.year()
    )
}

/// Machine-readable form for `<time datetime>` and the sitemap
pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// English ordinal suffix for a day of month
fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}
