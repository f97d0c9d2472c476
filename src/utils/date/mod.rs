// Date utility functions
// Week/month arithmetic shared by the grid layouts and view ranges

use chrono::{Datelike, Duration, NaiveDate};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64).rem_euclid(7);
    date - Duration::days(offset)
}

/// Last day of the week that starts on `first_day_of_week` and contains `date`.
pub fn get_week_end(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    get_week_start(date, first_day_of_week) + Duration::days(6)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn get_days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let days = get_days_in_month(date.year(), date.month());
    date.with_day(days).unwrap_or(date)
}

/// First and last date shown by a month grid: whole weeks covering the month,
/// including leading/trailing days of the adjacent months.
pub fn month_grid_bounds(date: NaiveDate, first_day_of_week: u8) -> (NaiveDate, NaiveDate) {
    let start = get_week_start(first_of_month(date), first_day_of_week);
    let end = get_week_end(last_of_month(date), first_day_of_week);
    (start, end)
}

/// Inclusive iterator over consecutive dates.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
