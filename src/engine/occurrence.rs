/// Next-occurrence, countdown and age calculations
use chrono::{Datelike, Months, NaiveDate};

/// Last valid day of `month` in `year`
fn last_day_of_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// The date a `(month, day)` birthday falls on in `year`
///
/// Days past the end of the month are clamped to its last day, so Feb 29
/// lands on Feb 28 in non-leap years.
pub fn occurrence_in_year(year: i32, month: u32, day: u32) -> NaiveDate {
    let month = month.clamp(1, 12);
    let day = day.clamp(1, last_day_of_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

/// Soonest occurrence on or after `today`
///
/// A birthday falling on `today` is due today and is not rolled forward.
pub fn next_occurrence(month: u32, day: u32, today: NaiveDate) -> NaiveDate {
    let candidate = occurrence_in_year(today.year(), month, day);

    if candidate < today {
        occurrence_in_year(today.year() + 1, month, day)
    } else {
        candidate
    }
}

/// Whole days from `today` until the next occurrence
pub fn days_until(month: u32, day: u32, today: NaiveDate) -> i64 {
    (next_occurrence(month, day, today) - today).num_days().max(0)
}

/// Age the person turns on their next occurrence, if the birth year is known
pub fn age_turning(year: Option<i32>, month: u32, day: u32, today: NaiveDate) -> Option<i32> {
    year.map(|birth_year| next_occurrence(month, day, today).year() - birth_year)
}
