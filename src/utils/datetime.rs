/// Pure date display helpers (Discord-agnostic)
use chrono::{Datelike, NaiveDate};

use crate::engine::occurrence_in_year;

/// Leap year used to format year-less dates so Feb 29 stays displayable
const REFERENCE_LEAP_YEAR: i32 = 2000;

/// Validate if a month/day combination is valid
pub fn is_valid_date(month: i32, day: i32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }

    let max_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 29, // Allow Feb 29 for leap years
        _ => return false,
    };

    (1..=max_day).contains(&day)
}

/// Check if a specific date exists (considering leap years)
pub fn date_exists(year: i32, month: i32, day: i32) -> bool {
    if month < 1 || day < 1 {
        return false;
    }
    NaiveDate::from_ymd_opt(year, month as u32, day as u32).is_some()
}

/// Get month name from month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

/// Format a year-less birthday as "Mar 10"
pub fn format_month_day(month: u32, day: u32) -> String {
    occurrence_in_year(REFERENCE_LEAP_YEAR, month, day)
        .format("%b %-d")
        .to_string()
}

/// Format an occurrence as "Mon, Mar 10", adding the year when it is not the current one
pub fn format_weekday_month_day(date: NaiveDate, current_year: i32) -> String {
    let text = date.format("%a, %b %-d").to_string();
    if date.year() == current_year {
        text
    } else {
        format!("{} {}", text, date.year())
    }
}

/// Human countdown to a birthday
pub fn countdown_string(days: i64) -> String {
    match days {
        0 => "Today 🎉".to_string(),
        1 => "in 1 day".to_string(),
        d => format!("in {} days", d),
    }
}

/// Western zodiac sign for a birthday
pub fn zodiac_sign(month: u32, day: u32) -> &'static str {
    match (month, day) {
        (3, 21..=31) | (4, 1..=19) => "♈ Aries",
        (4, 20..=30) | (5, 1..=20) => "♉ Taurus",
        (5, 21..=31) | (6, 1..=20) => "♊ Gemini",
        (6, 21..=30) | (7, 1..=22) => "♋ Cancer",
        (7, 23..=31) | (8, 1..=22) => "♌ Leo",
        (8, 23..=31) | (9, 1..=22) => "♍ Virgo",
        (9, 23..=30) | (10, 1..=22) => "♎ Libra",
        (10, 23..=31) | (11, 1..=21) => "♏ Scorpio",
        (11, 22..=30) | (12, 1..=21) => "♐ Sagittarius",
        (12, 22..=31) | (1, 1..=19) => "♑ Capricorn",
        (1, 20..=31) | (2, 1..=18) => "♒ Aquarius",
        _ => "♓ Pisces",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_is_valid_date() {
        // Valid dates
        assert!(is_valid_date(1, 31));
        assert!(is_valid_date(2, 29)); // Leap day allowed
        assert!(is_valid_date(4, 30));
        assert!(is_valid_date(12, 31));

        // Invalid dates
        assert!(!is_valid_date(0, 15));
        assert!(!is_valid_date(13, 15));
        assert!(!is_valid_date(2, 30));
        assert!(!is_valid_date(4, 31));
        assert!(!is_valid_date(6, 0));
        assert!(!is_valid_date(6, 32));
    }

    #[test]
    fn test_date_exists() {
        assert!(date_exists(2024, 2, 29)); // Leap year
        assert!(date_exists(2025, 1, 31));

        assert!(!date_exists(2023, 2, 29)); // Not a leap year
        assert!(!date_exists(2025, 4, 31));
        assert!(!date_exists(2025, -1, 10));
    }

    #[test]
    fn test_get_month_name() {
        assert_eq!(get_month_name(1), "January");
        assert_eq!(get_month_name(12), "December");
        assert_eq!(get_month_name(0), "Unknown");
        assert_eq!(get_month_name(13), "Unknown");
    }

    #[test]
    fn test_format_month_day() {
        assert_eq!(format_month_day(3, 10), "Mar 10");
        assert_eq!(format_month_day(2, 29), "Feb 29");
        assert_eq!(format_month_day(12, 1), "Dec 1");
    }

    #[test]
    fn test_format_weekday_month_day() {
        assert_eq!(format_weekday_month_day(date(2025, 3, 10), 2025), "Mon, Mar 10");
        assert_eq!(format_weekday_month_day(date(2026, 1, 1), 2025), "Thu, Jan 1 2026");
    }

    #[test]
    fn test_countdown_string() {
        assert_eq!(countdown_string(0), "Today 🎉");
        assert_eq!(countdown_string(1), "in 1 day");
        assert_eq!(countdown_string(12), "in 12 days");
    }

    #[test]
    fn test_zodiac_sign_boundaries() {
        assert_eq!(zodiac_sign(3, 21), "♈ Aries");
        assert_eq!(zodiac_sign(3, 20), "♓ Pisces");
        assert_eq!(zodiac_sign(12, 31), "♑ Capricorn");
        assert_eq!(zodiac_sign(1, 20), "♒ Aquarius");
        assert_eq!(zodiac_sign(2, 29), "♓ Pisces");
    }
}
