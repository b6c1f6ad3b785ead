/// Birthday date engine: pure functions over records and an explicit `today`
mod calendar;
mod grouping;
mod occurrence;
mod record;

pub use calendar::{birthdays_on, month_calendar};
pub use grouping::{bucket, next_up, search, split_upcoming_by_year, NextUp};
pub use occurrence::{age_turning, days_until, next_occurrence, occurrence_in_year};
pub use record::{BirthdayRecord, Origin, RecordId};
