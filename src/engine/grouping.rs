/// Bucketing, ordering, next-up and search over birthday records
use chrono::{Datelike, NaiveDate};

use super::occurrence::{days_until, next_occurrence};
use super::record::BirthdayRecord;
use crate::constants::WEEK_WINDOW_DAYS;

/// Records grouped by how soon their birthday comes around
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Buckets<'a> {
    /// Birthdays falling on `today`
    pub today: Vec<&'a BirthdayRecord>,
    /// Birthdays in the next seven days
    pub week: Vec<&'a BirthdayRecord>,
    /// Everything further out
    pub upcoming: Vec<&'a BirthdayRecord>,
}

/// The upcoming bucket split by calendar year of the occurrence
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UpcomingSplit<'a> {
    pub this_year: Vec<&'a BirthdayRecord>,
    pub next_year: Vec<&'a BirthdayRecord>,
}

/// The soonest birthday date and everyone who shares it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextUp {
    pub days: i64,
    pub month: u32,
    pub day: u32,
    pub year: i32,
    pub names: Vec<String>,
}

impl NextUp {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// Stable sort by days until the birthday, ties broken by case-insensitive name
fn sort_by_soonest(records: &mut [&BirthdayRecord], today: NaiveDate) {
    records.sort_by_cached_key(|record| {
        (days_until(record.month, record.day, today), record.sort_name())
    });
}

/// Partition records into today / this week / coming up
pub fn bucket(records: &[BirthdayRecord], today: NaiveDate) -> Buckets<'_> {
    let mut buckets = Buckets::default();

    for record in records {
        match days_until(record.month, record.day, today) {
            0 => buckets.today.push(record),
            d if d <= WEEK_WINDOW_DAYS => buckets.week.push(record),
            _ => buckets.upcoming.push(record),
        }
    }

    sort_by_soonest(&mut buckets.today, today);
    sort_by_soonest(&mut buckets.week, today);
    sort_by_soonest(&mut buckets.upcoming, today);

    buckets
}

/// Split the upcoming bucket into this year and next year, keeping its order
pub fn split_upcoming_by_year<'a>(
    upcoming: &[&'a BirthdayRecord],
    today: NaiveDate,
) -> UpcomingSplit<'a> {
    let (this_year, next_year) = upcoming.iter().copied().partition(|record| {
        next_occurrence(record.month, record.day, today).year() == today.year()
    });

    UpcomingSplit {
        this_year,
        next_year,
    }
}

/// Soonest birthday across all records, with every tied name
pub fn next_up(records: &[BirthdayRecord], today: NaiveDate) -> Option<NextUp> {
    let min_days = records
        .iter()
        .map(|record| days_until(record.month, record.day, today))
        .min()?;

    let tied: Vec<&BirthdayRecord> = records
        .iter()
        .filter(|record| days_until(record.month, record.day, today) == min_days)
        .collect();

    // Every tied record shares the same occurrence date
    let sample = tied.first()?;
    let date = next_occurrence(sample.month, sample.day, today);

    let mut names: Vec<String> = tied.iter().map(|record| record.full_name.clone()).collect();
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });

    Some(NextUp {
        days: min_days,
        month: date.month(),
        day: date.day(),
        year: date.year(),
        names,
    })
}

/// Case-insensitive name search, soonest first
///
/// An empty query means no active search and matches nothing.
pub fn search<'a>(
    records: &'a [BirthdayRecord],
    query: &str,
    today: NaiveDate,
) -> Vec<&'a BirthdayRecord> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    let mut matches: Vec<&BirthdayRecord> = records
        .iter()
        .filter(|record| record.sort_name().contains(&needle))
        .collect();

    sort_by_soonest(&mut matches, today);
    matches
}
