/// Calendar index of birthdays keyed by month and day
use std::collections::BTreeMap;

use super::record::BirthdayRecord;

/// A year-less calendar key, ordered January 1st first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    pub fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    pub fn of(record: &BirthdayRecord) -> Self {
        Self::new(record.month, record.day)
    }
}

/// Names of everyone celebrating on each day, each list sorted
pub fn events_by_day(records: &[BirthdayRecord]) -> BTreeMap<MonthDay, Vec<String>> {
    let mut events: BTreeMap<MonthDay, Vec<String>> = BTreeMap::new();

    for record in records {
        events
            .entry(MonthDay::of(record))
            .or_default()
            .push(record.full_name.clone());
    }

    for names in events.values_mut() {
        names.sort_by_key(|name| name.to_lowercase());
    }

    events
}

/// Records stored under exactly this `(month, day)`, sorted by name
pub fn birthdays_on(records: &[BirthdayRecord], month: u32, day: u32) -> Vec<&BirthdayRecord> {
    let key = MonthDay::new(month, day);
    let mut matches: Vec<&BirthdayRecord> = records
        .iter()
        .filter(|record| MonthDay::of(record) == key)
        .collect();

    matches.sort_by_cached_key(|record| record.sort_name());
    matches
}

/// Days of `month` that have at least one birthday, in day order
pub fn month_calendar(records: &[BirthdayRecord], month: u32) -> Vec<(u32, Vec<String>)> {
    events_by_day(records)
        .into_iter()
        .filter(|(key, _)| key.month == month)
        .map(|(key, names)| (key.day, names))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<BirthdayRecord> {
        vec![
            BirthdayRecord::manual(1, "zoe", 2, 29, None),
            BirthdayRecord::manual(2, "Ana", 3, 10, None),
            BirthdayRecord::contact(3, "Mia", 3, 10, Some(1999)),
            BirthdayRecord::manual(4, "Ben", 2, 28, None),
            BirthdayRecord::manual(5, "Carl", 3, 2, None),
        ]
    }

    #[test]
    fn test_events_by_day_groups_and_sorts() {
        let events = events_by_day(&records());

        assert_eq!(events.len(), 4);
        assert_eq!(events[&MonthDay::new(3, 10)], vec!["Ana", "Mia"]);
        assert_eq!(events[&MonthDay::new(2, 29)], vec!["zoe"]);
    }

    #[test]
    fn test_events_by_day_lists_each_record_once() {
        let records = records();
        let total: usize = events_by_day(&records).values().map(Vec::len).sum();
        assert_eq!(total, records.len());
    }

    #[test]
    fn test_events_by_day_keys_are_in_calendar_order() {
        let keys: Vec<MonthDay> = events_by_day(&records()).into_keys().collect();
        assert_eq!(
            keys,
            vec![
                MonthDay::new(2, 28),
                MonthDay::new(2, 29),
                MonthDay::new(3, 2),
                MonthDay::new(3, 10),
            ]
        );
    }

    #[test]
    fn test_birthdays_on_keeps_leap_day_separate() {
        let records = records();
        let feb_28: Vec<&str> = birthdays_on(&records, 2, 28)
            .iter()
            .map(|r| r.full_name.as_str())
            .collect();

        assert_eq!(feb_28, vec!["Ben"]);
        assert!(birthdays_on(&records, 7, 4).is_empty());
    }

    #[test]
    fn test_month_calendar() {
        let march = month_calendar(&records(), 3);

        assert_eq!(
            march,
            vec![
                (2, vec!["Carl".to_string()]),
                (10, vec!["Ana".to_string(), "Mia".to_string()]),
            ]
        );
        assert!(month_calendar(&records(), 8).is_empty());
    }
}
