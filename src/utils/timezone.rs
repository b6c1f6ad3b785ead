use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

#[derive(Debug)]
pub enum TimezoneError {
    UnknownZone(String),
    BadClockTime(String),
}

impl std::fmt::Display for TimezoneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimezoneError::UnknownZone(name) => write!(f, "Invalid timezone: {}", name),
            TimezoneError::BadClockTime(given) => {
                write!(f, "Invalid time format: expected HH:MM, got '{}'", given)
            }
        }
    }
}

impl std::error::Error for TimezoneError {}

/// Resolve an IANA zone name such as `Europe/Paris`
pub fn parse_timezone(name: &str) -> Result<Tz, TimezoneError> {
    name.parse()
        .map_err(|_| TimezoneError::UnknownZone(name.to_string()))
}

/// Calendar date at `now` as seen in `timezone`
pub fn today_in(timezone: &Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(timezone).date_naive()
}

/// Daily cron expression for a wall-clock `HH:MM`.
///
/// The expression is in the guild's local time and must be evaluated with
/// [`next_fire_time`] in that zone, so it keeps firing at the same local hour
/// across DST changes.
pub fn daily_cron(clock: &str) -> Result<(String, NaiveTime), TimezoneError> {
    let time = NaiveTime::parse_from_str(clock.trim(), "%H:%M")
        .map_err(|_| TimezoneError::BadClockTime(clock.to_string()))?;

    Ok((format!("0 {} {} * * *", time.minute(), time.hour()), time))
}

/// First instant strictly after `after` at which a local-time cron fires in `timezone`.
///
/// Local times skipped by a DST jump have no occurrence that day.
pub fn next_fire_time(
    cron: &cron::Schedule,
    timezone: &Tz,
    after: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    cron.after(&after.with_timezone(timezone))
        .next()
        .map(|local| local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Paris").unwrap(), Tz::Europe__Paris);
        assert!(parse_timezone("UTC").is_ok());
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_daily_cron() {
        let (cron, time) = daily_cron("08:30").unwrap();
        assert_eq!(cron, "0 30 8 * * *");
        assert_eq!(time, NaiveTime::from_hms_opt(8, 30, 0).unwrap());

        assert_eq!(daily_cron(" 00:05 ").unwrap().0, "0 5 0 * * *");
        assert!(daily_cron("8am").is_err());
        assert!(daily_cron("24:00").is_err());
    }

    #[test]
    fn test_next_fire_time_keeps_local_hour_across_dst() {
        let (expr, _) = daily_cron("00:30").unwrap();
        let cron = cron::Schedule::from_str(&expr).unwrap();
        let paris = Tz::Europe__Paris;

        // CEST (UTC+2): 00:30 on July 2nd is 22:30 UTC on July 1st
        let summer = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(
            next_fire_time(&cron, &paris, summer),
            Some(Utc.with_ymd_and_hms(2025, 7, 1, 22, 30, 0).unwrap())
        );

        // CET (UTC+1): the same cron now fires an hour later in UTC
        let winter = Utc.with_ymd_and_hms(2025, 12, 14, 12, 0, 0).unwrap();
        let fired = next_fire_time(&cron, &paris, winter).unwrap();
        assert_eq!(fired, Utc.with_ymd_and_hms(2025, 12, 14, 23, 30, 0).unwrap());
        assert_eq!(fired.with_timezone(&paris).hour(), 0);
        assert_eq!(fired.with_timezone(&paris).minute(), 30);
    }

    #[test]
    fn test_next_fire_time_is_strictly_after() {
        let cron = cron::Schedule::from_str("0 0 8 * * *").unwrap();
        let at_eight = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();

        assert_eq!(
            next_fire_time(&cron, &Tz::UTC, at_eight),
            Some(Utc.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_today_in_follows_timezone() {
        // 23:30 UTC on March 9th is already March 10th in Tokyo
        let now = Utc.with_ymd_and_hms(2025, 3, 9, 23, 30, 0).unwrap();
        let tokyo = parse_timezone("Asia/Tokyo").unwrap();
        let new_york = parse_timezone("America/New_York").unwrap();

        assert_eq!(today_in(&tokyo, now), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(today_in(&new_york, now), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(today_in(&Tz::UTC, now), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }
}
