use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use poise::serenity_prelude as serenity;
use std::str::FromStr;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

use super::digest_tasks::run_daily_digest;
use super::{Schedule, ScheduleType};
use crate::models::{Data, Error};
use crate::utils::timezone::next_fire_time;

/// Schedules that fire together at one instant
#[derive(Debug)]
struct Batch {
    fire_at: DateTime<Utc>,
    due: Vec<Schedule>,
}

/// Start the schedule manager that monitors and runs scheduled tasks
pub fn start_schedule_manager(http: Arc<serenity::Http>, data: Arc<Data>) {
    tokio::spawn(async move {
        info!("Schedule manager started");

        let mut reload_rx = data.schedule_reload_tx.subscribe();
        // Fire times are searched strictly after this instant
        let mut cursor = Utc::now();

        loop {
            let schedules = match data.db.get_all_schedules().await {
                Ok(schedules) => schedules,
                Err(e) => {
                    error!("Failed to load schedules from database: {}", e);
                    sleep(Duration::from_secs(60)).await; // Retry in 1 minute
                    continue;
                }
            };

            let mut zoned = Vec::with_capacity(schedules.len());
            for schedule in schedules.into_iter().filter(|s| s.enabled) {
                let tz = data.guild_timezone(schedule.guild_id).await;
                zoned.push((schedule, tz));
            }

            match next_batch(&zoned, cursor) {
                Some(batch) => {
                    let wait_duration = (batch.fire_at - Utc::now())
                        .to_std()
                        .unwrap_or(Duration::ZERO);
                    info!(
                        "Next run at {} for schedule(s) {:?}, in {} minutes",
                        batch.fire_at,
                        batch.due.iter().map(|s| s.id).collect::<Vec<_>>(),
                        wait_duration.as_secs() / 60
                    );

                    // Wait until it's time to run OR until we get a reload signal
                    tokio::select! {
                        _ = sleep(wait_duration) => {
                            for schedule in &batch.due {
                                if let Err(e) = run_schedule(&http, &data, schedule).await {
                                    error!(
                                        "Failed to run {:?} schedule {} for guild {}: {}",
                                        schedule.schedule_type, schedule.id, schedule.guild_id, e
                                    );
                                }
                            }
                            cursor = batch.fire_at;
                        }
                        changed = reload_rx.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            info!("Schedule reload signal received, reconfiguring schedules");
                            cursor = Utc::now();
                        }
                    }
                }
                None => {
                    info!("No active schedules, waiting for configuration...");
                    if reload_rx.changed().await.is_err() {
                        // Sender dropped, the bot is shutting down
                        break;
                    }
                    info!("Schedule reload signal received, reloading schedules");
                    cursor = Utc::now();
                }
            }
        }

        info!("Schedule manager stopped");
    });
}

/// Earliest instant after `after` at which an enabled schedule fires, with every
/// schedule due at that instant. Crons are read in the paired guild timezone.
fn next_batch(schedules: &[(Schedule, Tz)], after: DateTime<Utc>) -> Option<Batch> {
    let upcoming: Vec<(DateTime<Utc>, &Schedule)> = schedules
        .iter()
        .filter(|(s, _)| s.enabled)
        .filter_map(|(schedule, tz)| {
            let cron_schedule = cron::Schedule::from_str(&schedule.cron_expression)
                .map_err(|e| {
                    error!(
                        "Invalid cron expression '{}' for schedule {} (guild {}): {}",
                        schedule.cron_expression, schedule.id, schedule.guild_id, e
                    );
                    e
                })
                .ok()?;

            let fire_at = next_fire_time(&cron_schedule, tz, after).or_else(|| {
                warn!(
                    "No upcoming time found for schedule {} with cron '{}'",
                    schedule.id, schedule.cron_expression
                );
                None
            })?;

            Some((fire_at, schedule))
        })
        .collect();

    let fire_at = upcoming.iter().map(|(at, _)| *at).min()?;
    let due = upcoming
        .into_iter()
        .filter(|(at, _)| *at == fire_at)
        .map(|(_, schedule)| schedule.clone())
        .collect();

    Some(Batch { fire_at, due })
}

/// Run a scheduled task based on its type
async fn run_schedule(
    http: &Arc<serenity::Http>,
    data: &Data,
    schedule: &Schedule,
) -> Result<(), Error> {
    match schedule.schedule_type {
        ScheduleType::Digest => run_daily_digest(http, data, schedule.guild_id).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use poise::serenity_prelude::GuildId;

    fn schedule(id: i32, cron_expression: &str, enabled: bool, tz: Tz) -> (Schedule, Tz) {
        (
            Schedule {
                id,
                guild_id: GuildId::new(100 + id as u64),
                schedule_type: ScheduleType::Digest,
                cron_expression: cron_expression.to_string(),
                enabled,
            },
            tz,
        )
    }

    fn ids(batch: &Batch) -> Vec<i32> {
        batch.due.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_next_batch_picks_earliest() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 7, 0, 0).unwrap();
        let schedules = vec![
            schedule(1, "0 0 9 * * *", true, Tz::UTC),
            schedule(2, "0 30 7 * * *", true, Tz::UTC),
        ];

        let batch = next_batch(&schedules, now).unwrap();
        assert_eq!(batch.fire_at, Utc.with_ymd_and_hms(2025, 3, 10, 7, 30, 0).unwrap());
        assert_eq!(ids(&batch), vec![2]);
    }

    #[test]
    fn test_next_batch_runs_every_schedule_sharing_a_time() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 7, 0, 0).unwrap();
        let schedules = vec![
            schedule(1, "0 0 8 * * *", true, Tz::UTC),
            schedule(2, "0 0 8 * * *", true, Tz::UTC),
            schedule(3, "0 0 9 * * *", true, Tz::UTC),
        ];

        let batch = next_batch(&schedules, now).unwrap();
        assert_eq!(batch.fire_at, Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap());
        assert_eq!(ids(&batch), vec![1, 2]);

        // Once the 08:00 batch has run, the next one is the 09:00 schedule, then both again tomorrow
        let batch = next_batch(&schedules, batch.fire_at).unwrap();
        assert_eq!(ids(&batch), vec![3]);
        let batch = next_batch(&schedules, batch.fire_at).unwrap();
        assert_eq!(batch.fire_at, Utc.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap());
        assert_eq!(ids(&batch), vec![1, 2]);
    }

    #[test]
    fn test_next_batch_reads_cron_in_guild_timezone() {
        // Same local 08:00 in Paris and in UTC lands an hour apart in winter
        let now = Utc.with_ymd_and_hms(2025, 12, 14, 0, 0, 0).unwrap();
        let schedules = vec![
            schedule(1, "0 0 8 * * *", true, Tz::UTC),
            schedule(2, "0 0 8 * * *", true, Tz::Europe__Paris),
        ];

        let batch = next_batch(&schedules, now).unwrap();
        assert_eq!(batch.fire_at, Utc.with_ymd_and_hms(2025, 12, 14, 7, 0, 0).unwrap());
        assert_eq!(ids(&batch), vec![2]);

        // 00:30 Paris fires at 22:30 UTC in summer and 23:30 UTC in winter
        let late = vec![schedule(3, "0 30 0 * * *", true, Tz::Europe__Paris)];
        let summer = next_batch(&late, Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap()).unwrap();
        assert_eq!(summer.fire_at, Utc.with_ymd_and_hms(2025, 7, 1, 22, 30, 0).unwrap());
        let winter = next_batch(&late, Utc.with_ymd_and_hms(2025, 12, 14, 12, 0, 0).unwrap()).unwrap();
        assert_eq!(winter.fire_at, Utc.with_ymd_and_hms(2025, 12, 14, 23, 30, 0).unwrap());
    }

    #[test]
    fn test_next_batch_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        let schedules = vec![schedule(1, "0 0 8 * * *", true, Tz::UTC)];

        let batch = next_batch(&schedules, now).unwrap();
        assert_eq!(batch.fire_at, Utc.with_ymd_and_hms(2025, 3, 11, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_next_batch_skips_disabled_and_invalid() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 7, 0, 0).unwrap();
        let schedules = vec![
            schedule(1, "0 0 8 * * *", false, Tz::UTC),
            schedule(2, "not a cron", true, Tz::UTC),
        ];

        assert!(next_batch(&schedules, now).is_none());
        assert!(next_batch(&[], now).is_none());
    }
}
