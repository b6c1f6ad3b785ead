use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;
use poise::serenity_prelude::GuildId;
use tokio::sync::watch;
use tracing::warn;

use crate::database::Database;
use crate::utils::timezone::{parse_timezone, today_in};

/// Bot state shared across all commands and the scheduler
#[derive(Clone)]
pub struct Data {
    /// Database connection
    pub db: Database,
    /// Bumped whenever schedules change so the schedule manager reloads
    pub schedule_reload_tx: Arc<watch::Sender<u64>>,
    /// Parsed timezone per guild
    pub timezones: Arc<DashMap<GuildId, Tz>>,
}

impl Data {
    pub fn new(db: Database) -> Self {
        let (schedule_reload_tx, _) = watch::channel(0);
        Self {
            db,
            schedule_reload_tx: Arc::new(schedule_reload_tx),
            timezones: Arc::new(DashMap::new()),
        }
    }

    /// Wake the schedule manager so it picks up configuration changes
    pub fn reload_schedules(&self) {
        self.schedule_reload_tx.send_modify(|v| *v += 1);
    }

    /// The guild's configured timezone, UTC when unset or unreadable
    pub async fn guild_timezone(&self, guild_id: GuildId) -> Tz {
        if let Some(tz) = self.timezones.get(&guild_id) {
            return *tz;
        }

        let tz = match self.db.get_guild_timezone(guild_id).await {
            Ok(name) => parse_timezone(&name).unwrap_or_else(|e| {
                warn!("Guild {} has an unusable timezone: {}", guild_id, e);
                Tz::UTC
            }),
            Err(e) => {
                // Not cached, so the next call retries the database
                warn!("Failed to load timezone for guild {}: {}", guild_id, e);
                return Tz::UTC;
            }
        };

        self.timezones.insert(guild_id, tz);
        tz
    }

    /// Today's date in the guild's timezone
    pub async fn today_for(&self, guild_id: GuildId) -> NaiveDate {
        today_in(&self.guild_timezone(guild_id).await, Utc::now())
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
