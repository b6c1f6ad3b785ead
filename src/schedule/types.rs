use poise::serenity_prelude::GuildId;

/// Type of scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "schedule_type", rename_all = "lowercase")]
pub enum ScheduleType {
    Digest,
}

/// A scheduled task configuration
#[derive(Debug, Clone)]
pub struct Schedule {
    pub id: i32,
    pub guild_id: GuildId,
    pub schedule_type: ScheduleType,
    pub cron_expression: String, // guild local time, e.g. "0 0 8 * * *" for 08:00 daily
    pub enabled: bool,
}
