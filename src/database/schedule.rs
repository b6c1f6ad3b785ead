use super::Database;
use crate::schedule::{Schedule, ScheduleType};
use poise::serenity_prelude::GuildId;
use sqlx::Error as SqlxError;

impl Database {
    /// Get all schedules from the database
    pub async fn get_all_schedules(&self) -> Result<Vec<Schedule>, SqlxError> {
        let rows: Vec<(i32, i64, ScheduleType, String, bool)> = sqlx::query_as(
            "SELECT id, guild_id, schedule_type, cron_expression, enabled \
             FROM schedules WHERE guild_id IS NOT NULL",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, guild_id, schedule_type, cron_expression, enabled)| Schedule {
                id,
                guild_id: GuildId::new(guild_id as u64),
                schedule_type,
                cron_expression,
                enabled,
            })
            .collect())
    }

    /// Create or update the schedule of a given type for a guild
    pub async fn upsert_schedule(
        &self,
        guild_id: GuildId,
        schedule_type: ScheduleType,
        cron_expression: &str,
        enabled: bool,
    ) -> Result<(), SqlxError> {
        let updated = sqlx::query(
            r#"
            UPDATE schedules
            SET cron_expression = $1, enabled = $2, updated_at = NOW()
            WHERE guild_id = $3 AND schedule_type = $4
            "#,
        )
        .bind(cron_expression)
        .bind(enabled)
        .bind(guild_id.get() as i64)
        .bind(&schedule_type)
        .execute(self.pool())
        .await?;

        if updated.rows_affected() == 0 {
            sqlx::query(
                r#"
                INSERT INTO schedules (guild_id, schedule_type, cron_expression, enabled)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(guild_id.get() as i64)
            .bind(schedule_type)
            .bind(cron_expression)
            .bind(enabled)
            .execute(self.pool())
            .await?;
        }

        Ok(())
    }

    /// Enable or disable a guild's schedule of a given type
    pub async fn set_schedule_enabled(
        &self,
        guild_id: GuildId,
        schedule_type: ScheduleType,
        enabled: bool,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            "UPDATE schedules SET enabled = $1, updated_at = NOW() \
             WHERE guild_id = $2 AND schedule_type = $3",
        )
        .bind(enabled)
        .bind(guild_id.get() as i64)
        .bind(schedule_type)
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
