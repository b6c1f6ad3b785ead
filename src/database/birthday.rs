use super::Database;
use poise::serenity_prelude::UserId;
use sqlx::Error as SqlxError;

impl Database {
    /// Save or update a member's own birthday
    pub async fn upsert_birthday(
        &self,
        user_id: UserId,
        month: u32,
        day: u32,
        year: Option<i32>,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            INSERT INTO user_birthdays (user_id, birth_month, birth_day, birth_year, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET
                birth_month = $2,
                birth_day = $3,
                birth_year = $4,
                updated_at = NOW()
            "#,
        )
        .bind(user_id.get() as i64)
        .bind(month as i32)
        .bind(day as i32)
        .bind(year)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Delete a member's birthday, returning whether one was stored
    pub async fn remove_birthday(&self, user_id: UserId) -> Result<bool, SqlxError> {
        let result = sqlx::query("DELETE FROM user_birthdays WHERE user_id = $1")
            .bind(user_id.get() as i64)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get every registered member birthday
    pub async fn get_all_birthdays(
        &self,
    ) -> Result<Vec<(UserId, u32, u32, Option<i32>)>, SqlxError> {
        let rows: Vec<(i64, i32, i32, Option<i32>)> = sqlx::query_as(
            "SELECT user_id, birth_month, birth_day, birth_year FROM user_birthdays",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, month, day, year)| {
                (UserId::new(user_id as u64), month as u32, day as u32, year)
            })
            .collect())
    }
}
