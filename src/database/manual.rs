use poise::serenity_prelude::GuildId;

use super::Database;
use crate::store::{ManualBirthday, ManualBirthdayDraft, ManualStore, StoreResult};

type ManualRow = (i64, String, String, i32, i32, Option<i32>);

fn from_row((id, first_name, last_name, month, day, year): ManualRow) -> ManualBirthday {
    ManualBirthday {
        id,
        first_name,
        last_name,
        month: month as u32,
        day: day as u32,
        year,
    }
}

/// Manual birthdays of one server, stored in `manual_birthdays`
pub struct GuildManualStore<'a> {
    db: &'a Database,
    guild_id: i64,
}

impl<'a> GuildManualStore<'a> {
    pub(super) fn new(db: &'a Database, guild_id: GuildId) -> Self {
        Self {
            db,
            guild_id: guild_id.get() as i64,
        }
    }
}

impl ManualStore for GuildManualStore<'_> {
    async fn load(&self) -> StoreResult<Vec<ManualBirthday>> {
        let rows: Vec<ManualRow> = sqlx::query_as(
            "SELECT id, first_name, last_name, birth_month, birth_day, birth_year \
             FROM manual_birthdays WHERE guild_id = $1 ORDER BY id",
        )
        .bind(self.guild_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn save(&self, items: &[ManualBirthday]) -> StoreResult<()> {
        let mut tx = self.db.pool().begin().await?;

        sqlx::query("DELETE FROM manual_birthdays WHERE guild_id = $1")
            .bind(self.guild_id)
            .execute(&mut *tx)
            .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO manual_birthdays
                    (id, guild_id, first_name, last_name, birth_month, birth_day, birth_year)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(item.id)
            .bind(self.guild_id)
            .bind(&item.first_name)
            .bind(&item.last_name)
            .bind(item.month as i32)
            .bind(item.day as i32)
            .bind(item.year)
            .execute(&mut *tx)
            .await?;
        }

        // Explicit ids bypass the sequence; move it past them
        sqlx::query(
            "SELECT setval(pg_get_serial_sequence('manual_birthdays', 'id'), \
             GREATEST((SELECT MAX(id) FROM manual_birthdays), 1))",
        )
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn add(&self, draft: ManualBirthdayDraft) -> StoreResult<ManualBirthday> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO manual_birthdays
                (guild_id, first_name, last_name, birth_month, birth_day, birth_year)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(self.guild_id)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(draft.month as i32)
        .bind(draft.day as i32)
        .bind(draft.year)
        .fetch_one(self.db.pool())
        .await?;

        Ok(draft.with_id(id))
    }

    async fn update(&self, item: &ManualBirthday) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE manual_birthdays
            SET first_name = $1,
                last_name = $2,
                birth_month = $3,
                birth_day = $4,
                birth_year = $5,
                updated_at = NOW()
            WHERE id = $6 AND guild_id = $7
            "#,
        )
        .bind(&item.first_name)
        .bind(&item.last_name)
        .bind(item.month as i32)
        .bind(item.day as i32)
        .bind(item.year)
        .bind(item.id)
        .bind(self.guild_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM manual_birthdays WHERE id = $1 AND guild_id = $2")
            .bind(id)
            .bind(self.guild_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
