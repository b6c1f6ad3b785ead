use poise::serenity_prelude::GuildId;

use super::Database;
use crate::store::{NotesStore, StoreResult};
use crate::utils::string_utils::is_empty_or_whitespace;

/// Person notes of one server, stored in `person_notes`
pub struct GuildNotes<'a> {
    db: &'a Database,
    guild_id: i64,
}

impl<'a> GuildNotes<'a> {
    pub(super) fn new(db: &'a Database, guild_id: GuildId) -> Self {
        Self {
            db,
            guild_id: guild_id.get() as i64,
        }
    }
}

impl NotesStore for GuildNotes<'_> {
    async fn load(&self, person_id: &str) -> StoreResult<String> {
        let result: Option<(String,)> = sqlx::query_as(
            "SELECT body FROM person_notes WHERE guild_id = $1 AND person_id = $2",
        )
        .bind(self.guild_id)
        .bind(person_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(result.map(|(body,)| body).unwrap_or_default())
    }

    async fn save(&self, person_id: &str, text: &str) -> StoreResult<()> {
        if is_empty_or_whitespace(text) {
            sqlx::query("DELETE FROM person_notes WHERE guild_id = $1 AND person_id = $2")
                .bind(self.guild_id)
                .bind(person_id)
                .execute(self.db.pool())
                .await?;
            return Ok(());
        }

        sqlx::query(
            r#"
            INSERT INTO person_notes (guild_id, person_id, body, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (guild_id, person_id)
            DO UPDATE SET body = $3, updated_at = NOW()
            "#,
        )
        .bind(self.guild_id)
        .bind(person_id)
        .bind(text)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
