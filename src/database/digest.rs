use super::Database;
use poise::serenity_prelude::{ChannelId, GuildId};
use sqlx::Error as SqlxError;

/// Where and how a server's daily digest is posted
#[derive(Debug, Clone)]
pub struct DigestChannel {
    pub channel_id: ChannelId,
    pub custom_header: Option<String>,
    pub custom_footer: Option<String>,
}

impl Database {
    /// Set the digest channel for a guild
    pub async fn set_digest_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        custom_header: Option<String>,
        custom_footer: Option<String>,
    ) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            INSERT INTO digest_channels (guild_id, channel_id, custom_header, custom_footer)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (guild_id)
            DO UPDATE SET
                channel_id = $2,
                custom_header = $3,
                custom_footer = $4
            "#,
        )
        .bind(guild_id.get() as i64)
        .bind(channel_id.get() as i64)
        .bind(custom_header)
        .bind(custom_footer)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    /// Get the digest channel for a guild
    pub async fn get_digest_channel(
        &self,
        guild_id: GuildId,
    ) -> Result<Option<DigestChannel>, SqlxError> {
        let result: Option<(i64, Option<String>, Option<String>)> = sqlx::query_as(
            "SELECT channel_id, custom_header, custom_footer FROM digest_channels WHERE guild_id = $1",
        )
        .bind(guild_id.get() as i64)
        .fetch_optional(self.pool())
        .await?;

        Ok(result.map(|(channel_id, custom_header, custom_footer)| DigestChannel {
            channel_id: ChannelId::new(channel_id as u64),
            custom_header,
            custom_footer,
        }))
    }

    /// Remove the digest channel for a guild, returning it if one was configured
    pub async fn remove_digest_channel(
        &self,
        guild_id: GuildId,
    ) -> Result<Option<ChannelId>, SqlxError> {
        let result: Option<(i64,)> = sqlx::query_as(
            "DELETE FROM digest_channels WHERE guild_id = $1 RETURNING channel_id",
        )
        .bind(guild_id.get() as i64)
        .fetch_optional(self.pool())
        .await?;

        Ok(result.map(|(channel_id,)| ChannelId::new(channel_id as u64)))
    }
}
