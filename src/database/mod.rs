/// Database modules organized by feature
mod migrations;
mod birthday;
mod digest;
mod manual;
mod notes;
mod schedule;
mod settings;

use poise::serenity_prelude::GuildId;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

pub use digest::DigestChannel;
pub use manual::GuildManualStore;
pub use notes::GuildNotes;

/// Database connection pool wrapper
///
/// Handles all database operations for the bot
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection and run migrations
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;

        info!("Database connected and migrations completed");
        Ok(db)
    }

    /// Manual birthdays of one server
    pub fn manual_store(&self, guild_id: GuildId) -> GuildManualStore<'_> {
        GuildManualStore::new(self, guild_id)
    }

    /// Person notes of one server
    pub fn notes(&self, guild_id: GuildId) -> GuildNotes<'_> {
        GuildNotes::new(self, guild_id)
    }

    /// Get a reference to the connection pool (for internal use)
    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
