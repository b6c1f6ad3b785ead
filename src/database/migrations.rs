use super::Database;
use sqlx::Error as SqlxError;

impl Database {
    /// Run database migrations to create tables
    pub(super) async fn run_migrations(&self) -> Result<(), SqlxError> {
        self.create_guild_settings_table().await?;
        self.create_birthday_tables().await?;
        self.create_notes_table().await?;
        self.create_schedule_tables().await?;
        Ok(())
    }

    async fn create_guild_settings_table(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guild_settings (
                guild_id BIGINT PRIMARY KEY,
                timezone TEXT NOT NULL DEFAULT 'UTC',
                created_at TIMESTAMP NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn create_birthday_tables(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_birthdays (
                user_id BIGINT PRIMARY KEY,
                birth_month INTEGER NOT NULL CHECK (birth_month BETWEEN 1 AND 12),
                birth_day INTEGER NOT NULL CHECK (birth_day BETWEEN 1 AND 31),
                birth_year INTEGER CHECK (birth_year IS NULL OR birth_year >= 1900),
                created_at TIMESTAMP NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS manual_birthdays (
                id BIGSERIAL PRIMARY KEY,
                guild_id BIGINT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL DEFAULT '',
                birth_month INTEGER NOT NULL CHECK (birth_month BETWEEN 1 AND 12),
                birth_day INTEGER NOT NULL CHECK (birth_day BETWEEN 1 AND 31),
                birth_year INTEGER CHECK (birth_year IS NULL OR birth_year >= 1900),
                created_at TIMESTAMP NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS manual_birthdays_guild_idx ON manual_birthdays (guild_id)",
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS digest_channels (
                guild_id BIGINT PRIMARY KEY,
                channel_id BIGINT NOT NULL,
                custom_header TEXT,
                custom_footer TEXT,
                created_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn create_notes_table(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS person_notes (
                guild_id BIGINT NOT NULL,
                person_id TEXT NOT NULL,
                body TEXT NOT NULL,
                updated_at TIMESTAMP NOT NULL DEFAULT NOW(),
                PRIMARY KEY (guild_id, person_id)
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn create_schedule_tables(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            DO $$ BEGIN
                CREATE TYPE schedule_type AS ENUM ('digest');
            EXCEPTION
                WHEN duplicate_object THEN null;
            END $$;
            "#,
        )
        .execute(self.pool())
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedules (
                id SERIAL PRIMARY KEY,
                guild_id BIGINT,
                schedule_type schedule_type NOT NULL,
                cron_expression TEXT NOT NULL,
                enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at TIMESTAMP NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMP NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(self.pool())
        .await?;

        Ok(())
    }
}
