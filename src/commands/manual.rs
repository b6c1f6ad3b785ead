use chrono::Datelike;
use tracing::{error, info};

use crate::{
    engine::RecordId,
    models::{Context, Error},
    services::{EntryInput, EntryService, ServiceError},
    store::{ManualBirthday, NotesStore},
    utils::datetime::format_month_day,
    utils::messages::{
        build_database_error, build_delete_success, build_unknown_entry_error, format_error,
        format_success,
    },
    utils::validation::require_guild,
};

fn describe_entry(entry: &ManualBirthday) -> String {
    let date = format_month_day(entry.month, entry.day);
    match entry.year {
        Some(year) => format!("**{}** on {} {} (`#{}`)", entry.full_name(), date, year, entry.id),
        None => format!("**{}** on {} (`#{}`)", entry.full_name(), date, entry.id),
    }
}

/// Reply to a failed service call, logging store failures
async fn report_failure(ctx: Context<'_>, e: ServiceError) -> Result<(), Error> {
    match e {
        ServiceError::Invalid(e) => {
            ctx.say(format_error(&e.to_string())).await?;
        }
        ServiceError::Store(e) => {
            error!("Manual birthday store failed: {}", e);
            ctx.say(build_database_error()).await?;
        }
    }
    Ok(())
}

/// Add a birthday for someone who isn't a member of this server
#[poise::command(slash_command)]
pub async fn birthday_add(
    ctx: Context<'_>,
    #[description = "First name"] first_name: String,
    #[description = "Month (1-12)"]
    #[min = 1]
    #[max = 12]
    month: i32,
    #[description = "Day (1-31)"]
    #[min = 1]
    #[max = 31]
    day: i32,
    #[description = "Last name (optional)"] last_name: Option<String>,
    #[description = "Birth year (optional)"] year: Option<i32>,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    let current_year = ctx.data().today_for(guild_id).await.year();

    let store = ctx.data().db.manual_store(guild_id);
    let input = EntryInput {
        first_name: &first_name,
        last_name: last_name.as_deref().unwrap_or_default(),
        month,
        day,
        year,
    };

    match EntryService::new(&store).add(input, current_year).await {
        Ok(entry) => {
            ctx.say(format_success(&format!("Added {}", describe_entry(&entry))))
                .await?;
            info!("Added manual birthday {} in guild {}", entry.id, guild_id);
        }
        Err(e) => report_failure(ctx, e).await?,
    }

    Ok(())
}

/// Replace a manually added birthday
#[poise::command(slash_command)]
pub async fn birthday_edit(
    ctx: Context<'_>,
    #[description = "Entry id, shown as #id in listings"] id: i64,
    #[description = "First name"] first_name: String,
    #[description = "Month (1-12)"]
    #[min = 1]
    #[max = 12]
    month: i32,
    #[description = "Day (1-31)"]
    #[min = 1]
    #[max = 31]
    day: i32,
    #[description = "Last name (optional)"] last_name: Option<String>,
    #[description = "Birth year (optional)"] year: Option<i32>,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    let current_year = ctx.data().today_for(guild_id).await.year();

    let store = ctx.data().db.manual_store(guild_id);
    let input = EntryInput {
        first_name: &first_name,
        last_name: last_name.as_deref().unwrap_or_default(),
        month,
        day,
        year,
    };

    match EntryService::new(&store).edit(id, input, current_year).await {
        Ok(Some(entry)) => {
            ctx.say(format_success(&format!("Updated {}", describe_entry(&entry))))
                .await?;
            info!("Updated manual birthday {} in guild {}", id, guild_id);
        }
        Ok(None) => {
            ctx.say(build_unknown_entry_error(id)).await?;
        }
        Err(e) => report_failure(ctx, e).await?,
    }

    Ok(())
}

/// Delete a manually added birthday
#[poise::command(slash_command)]
pub async fn birthday_remove(
    ctx: Context<'_>,
    #[description = "Entry id, shown as #id in listings"] id: i64,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;

    let store = ctx.data().db.manual_store(guild_id);
    let notes = ctx.data().db.notes(guild_id);

    match EntryService::new(&store).remove(id).await {
        Ok(true) => {
            let person_id = RecordId::manual(id);
            if let Err(e) = notes.save(person_id.as_str(), "").await {
                error!("Failed to drop note of removed entry {}: {}", id, e);
            }
            ctx.say(build_delete_success("Birthday")).await?;
            info!("Removed manual birthday {} in guild {}", id, guild_id);
        }
        Ok(false) => {
            ctx.say(build_unknown_entry_error(id)).await?;
        }
        Err(e) => report_failure(ctx, e).await?,
    }

    Ok(())
}
