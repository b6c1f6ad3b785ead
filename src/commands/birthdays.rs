use chrono::Datelike;
use poise::serenity_prelude::GuildId;
use tracing::{error, info};

use crate::{
    engine::{birthdays_on, month_calendar, next_up, search, BirthdayRecord},
    models::{Context, Error},
    services::{BirthdayService, PersonLookup},
    store::{GuildContacts, NotesStore},
    utils::datetime::is_valid_date,
    utils::message_formatter::{
        build_day_listing, build_month_calendar, build_next_up_card, build_overview,
        build_person_detail, build_search_results,
    },
    utils::messages::{build_database_error, fit_message, format_error, format_info},
    utils::validation::require_guild,
};

/// Every birthday known in this guild, members and manual entries merged
pub(super) async fn load_records(ctx: Context<'_>, guild_id: GuildId) -> Vec<BirthdayRecord> {
    let data = ctx.data();
    let contacts = GuildContacts::new(
        ctx.serenity_context().http.clone(),
        data.db.clone(),
        guild_id,
    );
    let manual = data.db.manual_store(guild_id);

    BirthdayService::new(&contacts, &manual).load_all().await
}

/// Look a person up, replying on the user's behalf when there is no single match
pub(super) async fn resolve_or_reply(
    ctx: Context<'_>,
    guild_id: GuildId,
    query: &str,
) -> Result<Option<BirthdayRecord>, Error> {
    let data = ctx.data();
    let today = data.today_for(guild_id).await;
    let contacts = GuildContacts::new(
        ctx.serenity_context().http.clone(),
        data.db.clone(),
        guild_id,
    );
    let manual = data.db.manual_store(guild_id);
    let service = BirthdayService::new(&contacts, &manual);

    match service.find_person(query, today).await {
        PersonLookup::Found(record) => Ok(Some(record)),
        PersonLookup::NotFound => {
            ctx.say(format_error(&format!("Nobody matches \"{}\".", query)))
                .await?;
            Ok(None)
        }
        PersonLookup::Ambiguous(matches) => {
            let refs: Vec<&BirthdayRecord> = matches.iter().collect();
            ctx.say(fit_message(&format!(
                "{}\n{}",
                format_info("Several people match, use a more specific name or an `#id`."),
                build_search_results(query, &refs, today)
            )))
            .await?;
            Ok(None)
        }
    }
}

/// Show today's, this week's and upcoming birthdays
#[poise::command(slash_command)]
pub async fn birthdays(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    ctx.defer().await?;

    let today = ctx.data().today_for(guild_id).await;
    let records = load_records(ctx, guild_id).await;

    ctx.say(fit_message(&build_overview(&records, today))).await?;
    info!("Listed {} birthday(s) for guild {}", records.len(), guild_id);

    Ok(())
}

/// Show who has the next birthday
#[poise::command(slash_command)]
pub async fn birthday_next(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    ctx.defer().await?;

    let today = ctx.data().today_for(guild_id).await;
    let records = load_records(ctx, guild_id).await;

    match next_up(&records, today) {
        Some(next) => {
            ctx.say(build_next_up_card(&next, today.year())).await?;
        }
        None => {
            ctx.say(format_info("No birthdays yet.")).await?;
        }
    }

    Ok(())
}

/// Search birthdays by name
#[poise::command(slash_command)]
pub async fn birthday_search(
    ctx: Context<'_>,
    #[description = "Part of a name"] query: String,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    ctx.defer().await?;

    let today = ctx.data().today_for(guild_id).await;
    let records = load_records(ctx, guild_id).await;
    let matches = search(&records, &query, today);

    ctx.say(fit_message(&build_search_results(query.trim(), &matches, today)))
        .await?;

    Ok(())
}

/// Show the birthdays of a month, or of a single day
#[poise::command(slash_command)]
pub async fn birthday_calendar(
    ctx: Context<'_>,
    #[description = "Month (1-12), defaults to the current month"]
    #[min = 1]
    #[max = 12]
    month: Option<u32>,
    #[description = "Day of the month, to list a single day"]
    #[min = 1]
    #[max = 31]
    day: Option<u32>,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    ctx.defer().await?;

    let today = ctx.data().today_for(guild_id).await;
    let month = month.unwrap_or_else(|| today.month());
    if !(1..=12).contains(&month) {
        ctx.say(format_error("Month must be between 1 and 12")).await?;
        return Ok(());
    }

    let records = load_records(ctx, guild_id).await;

    let reply = match day {
        Some(day) => {
            if !is_valid_date(month as i32, day as i32) {
                ctx.say(format_error(&format!(
                    "Day {} is not valid for month {}",
                    day, month
                )))
                .await?;
                return Ok(());
            }
            let matches = birthdays_on(&records, month, day);
            build_day_listing(month, day, &matches, today)
        }
        None => build_month_calendar(month, &month_calendar(&records, month)),
    };

    ctx.say(fit_message(&reply)).await?;

    Ok(())
}

/// Show the details and note of one person
#[poise::command(slash_command)]
pub async fn birthday_info(
    ctx: Context<'_>,
    #[description = "Name or #id of the person"] person: String,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    ctx.defer().await?;

    let Some(record) = resolve_or_reply(ctx, guild_id, &person).await? else {
        return Ok(());
    };

    let note = match ctx.data().db.notes(guild_id).load(record.id.as_str()).await {
        Ok(note) => note,
        Err(e) => {
            error!("Failed to load note for {}: {}", record.id, e);
            ctx.say(build_database_error()).await?;
            return Ok(());
        }
    };

    let today = ctx.data().today_for(guild_id).await;
    ctx.say(fit_message(&build_person_detail(&record, today, &note)))
        .await?;

    Ok(())
}
