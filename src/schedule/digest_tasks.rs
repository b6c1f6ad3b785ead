use chrono::NaiveDate;
use poise::serenity_prelude::{self as serenity, CreateMessage, GuildId};
use std::sync::Arc;
use tracing::info;

use crate::database::DigestChannel;
use crate::engine::{bucket, days_until, next_up, BirthdayRecord};
use crate::models::{Data, Error};
use crate::services::BirthdayService;
use crate::store::GuildContacts;
use crate::utils::message_formatter::build_digest_message;
use crate::utils::messages::fit_message;

/// Post today's birthdays for a guild to its digest channel
pub async fn run_daily_digest(
    http: &Arc<serenity::Http>,
    data: &Data,
    guild_id: GuildId,
) -> Result<(), Error> {
    let Some(config) = data.db.get_digest_channel(guild_id).await? else {
        info!("No digest channel configured for guild {}", guild_id);
        return Ok(());
    };

    let today = data.today_for(guild_id).await;
    info!("Running birthday digest for {} in guild {}", today, guild_id);

    let contacts = GuildContacts::new(http.clone(), data.db.clone(), guild_id);
    let manual = data.db.manual_store(guild_id);
    let records = BirthdayService::new(&contacts, &manual).load_all().await;

    let Some(message) = compose_digest(&records, today, &config) else {
        info!("No birthdays today in guild {}", guild_id);
        return Ok(());
    };

    config
        .channel_id
        .send_message(http, CreateMessage::new().content(fit_message(&message)))
        .await?;

    info!("Birthday digest sent to channel {}", config.channel_id);
    Ok(())
}

/// Digest text for `today`, `None` when nobody has a birthday
fn compose_digest(records: &[BirthdayRecord], today: NaiveDate, config: &DigestChannel) -> Option<String> {
    let buckets = bucket(records, today);
    if buckets.today.is_empty() {
        return None;
    }

    let later: Vec<BirthdayRecord> = records
        .iter()
        .filter(|record| days_until(record.month, record.day, today) > 0)
        .cloned()
        .collect();
    let next = next_up(&later, today);

    Some(build_digest_message(
        &buckets.today,
        next.as_ref(),
        today,
        &config.custom_header,
        &config.custom_footer,
    ))
}
