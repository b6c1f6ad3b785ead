use tracing::{error, info};

use crate::{
    models::{Context, Error},
    utils::messages::{format_error, format_success},
    utils::timezone::{parse_timezone, today_in},
    utils::validation::require_guild,
};

/// Set the timezone for this server
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn setup_timezone(
    ctx: Context<'_>,
    #[description = "Timezone (e.g., Europe/Paris, America/New_York, Asia/Tokyo)"]
    timezone: String,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;

    let tz = match parse_timezone(timezone.trim()) {
        Ok(tz) => tz,
        Err(_) => {
            ctx.say(format!(
                "{}\nPlease use a valid IANA timezone name like:\n\
                • Europe/Paris\n\
                • America/New_York\n\
                • Asia/Tokyo\n\
                • UTC\n\
                \n\
                You can find a full list at: https://en.wikipedia.org/wiki/List_of_tz_database_time_zones",
                format_error(&format!("Invalid timezone: '{}'", timezone))
            ))
            .await?;
            return Ok(());
        }
    };

    if let Err(e) = ctx.data().db.set_guild_timezone(guild_id, tz.name()).await {
        error!("Failed to save guild timezone: {}", e);
        ctx.say(format_error("Failed to save timezone setting!")).await?;
        return Ok(());
    }
    ctx.data().timezones.insert(guild_id, tz);
    // Digest crons are local times, a reload moves them to the new zone
    ctx.data().reload_schedules();

    let now = chrono::Utc::now();

    ctx.say(format!(
        "{}\nTimezone: **{}**\nCurrent time: **{}**\nToday is **{}** here.",
        format_success("Server timezone configured!"),
        tz.name(),
        now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z"),
        today_in(&tz, now).format("%a, %b %-d")
    ))
    .await?;

    info!("Set timezone for guild {} to {}", guild_id, tz.name());

    Ok(())
}
