use poise::serenity_prelude::{ChannelType, GuildChannel};
use tracing::{error, info};

use crate::{
    constants::DEFAULT_DIGEST_TIME,
    models::{Context, Error},
    schedule::ScheduleType,
    utils::messages::{build_delete_success, format_error, format_info, format_success},
    utils::timezone::daily_cron,
    utils::validation::require_guild,
};

/// Post a daily birthday digest in a channel
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn setup_digest(
    ctx: Context<'_>,
    #[description = "Channel where the digest will be posted"] channel: GuildChannel,
    #[description = "Time to post (HH:MM, 24-hour format, default: 08:00)"] time: Option<String>,
    #[description = "Custom header (use \\n for new lines)"] header: Option<String>,
    #[description = "Custom footer (use \\n for new lines)"] footer: Option<String>,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;

    if channel.kind != ChannelType::Text {
        ctx.say(format_error("The digest channel must be a text channel!"))
            .await?;
        return Ok(());
    }

    let time_str = time.unwrap_or_else(|| DEFAULT_DIGEST_TIME.to_string());
    let tz = ctx.data().guild_timezone(guild_id).await;

    // Stored in local time, the schedule manager evaluates it in the guild's timezone
    let (cron_expr, local_time) = match daily_cron(&time_str) {
        Ok(result) => result,
        Err(e) => {
            ctx.say(format_error(&e.to_string())).await?;
            return Ok(());
        }
    };

    if let Err(e) = ctx
        .data()
        .db
        .set_digest_channel(guild_id, channel.id, header.clone(), footer.clone())
        .await
    {
        error!("Failed to save digest channel to database: {}", e);
        ctx.say(format_error("Failed to save digest configuration!"))
            .await?;
        return Ok(());
    }

    if let Err(e) = ctx
        .data()
        .db
        .upsert_schedule(guild_id, ScheduleType::Digest, &cron_expr, true)
        .await
    {
        error!("Failed to save digest schedule: {}", e);
        ctx.say(format_error("Failed to save digest schedule!")).await?;
        return Ok(());
    }

    ctx.data().reload_schedules();

    let custom_info = if header.is_some() || footer.is_some() {
        "\n📝 Custom header/footer configured"
    } else {
        ""
    };

    ctx.say(format!(
        "{}\nChannel: <#{}>\nTime: **{} {}** every day{}",
        format_success("Birthday digest configured!"),
        channel.id,
        local_time.format("%H:%M"),
        tz.name(),
        custom_info
    ))
    .await?;

    info!(
        "Setup digest in guild {} for channel {} at {} {} ({})",
        guild_id, channel.id, time_str, tz.name(), cron_expr
    );

    Ok(())
}

/// Stop posting the daily birthday digest
#[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
pub async fn disable_digest(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;

    match ctx.data().db.remove_digest_channel(guild_id).await {
        Ok(Some(channel_id)) => {
            if let Err(e) = ctx
                .data()
                .db
                .set_schedule_enabled(guild_id, ScheduleType::Digest, false)
                .await
            {
                error!("Failed to disable digest schedule: {}", e);
            }
            ctx.data().reload_schedules();

            ctx.say(build_delete_success("Birthday digest")).await?;
            info!(
                "Disabled digest for guild {} (was channel {})",
                guild_id, channel_id
            );
        }
        Ok(None) => {
            ctx.say(format_info("No birthday digest is configured for this server."))
                .await?;
        }
        Err(e) => {
            error!("Failed to remove digest channel: {}", e);
            ctx.say(format_error("Failed to disable the birthday digest!"))
                .await?;
        }
    }

    Ok(())
}
