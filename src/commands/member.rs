use chrono::Datelike;
use tracing::{error, info};

use crate::{
    models::{Context, Error},
    services::{MemberService, ServiceError},
    utils::datetime::format_month_day,
    utils::messages::{build_database_error, format_error, format_info, format_success},
};

/// Register your own birthday, shared with every server the bot is in
#[poise::command(slash_command)]
pub async fn set_my_birthday(
    ctx: Context<'_>,
    #[description = "Month (1-12)"]
    #[min = 1]
    #[max = 12]
    month: i32,
    #[description = "Day (1-31)"]
    #[min = 1]
    #[max = 31]
    day: i32,
    #[description = "Birth year (optional, used to show your age)"] year: Option<i32>,
) -> Result<(), Error> {
    let current_year = match ctx.guild_id() {
        Some(guild_id) => ctx.data().today_for(guild_id).await.year(),
        None => chrono::Utc::now().year(),
    };
    let user_id = ctx.author().id;

    let service = MemberService::new(&ctx.data().db);
    match service
        .save_member_birthday(user_id, month, day, year, current_year)
        .await
    {
        Ok(birthday) => {
            let date = format_month_day(birthday.month, birthday.day);
            ctx.send(
                poise::CreateReply::default()
                    .content(format_success(&format!("Your birthday is set to **{}**", date)))
                    .ephemeral(true),
            )
            .await?;
            info!("User {} set their birthday", user_id);
        }
        Err(ServiceError::Invalid(e)) => {
            ctx.say(format_error(&e.to_string())).await?;
        }
        Err(ServiceError::Store(e)) => {
            error!("Failed to save birthday for user {}: {}", user_id, e);
            ctx.say(build_database_error()).await?;
        }
    }

    Ok(())
}

/// Remove your own birthday
#[poise::command(slash_command)]
pub async fn forget_my_birthday(ctx: Context<'_>) -> Result<(), Error> {
    let user_id = ctx.author().id;

    let reply = match MemberService::new(&ctx.data().db)
        .forget_member_birthday(user_id)
        .await
    {
        Ok(true) => {
            info!("User {} removed their birthday", user_id);
            format_success("Your birthday has been removed.")
        }
        Ok(false) => format_info("You haven't set a birthday."),
        Err(e) => {
            error!("Failed to remove birthday for user {}: {}", user_id, e);
            build_database_error()
        }
    };

    ctx.send(poise::CreateReply::default().content(reply).ephemeral(true))
        .await?;
    Ok(())
}
