use tracing::{error, info};

use crate::{
    models::{Context, Error},
    store::NotesStore,
    utils::messages::{build_database_error, format_success},
    utils::string_utils::{is_empty_or_whitespace, process_newlines},
    utils::validation::require_guild,
};

use super::birthdays::resolve_or_reply;

/// Save a note about someone, or clear it by leaving the text empty
#[poise::command(slash_command)]
pub async fn birthday_note(
    ctx: Context<'_>,
    #[description = "Name or #id of the person"] person: String,
    #[description = "Note text (use \\n for new lines), omit to clear"]
    #[max_length = 1000]
    text: Option<String>,
) -> Result<(), Error> {
    let guild_id = require_guild(ctx.guild_id())?;
    ctx.defer().await?;

    let Some(record) = resolve_or_reply(ctx, guild_id, &person).await? else {
        return Ok(());
    };

    let text = text.as_deref().map(process_newlines).unwrap_or_default();
    let notes = ctx.data().db.notes(guild_id);

    if let Err(e) = notes.save(record.id.as_str(), &text).await {
        error!("Failed to save note for {}: {}", record.id, e);
        ctx.say(build_database_error()).await?;
        return Ok(());
    }

    let reply = if is_empty_or_whitespace(&text) {
        format!("Cleared the note for **{}**", record.full_name)
    } else {
        format!("Saved the note for **{}**", record.full_name)
    };
    ctx.say(format_success(&reply)).await?;

    info!("Updated note for {} in guild {}", record.id, guild_id);
    Ok(())
}
