use poise::serenity_prelude::{self as serenity, Message};
use tracing::error;

use crate::{constants::COMMAND_PREFIX, models::Data};

use super::conversation::SessionKey;

/// Handle a plain message: route it into the author's add conversation, if any
pub async fn handle_message(ctx: &serenity::Context, message: &Message, data: &Data) {
    // Attachment-only and sticker messages carry no text
    if message.author.bot
        || message.content.trim().is_empty()
        || message.content.starts_with(COMMAND_PREFIX)
    {
        return;
    }

    let key = SessionKey::new(message.channel_id, message.author.id);
    let reply = match data
        .conversations
        .handle_reply(key, &message.content, &data.db)
        .await
    {
        Ok(Some(reply)) => reply,
        Ok(None) => return,
        Err(e) => {
            error!(
                "Failed to process add flow reply in channel {}: {}",
                message.channel_id, e
            );
            return;
        }
    };

    if let Err(e) = message.channel_id.say(ctx, reply).await {
        error!("Failed to reply in channel {}: {}", message.channel_id, e);
    }
}
