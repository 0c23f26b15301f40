use tracing::{error, info};

use crate::models::Context;

/// Register the chat a command came from, if it is not known yet
///
/// Runs before every command. Failure is logged and the command still runs.
pub async fn register_current_chat(ctx: Context<'_>) {
    let chat_id = ctx.channel_id().to_string();
    let title = ctx.guild().map(|guild| guild.name.clone());

    match ctx.data().db.register_chat(&chat_id, title.as_deref()).await {
        Ok(true) => info!(
            "Registered new chat {} ({})",
            chat_id,
            title.as_deref().unwrap_or("direct message")
        ),
        Ok(false) => {}
        Err(e) => error!("Failed to register chat {}: {}", chat_id, e),
    }
}
