use tracing::info;

use crate::{
    constants::MAX_MESSAGE_LENGTH,
    database::Database,
    handlers::SessionKey,
    models::{Context, Error},
    utils::{
        messages::{
            build_birthday_list, build_help_message, build_not_found_message,
            build_remove_usage, build_removed_message, build_welcome_message, split_message,
        },
        string_utils::normalize_identifier,
    },
};

/// Register this chat for reminders and show the command summary
///
/// Registration itself happens in the pre-command hook, which runs for every command.
#[poise::command(slash_command, prefix_command)]
pub async fn start(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(build_welcome_message()).await?;
    Ok(())
}

/// Add a person: asks for a username, then a birth date
#[poise::command(slash_command, prefix_command)]
pub async fn add(ctx: Context<'_>) -> Result<(), Error> {
    let key = SessionKey::new(ctx.channel_id(), ctx.author().id);
    let prompt = ctx.data().conversations.begin(key);
    ctx.say(prompt).await?;
    Ok(())
}

/// Show everyone, ordered by birth date
#[poise::command(slash_command, prefix_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let entries = ctx.data().db.get_all_birthdays().await?;
    for chunk in split_message(&build_birthday_list(&entries), MAX_MESSAGE_LENGTH) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

/// Remove a person from the list
///
/// Only the first word is used, so `/remove @alice please` removes `@alice`.
#[poise::command(slash_command, prefix_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[rest]
    #[description = "Username to remove, e.g. @username"]
    identifier: Option<String>,
) -> Result<(), Error> {
    let reply = remove_entry(&ctx.data().db, identifier.as_deref()).await?;
    ctx.say(reply).await?;
    Ok(())
}

/// Remove the first entry matching the argument and pick the reply
async fn remove_entry(db: &Database, argument: Option<&str>) -> Result<String, sqlx::Error> {
    let Some(first) = argument.and_then(|arg| arg.split_whitespace().next()) else {
        return Ok(build_remove_usage());
    };

    let identifier = normalize_identifier(first);
    if db.remove_birthday(&identifier).await? {
        info!("Removed birthday for {}", identifier);
        Ok(build_removed_message(&identifier))
    } else {
        Ok(build_not_found_message(&identifier))
    }
}

/// Show the list of commands
#[poise::command(slash_command, prefix_command)]
pub async fn help(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say(build_help_message()).await?;
    Ok(())
}

/// Stop adding a person
///
/// Replies with the help text, whether or not an add was in progress.
#[poise::command(slash_command, prefix_command)]
pub async fn cancel(ctx: Context<'_>) -> Result<(), Error> {
    let key = SessionKey::new(ctx.channel_id(), ctx.author().id);
    if ctx.data().conversations.cancel(key) {
        info!("Cancelled add flow in channel {}", ctx.channel_id());
    }
    ctx.say(build_help_message()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn db_with(identifiers: &[&str]) -> Database {
        let db = Database::in_memory().await.unwrap();
        let date = NaiveDate::from_ymd_opt(1990, 12, 15).unwrap();
        for identifier in identifiers {
            db.insert_birthday(identifier, date).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_remove_without_argument_shows_usage() {
        let db = db_with(&["@alice"]).await;

        for argument in [None, Some(""), Some("   ")] {
            let reply = remove_entry(&db, argument).await.unwrap();
            assert_eq!(reply, build_remove_usage());
        }
        assert_eq!(db.count_birthdays().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_reports_not_found() {
        let db = db_with(&["@alice"]).await;

        let reply = remove_entry(&db, Some("bob")).await.unwrap();
        assert_eq!(reply, build_not_found_message("@bob"));
        assert_eq!(db.count_birthdays().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_existing_reports_success() {
        let db = db_with(&["@alice", "@bob"]).await;

        let reply = remove_entry(&db, Some("@alice")).await.unwrap();
        assert_eq!(reply, build_removed_message("@alice"));
        assert_eq!(db.count_birthdays().await.unwrap(), 1);

        let again = remove_entry(&db, Some("@alice")).await.unwrap();
        assert_eq!(again, build_not_found_message("@alice"));
    }

    #[tokio::test]
    async fn test_remove_uses_first_word_only() {
        let db = db_with(&["@alice"]).await;

        let reply = remove_entry(&db, Some("  alice please remove her ")).await.unwrap();
        assert_eq!(reply, build_removed_message("@alice"));
        assert_eq!(db.count_birthdays().await.unwrap(), 0);
    }
}
