use chrono::{Datelike, NaiveDate};
use poise::serenity_prelude::{self as serenity, ChannelId, CreateMessage};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    constants::MAX_MESSAGE_LENGTH,
    database::Database,
    models::{BirthdayEntry, Error},
    utils::{
        datetime::target_date,
        messages::{build_reminder_message, split_message},
    },
};

/// Outbound side of the chat transport: deliver text to a chat by id
pub trait Notifier {
    fn send_text(&self, chat_id: &str, text: &str) -> impl Future<Output = Result<(), Error>> + Send;
}

impl Notifier for Arc<serenity::Http> {
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), Error> {
        let channel_id = ChannelId::new(chat_id.parse::<u64>()?);
        channel_id
            .send_message(self, CreateMessage::new().content(text))
            .await?;
        Ok(())
    }
}

/// Outcome of one reminder broadcast
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastReport {
    pub matched: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Send a split message in order, stopping at the first failed part
async fn send_chunks<N: Notifier>(notifier: &N, chat_id: &str, chunks: &[String]) -> Result<(), Error> {
    for chunk in chunks {
        notifier.send_text(chat_id, chunk).await?;
    }
    Ok(())
}

/// Entries whose birthday is the day after `today`
pub async fn find_upcoming_birthdays(
    db: &Database,
    today: NaiveDate,
) -> Result<Vec<BirthdayEntry>, sqlx::Error> {
    let target = target_date(today);
    db.get_birthdays_on_date(target.month() as i32, target.day() as i32)
        .await
}

/// Check tomorrow's birthdays and notify every registered chat
///
/// Long reminders go out in several parts. A chat that fails on any part is logged and skipped.
pub async fn run_birthday_check<N: Notifier>(
    notifier: &N,
    db: &Database,
    today: NaiveDate,
) -> Result<BroadcastReport, sqlx::Error> {
    info!("Checking birthdays for {}", target_date(today));

    let birthdays = find_upcoming_birthdays(db, today).await?;
    if birthdays.is_empty() {
        info!("No birthdays found for tomorrow");
        return Ok(BroadcastReport::default());
    }

    info!("Found {} birthday(s) tomorrow", birthdays.len());

    let chats = db.get_all_chats().await?;
    let chunks = split_message(&build_reminder_message(&birthdays), MAX_MESSAGE_LENGTH);
    let mut report = BroadcastReport {
        matched: birthdays.len(),
        ..Default::default()
    };

    for chat in &chats {
        let name = chat.title.as_deref().unwrap_or(&chat.chat_id);
        match send_chunks(notifier, &chat.chat_id, &chunks).await {
            Ok(()) => {
                report.sent += 1;
                info!("Reminder sent to chat {}", name);
            }
            Err(e) => {
                report.failed += 1;
                error!("Failed to send reminder to chat {}: {}", chat.chat_id, e);
            }
        }
    }

    info!(
        "Birthday check completed for {} birthday(s): {} sent, {} failed",
        report.matched, report.sent, report.failed
    );
    Ok(report)
}
