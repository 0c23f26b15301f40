use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Arc;

use crate::{database::Database, handlers::ConversationFlow, schedule::ReminderTime};

/// A tracked person and their birth date
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct BirthdayEntry {
    pub id: i64,
    /// Chat-member handle, always starting with `@`
    #[sqlx(rename = "username")]
    pub identifier: String,
    pub birth_date: NaiveDate,
    pub created_at: NaiveDateTime,
}

/// A chat that has talked to the bot and receives daily reminders
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct RegisteredChat {
    pub id: i64,
    pub chat_id: String,
    pub title: Option<String>,
    pub added_at: NaiveDateTime,
}

/// Bot state shared across all handlers
#[derive(Clone)]
pub struct Data {
    /// Database connection
    pub db: Database,
    /// In-progress add conversations, keyed per chat and user
    pub conversations: Arc<ConversationFlow>,
    /// When the daily reminder check fires
    pub reminder_time: ReminderTime,
}

impl Data {
    /// Create a new Data instance with the given database connection
    pub fn new(db: Database, reminder_time: ReminderTime) -> Self {
        Self {
            db,
            conversations: Arc::new(ConversationFlow::new()),
            reminder_time,
        }
    }
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
