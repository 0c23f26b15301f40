use super::Database;
use sqlx::Error as SqlxError;

use crate::models::RegisteredChat;

impl Database {
    /// Register a chat unless it is already known
    ///
    /// Returns `true` if a new row was created.
    pub async fn register_chat(&self, chat_id: &str, title: Option<&str>) -> Result<bool, SqlxError> {
        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM chats WHERE chat_id = $1")
            .bind(chat_id)
            .fetch_optional(self.pool())
            .await?;

        if existing.is_some() {
            return Ok(false);
        }

        // The UNIQUE constraint settles a lost check-then-insert race
        let result = sqlx::query(
            "INSERT INTO chats (chat_id, title) VALUES ($1, $2) ON CONFLICT (chat_id) DO NOTHING",
        )
        .bind(chat_id)
        .bind(title)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get all registered chats
    pub async fn get_all_chats(&self) -> Result<Vec<RegisteredChat>, SqlxError> {
        sqlx::query_as("SELECT id, chat_id, title, added_at FROM chats ORDER BY id")
            .fetch_all(self.pool())
            .await
    }
}
