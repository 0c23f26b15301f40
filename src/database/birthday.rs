use super::Database;
use chrono::NaiveDate;
use sqlx::Error as SqlxError;

use crate::models::BirthdayEntry;

impl Database {
    /// Store a new birthday entry, returning its id
    ///
    /// Identifiers are not unique; adding the same person twice yields two rows.
    pub async fn insert_birthday(
        &self,
        identifier: &str,
        birth_date: NaiveDate,
    ) -> Result<i64, SqlxError> {
        let result = sqlx::query("INSERT INTO birthdays (username, birth_date) VALUES ($1, $2)")
            .bind(identifier)
            .bind(birth_date)
            .execute(self.pool())
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Get all entries, earliest birth date first
    pub async fn get_all_birthdays(&self) -> Result<Vec<BirthdayEntry>, SqlxError> {
        sqlx::query_as(
            "SELECT id, username, birth_date, created_at FROM birthdays ORDER BY birth_date, id",
        )
        .fetch_all(self.pool())
        .await
    }

    /// Get all entries whose birthday falls on the given month and day, any year
    pub async fn get_birthdays_on_date(
        &self,
        month: i32,
        day: i32,
    ) -> Result<Vec<BirthdayEntry>, SqlxError> {
        sqlx::query_as(
            r#"
            SELECT id, username, birth_date, created_at FROM birthdays
            WHERE CAST(strftime('%m', birth_date) AS INTEGER) = $1
              AND CAST(strftime('%d', birth_date) AS INTEGER) = $2
            ORDER BY id
            "#,
        )
        .bind(month)
        .bind(day)
        .fetch_all(self.pool())
        .await
    }

    /// Delete the oldest entry with exactly this identifier
    ///
    /// Returns `true` if a row was deleted.
    pub async fn remove_birthday(&self, identifier: &str) -> Result<bool, SqlxError> {
        let result = sqlx::query(
            "DELETE FROM birthdays WHERE id = (SELECT id FROM birthdays WHERE username = $1 ORDER BY id LIMIT 1)",
        )
        .bind(identifier)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of stored entries
    #[cfg(test)]
    pub async fn count_birthdays(&self) -> Result<i64, SqlxError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM birthdays")
            .fetch_one(self.pool())
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_ordered_by_date() {
        let db = Database::in_memory().await.unwrap();

        db.insert_birthday("@carol", date(1, 1, 2001)).await.unwrap();
        db.insert_birthday("@alice", date(15, 12, 1990)).await.unwrap();
        db.insert_birthday("@bob", date(5, 3, 1995)).await.unwrap();

        let entries = db.get_all_birthdays().await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(names, ["@alice", "@bob", "@carol"]);
        assert_eq!(entries[0].birth_date, date(15, 12, 1990));
    }

    #[tokio::test]
    async fn test_duplicate_identifiers_allowed() {
        let db = Database::in_memory().await.unwrap();

        db.insert_birthday("@alice", date(15, 12, 1990)).await.unwrap();
        db.insert_birthday("@alice", date(16, 12, 1990)).await.unwrap();

        assert_eq!(db.count_birthdays().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_birthdays_on_date_ignores_year() {
        let db = Database::in_memory().await.unwrap();

        db.insert_birthday("@march16", date(16, 3, 1990)).await.unwrap();
        db.insert_birthday("@march16_later", date(16, 3, 2005)).await.unwrap();
        db.insert_birthday("@april16", date(16, 4, 1990)).await.unwrap();

        let matches = db.get_birthdays_on_date(3, 16).await.unwrap();
        let names: Vec<_> = matches.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(names, ["@march16", "@march16_later"]);
    }

    #[tokio::test]
    async fn test_remove_existing_deletes_exactly_one() {
        let db = Database::in_memory().await.unwrap();

        let first = db.insert_birthday("@alice", date(15, 12, 1990)).await.unwrap();
        db.insert_birthday("@alice", date(16, 12, 1990)).await.unwrap();
        db.insert_birthday("@bob", date(5, 3, 1995)).await.unwrap();

        assert!(db.remove_birthday("@alice").await.unwrap());
        assert_eq!(db.count_birthdays().await.unwrap(), 2);

        let remaining = db.get_all_birthdays().await.unwrap();
        assert!(remaining.iter().all(|e| e.id != first));
    }

    #[tokio::test]
    async fn test_remove_missing_leaves_entries_untouched() {
        let db = Database::in_memory().await.unwrap();

        db.insert_birthday("@alice", date(15, 12, 1990)).await.unwrap();

        assert!(!db.remove_birthday("@nobody").await.unwrap());
        assert!(!db.remove_birthday("alice").await.unwrap());
        assert_eq!(db.count_birthdays().await.unwrap(), 1);
    }
}
