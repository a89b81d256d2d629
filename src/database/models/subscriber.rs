use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Subscriber {
    pub chat_id: i64,
    pub username: Option<String>,
    pub registered_at: String,
}

impl Subscriber {
    /// Adds the chat if it is not registered yet. Returns `true` when a new
    /// row was written and `false` when the chat was already present.
    pub async fn register(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        username: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let registered_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        let result = sqlx::query(
            "INSERT OR IGNORE INTO subscribers (chat_id, username, registered_at) VALUES (?, ?, ?)"
        )
        .bind(chat_id)
        .bind(username)
        .bind(&registered_at)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if the chat was registered.
    pub async fn unregister(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM subscribers WHERE chat_id = ?")
            .bind(chat_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_chat_id(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Subscriber>(
            "SELECT chat_id, username, registered_at FROM subscribers WHERE chat_id = ?"
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Subscriber>(
            "SELECT chat_id, username, registered_at FROM subscribers ORDER BY chat_id"
        )
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscribers")
            .fetch_one(pool)
            .await
    }
}
