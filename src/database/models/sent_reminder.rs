use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderKind {
    Daily,
    Weekly,
}

impl ReminderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderKind::Daily => "daily",
            ReminderKind::Weekly => "weekly",
        }
    }
}

/// A rendered scheduled message, kept so `/lastreminder` can replay it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SentReminder {
    pub id: String,
    pub kind: String,
    pub message: String,
    pub sent_at: String,
}

impl SentReminder {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        kind: ReminderKind,
        message: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let sent_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        sqlx::query(
            "INSERT INTO sent_reminders (id, kind, message, sent_at) VALUES (?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(kind.as_str())
        .bind(message)
        .bind(&sent_at)
        .execute(pool)
        .await?;

        Ok(SentReminder {
            id,
            kind: kind.as_str().to_string(),
            message: message.to_string(),
            sent_at,
        })
    }

    /// Most recent message of `kind`. Ties on `sent_at` go to the later insert.
    pub async fn latest(
        pool: &sqlx::SqlitePool,
        kind: ReminderKind,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, SentReminder>(
            "SELECT id, kind, message, sent_at FROM sent_reminders
             WHERE kind = ?
             ORDER BY sent_at DESC, rowid DESC
             LIMIT 1"
        )
        .bind(kind.as_str())
        .fetch_optional(pool)
        .await
    }
}
