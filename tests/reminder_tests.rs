#![allow(clippy::unwrap_used, clippy::panic)]

use async_trait::async_trait;
use chrono::NaiveDate;
use event_reminder_bot::database::connection::DatabaseManager;
use event_reminder_bot::database::models::{ReminderKind, SentReminder, Subscriber};
use event_reminder_bot::events::{EventStore, ReminderResult};
use event_reminder_bot::services::reminder::ReminderContext;
use event_reminder_bot::services::sender::{fan_out, MessageSender, SendError};
use event_reminder_bot::services::timezone::ReferenceZone;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};

/// Records every delivery and fails for the chats listed in `failing`.
#[derive(Default)]
struct RecordingSender {
    failing: Vec<i64>,
    sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingSender {
    fn failing_for(chat_ids: &[i64]) -> Self {
        Self {
            failing: chat_ids.to_vec(),
            ..Self::default()
        }
    }

    fn sent_to(&self) -> Vec<i64> {
        self.sent.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), SendError> {
        if self.failing.contains(&chat_id) {
            return Err(SendError {
                chat_id,
                reason: "Forbidden: bot was blocked by the user".to_string(),
            });
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

const CALENDAR: &str = "\
data,event,descrizione
2024-06-10,Opening race,Circuit A
2024-06-12,Sprint,Circuit B
2024-06-12,Feature race,Circuit B
2024-06-18,Night race,Circuit C
";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn setup(
    sender: Arc<RecordingSender>,
    default_chat_id: Option<i64>,
) -> (ReminderContext, TempDir) {
    let dir = tempdir().unwrap();
    let db_url = format!("sqlite:{}", dir.path().join("test.db").to_string_lossy());
    let db = DatabaseManager::new(&db_url).await.unwrap();
    db.run_migrations().await.unwrap();

    let csv_path = dir.path().join("eventi.csv");
    std::fs::write(&csv_path, CALENDAR).unwrap();

    let sender: Arc<dyn MessageSender> = sender;
    let context = ReminderContext {
        sender,
        db: Arc::new(db),
        store: Arc::new(EventStore::new(csv_path)),
        zone: ReferenceZone::default(),
        default_chat_id,
    };
    (context, dir)
}

#[tokio::test]
async fn test_fan_out_isolates_failures() {
    let sender = RecordingSender::failing_for(&[2]);

    let report = fan_out(&sender, "daily", &[1, 2, 3], "hello").await;

    assert_eq!(report.delivered, vec![1, 3]);
    assert_eq!(report.failed, vec![2]);
    assert!(!report.all_delivered());
    assert_eq!(sender.sent_to(), vec![1, 3]);
}

#[tokio::test]
async fn test_fan_out_to_nobody() {
    let sender = RecordingSender::default();
    let report = fan_out(&sender, "daily", &[], "hello").await;
    assert!(report.all_delivered());
    assert!(report.delivered.is_empty());
}

#[tokio::test]
async fn test_recipients_merge_default_chat_and_subscribers() {
    let sender = Arc::new(RecordingSender::default());
    let (context, _dir) = setup(sender, Some(500)).await;

    Subscriber::register(&context.db.pool, 900, None).await.unwrap();
    Subscriber::register(&context.db.pool, 500, None).await.unwrap();
    Subscriber::register(&context.db.pool, -7, None).await.unwrap();

    assert_eq!(context.recipients().await, vec![-7, 500, 900]);
}

#[tokio::test]
async fn test_daily_reminder_today_branch() {
    let sender = Arc::new(RecordingSender::default());
    let (context, _dir) = setup(sender.clone(), Some(1)).await;

    let outcome = context.run_daily_reminder(date(2024, 6, 12)).await;

    match &outcome.selection {
        ReminderResult::Today(event) => assert_eq!(event.title, "Sprint"),
        other => panic!("expected today's event, got {other:?}"),
    }
    assert!(outcome.message.contains("Event today"));
    assert_eq!(outcome.delivery.delivered, vec![1]);
    assert_eq!(sender.sent_to(), vec![1]);
}

#[tokio::test]
async fn test_daily_reminder_tomorrow_and_nothing_branches() {
    let sender = Arc::new(RecordingSender::default());
    let (context, _dir) = setup(sender, Some(1)).await;

    let tomorrow = context.run_daily_reminder(date(2024, 6, 11)).await;
    match &tomorrow.selection {
        ReminderResult::Tomorrow(event) => assert_eq!(event.title, "Sprint"),
        other => panic!("expected tomorrow's event, got {other:?}"),
    }

    let nothing = context.run_daily_reminder(date(2024, 6, 14)).await;
    assert_eq!(nothing.selection, ReminderResult::Nothing);
    assert_ne!(tomorrow.message, nothing.message);
}

#[tokio::test]
async fn test_daily_reminder_survives_failing_recipient_and_is_logged() {
    let sender = Arc::new(RecordingSender::failing_for(&[20]));
    let (context, _dir) = setup(sender.clone(), None).await;
    for chat_id in [10, 20, 30] {
        Subscriber::register(&context.db.pool, chat_id, None).await.unwrap();
    }

    let outcome = context.run_daily_reminder(date(2024, 6, 10)).await;

    assert_eq!(outcome.delivery.delivered, vec![10, 30]);
    assert_eq!(outcome.delivery.failed, vec![20]);

    let stored = SentReminder::latest(&context.db.pool, ReminderKind::Daily)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.message, outcome.message);
}

#[tokio::test]
async fn test_weekly_summary_cycle() {
    let sender = Arc::new(RecordingSender::default());
    let (context, _dir) = setup(sender.clone(), Some(1)).await;

    // Sunday 2024-06-16: the window is Monday 17th to Sunday 23rd.
    let outcome = context.run_weekly_summary(date(2024, 6, 16)).await;

    let titles: Vec<&str> = outcome.selection.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Night race"]);
    assert!(outcome.message.contains("Night race"));

    // Weekly summaries never replace the last daily reminder.
    assert!(SentReminder::latest(&context.db.pool, ReminderKind::Daily)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_cycle_with_missing_calendar_still_sends_fallback() {
    let sender = Arc::new(RecordingSender::default());
    let (mut context, _dir) = setup(sender.clone(), Some(1)).await;
    context.store = Arc::new(EventStore::new("/nonexistent/eventi.csv"));

    let outcome = context.run_daily_reminder(date(2024, 6, 12)).await;

    assert_eq!(outcome.selection, ReminderResult::Nothing);
    assert_eq!(sender.sent_to(), vec![1]);
}
