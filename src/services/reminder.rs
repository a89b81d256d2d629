use tokio_cron_scheduler::{JobScheduler, Job};
use chrono::NaiveDate;
use crate::database::{connection::DatabaseManager, models::*};
use crate::events::{EventRecord, EventStore, ReminderResult};
use crate::services::sender::{fan_out, DeliveryReport, MessageSender};
use crate::services::timezone::ReferenceZone;
use crate::utils::logging::{log_database_error, log_system_event};
use crate::utils::messages::{render_reminder, render_weekly_summary};
use std::sync::Arc;

/// What one scheduled cycle selected, rendered and delivered.
#[derive(Debug, Clone)]
pub struct CycleOutcome<T> {
    pub selection: T,
    pub message: String,
    pub delivery: DeliveryReport,
}

/// Everything a reminder cycle needs. Cheap to clone into scheduler jobs.
#[derive(Clone)]
pub struct ReminderContext {
    pub sender: Arc<dyn MessageSender>,
    pub db: Arc<DatabaseManager>,
    pub store: Arc<EventStore>,
    pub zone: ReferenceZone,
    pub default_chat_id: Option<i64>,
}

impl ReminderContext {
    /// The configured chat plus every subscriber, deduplicated and sorted.
    pub async fn recipients(&self) -> Vec<i64> {
        let mut chat_ids: Vec<i64> = self.default_chat_id.into_iter().collect();

        match Subscriber::all(&self.db.pool).await {
            Ok(subscribers) => chat_ids.extend(subscribers.iter().map(|s| s.chat_id)),
            Err(e) => log_database_error("SELECT", "subscribers", &e.to_string()),
        }

        chat_ids.sort_unstable();
        chat_ids.dedup();
        chat_ids
    }

    pub async fn run_daily_reminder(&self, today: NaiveDate) -> CycleOutcome<ReminderResult> {
        let snapshot = self.store.load_blocking().await;
        let selection = snapshot.reminder_for(today);
        let message = render_reminder(&selection);

        let delivery = self.publish(ReminderKind::Daily, &message).await;
        tracing::info!(
            "Daily reminder for {}: {:?} event, delivered to {}, failed for {}",
            today,
            selection.event().map(|e| e.title.as_str()),
            delivery.delivered.len(),
            delivery.failed.len()
        );

        CycleOutcome { selection, message, delivery }
    }

    pub async fn run_weekly_summary(&self, today: NaiveDate) -> CycleOutcome<Vec<EventRecord>> {
        let snapshot = self.store.load_blocking().await;
        let selection = snapshot.weekly_summary(today);
        let message = render_weekly_summary(&selection);

        let delivery = self.publish(ReminderKind::Weekly, &message).await;
        tracing::info!(
            "Weekly summary after {}: {} events, delivered to {}, failed for {}",
            today,
            selection.len(),
            delivery.delivered.len(),
            delivery.failed.len()
        );

        CycleOutcome { selection, message, delivery }
    }

    /// Records the message, then sends it to every recipient.
    async fn publish(&self, kind: ReminderKind, message: &str) -> DeliveryReport {
        if let Err(e) = SentReminder::create(&self.db.pool, kind, message).await {
            log_database_error("INSERT", "sent_reminders", &e.to_string());
        }

        let recipients = self.recipients().await;
        if recipients.is_empty() {
            tracing::warn!("No recipients registered, {} message not sent", kind.as_str());
        }
        fan_out(self.sender.as_ref(), kind.as_str(), &recipients, message).await
    }
}

pub struct ReminderService {
    context: ReminderContext,
    scheduler: JobScheduler,
    daily_cron: String,
    weekly_cron: String,
}

impl ReminderService {
    pub async fn new(
        context: ReminderContext,
        daily_cron: &str,
        weekly_cron: &str,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            context,
            scheduler,
            daily_cron: daily_cron.to_string(),
            weekly_cron: weekly_cron.to_string(),
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let tz = self.context.zone.tz();

        let daily_context = self.context.clone();
        let daily_job = Job::new_async_tz(self.daily_cron.as_str(), tz, move |_uuid, _l| {
            let context = daily_context.clone();
            Box::pin(async move {
                let today = context.zone.today();
                context.run_daily_reminder(today).await;
            })
        })?;

        let weekly_context = self.context.clone();
        let weekly_job = Job::new_async_tz(self.weekly_cron.as_str(), tz, move |_uuid, _l| {
            let context = weekly_context.clone();
            Box::pin(async move {
                let today = context.zone.today();
                context.run_weekly_summary(today).await;
            })
        })?;

        self.scheduler.add(daily_job).await?;
        self.scheduler.add(weekly_job).await?;
        self.scheduler.start().await?;

        log_system_event(
            "Reminder service started",
            Some(&format!(
                "daily '{}', weekly '{}' in {}",
                self.daily_cron,
                self.weekly_cron,
                tz.name()
            )),
        );
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }
}
