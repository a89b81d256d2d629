//! # Event Reminder Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the subscriber
//! database, starts the reminder scheduler and runs the Telegram bot
//! alongside the health check server.

use anyhow::Result;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use event_reminder_bot::bot::handlers::{BotHandler, BotState};
use event_reminder_bot::config::Config;
use event_reminder_bot::database::connection::DatabaseManager;
use event_reminder_bot::events::EventStore;
use event_reminder_bot::services::health::HealthService;
use event_reminder_bot::services::reminder::{ReminderContext, ReminderService};
use event_reminder_bot::services::timezone::ReferenceZone;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "event_reminder_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Event Reminder Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, Events: {}, Timezone: {}, HTTP Port: {}",
        config.database_url,
        config.events_csv.display(),
        config.timezone.name(),
        config.http_port
    );

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    db_manager.run_migrations().await?;
    let db_arc = Arc::new(db_manager);
    info!("Database initialized successfully");

    let store = Arc::new(EventStore::new(config.events_csv.clone()));
    let (snapshot, report) = store.load_with_report_blocking().await;
    if report.is_healthy() {
        info!("Event source ready with {} events", snapshot.len());
    }
    let zone = ReferenceZone::new(config.timezone);

    // Initialize bot
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(BotState {
        db: db_arc.as_ref().clone(),
        store: store.clone(),
        zone,
        default_chat_id: config.default_chat_id,
    });

    // Initialize and start reminder service
    info!("Initializing reminder service...");
    let context = ReminderContext {
        sender: Arc::new(bot.clone()),
        db: db_arc.clone(),
        store: store.clone(),
        zone,
        default_chat_id: config.default_chat_id,
    };
    let mut reminder_service = match ReminderService::new(
        context,
        &config.daily_reminder_cron,
        &config.weekly_summary_cron,
    )
    .await
    {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to create reminder service: {}", e);
            return Err(anyhow::anyhow!("Failed to create reminder service: {}", e));
        }
    };

    if let Err(e) = reminder_service.start().await {
        tracing::error!("Failed to start reminder service: {}", e);
        return Err(anyhow::anyhow!("Failed to start reminder service: {}", e));
    }

    // Initialize health service
    let health_service = HealthService::new(db_arc.clone(), store);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop reminder service on shutdown
    if let Err(e) = reminder_service.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
