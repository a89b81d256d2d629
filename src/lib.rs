//! # Event Reminder Bot
//!
//! A Telegram bot that reads a CSV calendar and keeps registered chats
//! informed about what is coming up.
//!
//! ## Features
//! - Daily reminder for today's event, falling back to tomorrow's
//! - Weekly summary of the following Monday to Sunday
//! - `/next`, `/next5events`, `/week` and `/lastreminder` lookups
//! - Chat registration persisted in SQLite

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Subscriber registry and sent reminder log
pub mod database;
/// Event records, CSV loading and the date queries
pub mod events;
/// Scheduled reminders, delivery, health checks and timezone handling
pub mod services;
/// Utility functions for dates, markdown, rendering and logging
pub mod utils;
