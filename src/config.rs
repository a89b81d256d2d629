use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/reminders.db";
pub const DEFAULT_EVENTS_CSV: &str = "eventi.csv";
pub const DEFAULT_TIMEZONE: &str = "Europe/Rome";
/// 00:01 every day, in the reference timezone.
pub const DEFAULT_DAILY_REMINDER_CRON: &str = "0 1 0 * * *";
/// 00:01 every Sunday, in the reference timezone.
pub const DEFAULT_WEEKLY_SUMMARY_CRON: &str = "0 1 0 * * Sun";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    pub events_csv: PathBuf,
    pub timezone: Tz,
    /// Chat that always receives scheduled messages, on top of subscribers.
    pub default_chat_id: Option<i64>,
    pub daily_reminder_cron: String,
    pub weekly_summary_cron: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = var_or_default("DATABASE_URL", DEFAULT_DATABASE_URL);

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let events_csv = PathBuf::from(var_or_default("EVENTS_CSV", DEFAULT_EVENTS_CSV));

        let tz_name = var_or_default("REFERENCE_TIMEZONE", DEFAULT_TIMEZONE);
        let timezone = tz_name.trim()
            .parse::<Tz>()
            .map_err(|_| anyhow!("Invalid REFERENCE_TIMEZONE: {}", tz_name))?;

        let default_chat_id = match env::var("CHAT_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid CHAT_ID"))?,
            ),
            _ => None,
        };

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            events_csv,
            timezone,
            default_chat_id,
            daily_reminder_cron: cron_var("DAILY_REMINDER_CRON", DEFAULT_DAILY_REMINDER_CRON)?,
            weekly_summary_cron: cron_var("WEEKLY_SUMMARY_CRON", DEFAULT_WEEKLY_SUMMARY_CRON)?,
        })
    }
}

/// Six-field cron expression (seconds first), checked at startup.
fn cron_var(key: &str, default: &str) -> Result<String> {
    let value = var_or_default(key, default);
    let expression = value.trim();
    cron::Schedule::from_str(expression)
        .map_err(|e| anyhow!("Invalid {}: '{}' ({})", key, expression, e))?;
    Ok(expression.to_string())
}

/// Unset and blank both fall back to `default`.
fn var_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}
