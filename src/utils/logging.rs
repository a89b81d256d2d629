use crate::events::source::LoadReport;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, chat_id: i64) {
    info!("CMD_START: {} by {} in chat {}", command, user, chat_id);
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, chat_id: i64, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} by {} in chat {} - {}", command, user, chat_id, d),
        None => info!("CMD_SUCCESS: {} by {} in chat {}", command, user, chat_id),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, chat_id: i64, error: &str) {
    error!("CMD_ERROR: {} by {} in chat {} - {}", command, user, chat_id, error);
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str) {
    error!("DB_ERROR: {} on {} failed: {}", operation, table, error);
}

/// Logs the outcome of one event source read
pub fn log_event_source(path: &Path, report: &LoadReport) {
    if let Some(e) = &report.error {
        error!("EVENT_SOURCE: {} unusable, serving no events: {}", path.display(), e);
        return;
    }
    for dropped in &report.dropped {
        warn!(
            "EVENT_SOURCE: {} line {} skipped: {}",
            path.display(),
            dropped.line,
            dropped.reason
        );
    }
    debug!(
        "EVENT_SOURCE: {} loaded {} of {} rows",
        path.display(),
        report.rows_kept,
        report.rows_read
    );
}

/// Logs a single failed delivery
pub fn log_delivery_failure(kind: &str, chat_id: i64, error: &str) {
    warn!("DELIVERY: {} to chat {} failed: {}", kind, chat_id, error);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
