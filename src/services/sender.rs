use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use thiserror::Error;

use crate::utils::logging::log_delivery_failure;

#[derive(Debug, Error)]
#[error("send to chat {chat_id} failed: {reason}")]
pub struct SendError {
    pub chat_id: i64,
    pub reason: String,
}

/// Something that can deliver a MarkdownV2 message to a chat.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), SendError>;
}

#[async_trait]
impl MessageSender for Bot {
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<(), SendError> {
        self.send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map(|_| ())
            .map_err(|e| SendError {
                chat_id,
                reason: e.to_string(),
            })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: Vec<i64>,
    pub failed: Vec<i64>,
}

impl DeliveryReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends `text` to every chat in turn. A failed chat is logged and skipped;
/// it never stops delivery to the rest.
pub async fn fan_out<S: MessageSender + ?Sized>(
    sender: &S,
    kind: &str,
    chat_ids: &[i64],
    text: &str,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    for &chat_id in chat_ids {
        match sender.send_markdown(chat_id, text).await {
            Ok(()) => report.delivered.push(chat_id),
            Err(e) => {
                log_delivery_failure(kind, chat_id, &e.reason);
                report.failed.push(chat_id);
            }
        }
    }
    report
}
