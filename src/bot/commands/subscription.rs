use teloxide::prelude::*;
use crate::bot::handlers::{sender_name, BotState};
use crate::database::models::Subscriber;
use crate::utils::logging::{log_command_error, log_command_start, log_command_success, log_database_operation};

pub async fn handle_start(bot: Bot, msg: Message, state: &BotState) -> ResponseResult<()> {
    let user = sender_name(&msg);
    let chat_id = msg.chat.id.0;
    log_command_start("/start", &user, chat_id);

    let username = msg.from().and_then(|u| u.username.clone());
    let reply = match Subscriber::register(&state.db.pool, chat_id, username.as_deref()).await {
        Ok(true) => {
            log_database_operation("INSERT", "subscribers", Some(&chat_id.to_string()));
            "👋 Welcome! This chat will now receive a daily reminder and a weekly summary.\n\nUse /help to see all commands."
        }
        Ok(false) => "✅ This chat is already subscribed.\n\nUse /help to see all commands.",
        Err(e) => {
            log_command_error("/start", &user, chat_id, &e.to_string());
            bot.send_message(msg.chat.id, "❌ Could not register this chat. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    log_command_success("/start", &user, chat_id, None);
    Ok(())
}

pub async fn handle_stop(bot: Bot, msg: Message, state: &BotState) -> ResponseResult<()> {
    let user = sender_name(&msg);
    let chat_id = msg.chat.id.0;
    log_command_start("/stop", &user, chat_id);

    let is_configured_chat = state.default_chat_id == Some(chat_id);
    let reply = match Subscriber::unregister(&state.db.pool, chat_id).await {
        Ok(removed) => {
            if removed {
                log_database_operation("DELETE", "subscribers", Some(&chat_id.to_string()));
            }
            stop_reply(removed, is_configured_chat)
        }
        Err(e) => {
            log_command_error("/stop", &user, chat_id, &e.to_string());
            bot.send_message(msg.chat.id, "❌ Could not unsubscribe this chat. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    log_command_success("/stop", &user, chat_id, None);
    Ok(())
}

/// The configured chat keeps receiving scheduled messages whatever its
/// subscription state.
fn stop_reply(removed: bool, is_configured_chat: bool) -> &'static str {
    match (removed, is_configured_chat) {
        (_, true) => "ℹ️ This chat is configured by the bot operator and keeps receiving the daily reminder and weekly summary.",
        (true, false) => "🔕 This chat will no longer receive reminders. Use /start to subscribe again.",
        (false, false) => "ℹ️ This chat was not subscribed.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reply_for_subscribers() {
        assert!(stop_reply(true, false).contains("no longer receive"));
        assert!(stop_reply(false, false).contains("was not subscribed"));
    }

    #[test]
    fn test_stop_reply_for_configured_chat_never_claims_removal() {
        for removed in [true, false] {
            let reply = stop_reply(removed, true);
            assert!(reply.contains("keeps receiving"));
            assert!(!reply.contains("no longer receive"));
            assert!(!reply.contains("was not subscribed"));
        }
    }
}
