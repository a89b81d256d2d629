use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::bot::handlers::{sender_name, BotState};
use crate::database::models::{ReminderKind, SentReminder};
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};
use crate::utils::messages::NO_REMINDER_YET;

pub async fn handle_last_reminder(bot: Bot, msg: Message, state: &BotState) -> ResponseResult<()> {
    let user = sender_name(&msg);
    log_command_start("/lastreminder", &user, msg.chat.id.0);

    let text = match SentReminder::latest(&state.db.pool, ReminderKind::Daily).await {
        Ok(Some(reminder)) => reminder.message,
        Ok(None) => NO_REMINDER_YET.to_string(),
        Err(e) => {
            log_command_error("/lastreminder", &user, msg.chat.id.0, &e.to_string());
            bot.send_message(msg.chat.id, "❌ Could not load the last reminder. Please try again later.")
                .await?;
            return Ok(());
        }
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    log_command_success("/lastreminder", &user, msg.chat.id.0, None);
    Ok(())
}
